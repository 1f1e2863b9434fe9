//! Ordered query builder with deferred sorting.
//!
//! An [`OrderedQuery`] holds its snapshot unsorted together with a queue of
//! pending [`KeyOrder`]s. Nothing is sorted until the first read through
//! [`Queryable`]; at that point the queue is applied once and the result is
//! cached, so the builder behaves like a plain sorted sequence from then on.
//!
//! # Queue layout
//!
//! `order_by` seeds the queue with the primary key. Every `then_by` pushes
//! its key to the *front*. Applying the queue front to back therefore runs
//! the least significant key first and the primary key last, and since each
//! pass is a stable sort the primary key dominates:
//!
//! ```text
//! order_by(a).then_by(b).then_by(c)  =>  queue [c, b, a]
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::ordering::{insertion_sort, ComparatorOrder, Dir, KeyOrder, NaturalOrder};
use crate::query::Query;
use crate::queryable::Queryable;

type BoxedOrder<'a, T> = Box<dyn KeyOrder<T> + 'a>;

/// A query with pending orderings.
///
/// Created by [`Query::order_by`] and its siblings.
///
/// # Example
///
/// ```
/// use standout_linq::{Query, Queryable};
///
/// let people = vec![("Sandor", 48), ("Maca", 56), ("Papp", 57), ("Tamas", 22)];
///
/// let by_decade_then_name = Query::new(people)
///     .order_by(|p| p.1 / 10)
///     .then_by(|p| p.0)
///     .select(|p| p.0)
///     .to_list();
///
/// assert_eq!(by_decade_then_name, vec!["Tamas", "Sandor", "Maca", "Papp"]);
/// ```
pub struct OrderedQuery<'a, T> {
    items: Vec<T>,
    orderings: VecDeque<BoxedOrder<'a, T>>,
    sorted: OnceCell<Vec<T>>,
}

impl<'a, T: 'a> OrderedQuery<'a, T> {
    pub(crate) fn new(items: Vec<T>, primary: BoxedOrder<'a, T>) -> Self {
        OrderedQuery {
            items,
            orderings: VecDeque::from([primary]),
            sorted: OnceCell::new(),
        }
    }

    /// Returns the number of pending key orderings.
    pub fn key_count(&self) -> usize {
        self.orderings.len()
    }

    /// Returns `true` once the orderings have been applied.
    pub fn is_materialized(&self) -> bool {
        self.sorted.get().is_some()
    }

    /// Adds an ascending secondary key with natural ordering.
    pub fn then_by<K, F>(self, selector: F) -> Self
    where
        K: Ord + 'a,
        F: Fn(&T) -> K + 'a,
    {
        self.then(NaturalOrder::new(selector, Dir::Asc))
    }

    /// Adds a descending secondary key with natural ordering.
    pub fn then_by_descending<K, F>(self, selector: F) -> Self
    where
        K: Ord + 'a,
        F: Fn(&T) -> K + 'a,
    {
        self.then(NaturalOrder::new(selector, Dir::Desc))
    }

    /// Adds an ascending secondary key compared with `comparator`.
    pub fn then_by_with<K, F, C>(self, selector: F, comparator: C) -> Self
    where
        K: 'a,
        F: Fn(&T) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        self.then(ComparatorOrder::new(selector, comparator, Dir::Asc))
    }

    /// Adds a descending secondary key compared with `comparator`.
    pub fn then_by_descending_with<K, F, C>(self, selector: F, comparator: C) -> Self
    where
        K: 'a,
        F: Fn(&T) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        self.then(ComparatorOrder::new(selector, comparator, Dir::Desc))
    }

    fn then(mut self, order: impl KeyOrder<T> + 'a) -> Self {
        // A cached result no longer reflects the full key set.
        if let Some(sorted) = self.sorted.take() {
            self.items = sorted;
        }
        self.orderings.push_front(Box::new(order));
        self
    }

    /// Applies the pending orderings and returns an unordered builder over
    /// the sorted sequence.
    pub fn into_query(self) -> Query<T> {
        let OrderedQuery {
            items,
            orderings,
            sorted,
        } = self;
        let sorted = match sorted.into_inner() {
            Some(sorted) => sorted,
            None => apply_orderings(items, &orderings),
        };
        Query::from(sorted)
    }
}

impl<'a, T: Clone + 'a> Queryable<T> for OrderedQuery<'a, T> {
    fn as_slice(&self) -> &[T] {
        self.sorted
            .get_or_init(|| apply_orderings(self.items.clone(), &self.orderings))
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedQuery<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedQuery")
            .field("items", &self.items)
            .field("keys", &self.orderings.len())
            .field("materialized", &self.sorted.get().is_some())
            .finish()
    }
}

fn apply_orderings<T>(items: Vec<T>, orderings: &VecDeque<BoxedOrder<'_, T>>) -> Vec<T> {
    debug!(
        keys = orderings.len(),
        elements = items.len(),
        "applying pending orderings"
    );
    orderings
        .iter()
        .fold(items, |items, order| insertion_sort(items, order.as_ref()))
}

impl<'a, T: 'a> From<OrderedQuery<'a, T>> for Query<T> {
    fn from(ordered: OrderedQuery<'a, T>) -> Self {
        ordered.into_query()
    }
}
