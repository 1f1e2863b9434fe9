//! Unordered query builder.
//!
//! [`Query`] owns a private snapshot of its input. Filtering and
//! concatenation rewrite that snapshot in place; ordering moves it into an
//! [`OrderedQuery`], where the sort is deferred until the first read.

use std::cmp::Ordering;

use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::ordered::OrderedQuery;
use crate::ordering::{ComparatorOrder, Dir, KeyOrder, NaturalOrder};
use crate::queryable::Queryable;

/// The unordered query builder.
///
/// # Example
///
/// ```
/// use standout_linq::{Query, Queryable};
///
/// #[derive(Clone)]
/// struct Task {
///     name: &'static str,
///     priority: u8,
///     done: bool,
/// }
///
/// let tasks = vec![
///     Task { name: "Write docs", priority: 3, done: false },
///     Task { name: "Fix bug", priority: 5, done: false },
///     Task { name: "Old task", priority: 1, done: true },
/// ];
///
/// let names = Query::new(tasks)
///     .filter(|t| !t.done)
///     .order_by_descending(|t| t.priority)
///     .select(|t| t.name)
///     .to_list();
///
/// assert_eq!(names, vec!["Fix bug", "Write docs"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query<T> {
    items: Vec<T>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Query { items: Vec::new() }
    }
}

impl<T> Query<T> {
    /// Creates a query over a snapshot of `items`.
    ///
    /// Later changes to the caller's collection do not reach the query.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Query {
            items: items.into_iter().collect(),
        }
    }

    /// Creates an empty query.
    pub fn empty() -> Self {
        Query::default()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the query holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the elements in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the query, returning its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // ========================================================================
    // In-place operations
    // ========================================================================

    /// Keeps only the elements satisfying the condition.
    pub fn filter<P>(mut self, condition: P) -> Self
    where
        P: Fn(&T) -> bool,
    {
        self.retain(condition);
        self
    }

    /// Keeps only the elements whose selected text matches `pattern`.
    ///
    /// The pattern is compiled before anything is removed, so an invalid
    /// pattern returns [`QueryError::InvalidRegex`](crate::QueryError::InvalidRegex)
    /// and leaves the query as it was.
    ///
    /// ```
    /// use standout_linq::{Query, Queryable};
    ///
    /// let mut plates = Query::new(vec!["SQL-123", "FOS-999", "PRO-000"]);
    /// assert!(plates.filter_regex(|p| *p, "(").is_err());
    /// assert_eq!(plates.count(), 3);
    ///
    /// plates.filter_regex(|p| *p, r"-\d{3}$").unwrap();
    /// plates.filter_regex(|p| *p, "^[FP]").unwrap();
    /// assert_eq!(plates.to_list(), vec!["FOS-999", "PRO-000"]);
    /// ```
    pub fn filter_regex<S, F>(&mut self, selector: F, pattern: &str) -> Result<()>
    where
        S: AsRef<str>,
        F: Fn(&T) -> S,
    {
        let regex = Regex::new(pattern)?;
        self.retain(|item| regex.is_match(selector(item).as_ref()));
        Ok(())
    }

    fn retain<P>(&mut self, condition: P)
    where
        P: Fn(&T) -> bool,
    {
        let before = self.items.len();
        self.items.retain(|item| condition(item));
        trace!(
            kept = self.items.len(),
            dropped = before - self.items.len(),
            "filtered query"
        );
    }

    /// Appends `other` to the end of the sequence.
    pub fn concat<I>(mut self, other: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        self.items.extend(other);
        self
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    /// Orders ascending by a key's natural ordering.
    ///
    /// The sort runs when the returned builder is first read.
    ///
    /// Keys are owned values: the selector's return type cannot borrow from
    /// the element, so `|p| p.name.as_str()` is rejected. Return a `Copy`
    /// field, a clone, or a cheap derived value instead. The same holds for
    /// every `order_by*` and `then_by*` selector.
    ///
    /// ```
    /// use standout_linq::{Query, Queryable};
    ///
    /// #[derive(Clone)]
    /// struct Person {
    ///     name: String,
    /// }
    ///
    /// let people = Query::new(vec![
    ///     Person { name: "Papp".to_string() },
    ///     Person { name: "Maca".to_string() },
    /// ]);
    ///
    /// let ordered = people.order_by(|p| p.name.clone());
    /// assert_eq!(ordered.first().unwrap().name, "Maca");
    /// ```
    pub fn order_by<'a, K, F>(self, selector: F) -> OrderedQuery<'a, T>
    where
        T: 'a,
        K: Ord + 'a,
        F: Fn(&T) -> K + 'a,
    {
        self.ordered(NaturalOrder::new(selector, Dir::Asc))
    }

    /// Orders descending by a key's natural ordering.
    pub fn order_by_descending<'a, K, F>(self, selector: F) -> OrderedQuery<'a, T>
    where
        T: 'a,
        K: Ord + 'a,
        F: Fn(&T) -> K + 'a,
    {
        self.ordered(NaturalOrder::new(selector, Dir::Desc))
    }

    /// Orders ascending by a key compared with `comparator`.
    pub fn order_by_with<'a, K, F, C>(self, selector: F, comparator: C) -> OrderedQuery<'a, T>
    where
        T: 'a,
        K: 'a,
        F: Fn(&T) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        self.ordered(ComparatorOrder::new(selector, comparator, Dir::Asc))
    }

    /// Orders descending by a key compared with `comparator`.
    pub fn order_by_descending_with<'a, K, F, C>(
        self,
        selector: F,
        comparator: C,
    ) -> OrderedQuery<'a, T>
    where
        T: 'a,
        K: 'a,
        F: Fn(&T) -> K + 'a,
        C: Fn(&K, &K) -> Ordering + 'a,
    {
        self.ordered(ComparatorOrder::new(selector, comparator, Dir::Desc))
    }

    fn ordered<'a>(self, order: impl KeyOrder<T> + 'a) -> OrderedQuery<'a, T>
    where
        T: 'a,
    {
        OrderedQuery::new(self.items, Box::new(order))
    }
}

impl<T> Queryable<T> for Query<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Query<T> {
    fn from(items: Vec<T>) -> Self {
        Query { items }
    }
}

impl<T> FromIterator<T> for Query<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Query::new(iter)
    }
}

impl<T> IntoIterator for Query<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'q, T> IntoIterator for &'q Query<T> {
    type Item = &'q T;
    type IntoIter = std::slice::Iter<'q, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;

    #[derive(Debug, Clone, PartialEq)]
    struct Task {
        name: String,
        priority: i64,
        archived: bool,
    }

    fn task(name: &str, priority: i64, archived: bool) -> Task {
        Task {
            name: name.to_string(),
            priority,
            archived,
        }
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("Task A", 1, false),
            task("Task B", 2, false),
            task("Urgent Task", 5, false),
            task("Critical Task", 5, true),
            task("Done Task", 3, true),
        ]
    }

    #[test]
    fn snapshot_is_independent_of_input() {
        let mut tasks = sample_tasks();
        let query = Query::new(tasks.clone());
        tasks.clear();

        assert_eq!(query.len(), 5);
        assert!(!query.is_empty());
    }

    #[test]
    fn filter_in_place() {
        let query = Query::new(sample_tasks()).filter(|t| !t.archived);
        assert_eq!(query.count(), 3);
        assert!(query.all(|t| !t.archived));
    }

    #[test]
    fn filter_chains() {
        let query = Query::new(sample_tasks())
            .filter(|t| t.priority >= 2)
            .filter(|t| !t.archived);

        let names: Vec<_> = query.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Task B", "Urgent Task"]);
    }

    #[test]
    fn filter_regex_matches_projection() {
        let mut query = Query::new(sample_tasks());
        query.filter_regex(|t| t.name.clone(), r"^Task [A-Z]$").unwrap();
        assert_eq!(query.count(), 2);
    }

    #[test]
    fn filter_regex_bad_pattern_keeps_snapshot() {
        let mut query = Query::new(sample_tasks());
        let err = query
            .filter_regex(|t| t.name.clone(), "(unclosed")
            .unwrap_err();
        assert!(matches!(err, QueryError::InvalidRegex(_)));

        assert_eq!(query.to_list(), sample_tasks());
        let open = query.filter(|t| !t.archived);
        assert_eq!(open.count(), 3);
    }

    #[test]
    fn concat_appends() {
        let query = Query::new(vec![1, 2]).concat(vec![3]).concat(Query::new([4, 5]));
        assert_eq!(query.into_vec(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn order_by_moves_into_ordered_builder() {
        let names = Query::new(sample_tasks())
            .order_by(|t| t.priority)
            .select(|t| t.name.clone())
            .into_vec();

        assert_eq!(
            names,
            vec!["Task A", "Task B", "Done Task", "Urgent Task", "Critical Task"]
        );
    }

    #[test]
    fn order_by_descending_with_comparator() {
        let values = Query::new(vec![0.5, -2.0, 3.25])
            .order_by_descending_with(|x| *x, |a: &f64, b: &f64| a.total_cmp(b))
            .to_list();
        assert_eq!(values, vec![3.25, 0.5, -2.0]);
    }

    #[test]
    fn conversions() {
        let from_vec: Query<i32> = vec![1, 2].into();
        let collected: Query<i32> = (1..=2).collect();
        assert_eq!(from_vec, collected);

        let doubled: Vec<i32> = (&from_vec).into_iter().map(|x| x * 2).collect();
        assert_eq!(doubled, vec![2, 4]);
        assert!(Query::<u8>::empty().is_empty());
    }
}
