//! The read-only query surface shared by every builder state.
//!
//! [`Queryable`] is implemented by [`Query`] (the unordered builder) and
//! [`OrderedQuery`](crate::OrderedQuery) (the pending-sort builder). The only
//! required method is [`Queryable::as_slice`]; everything else is built on
//! top of it. For an ordered builder, `as_slice` is where pending orderings
//! are applied, so every operation here sees the sorted sequence.
//!
//! Operations that produce a sequence return a fresh [`Query`] over a copy
//! of the data; the builder they were called on is never modified.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::aggregate::{check_amount, extremum, mean, sum_numeric, sum_projected};
use crate::error::{QueryError, Result};
use crate::join::Join;
use crate::number::{Number, Numeric};
use crate::query::Query;
use crate::when::When;

/// Shared query operations over a working sequence.
///
/// # Example
///
/// ```
/// use standout_linq::{Query, Queryable};
///
/// let ages = Query::new([48, 56, 57, 22]);
///
/// assert_eq!(ages.count_where(|age| *age > 50), 2);
/// assert_eq!(*ages.min().unwrap(), 22);
/// assert_eq!(ages.take(2).unwrap().to_list(), vec![48, 56]);
/// ```
pub trait Queryable<T> {
    /// Returns the working sequence in its current order.
    fn as_slice(&self) -> &[T];

    // ========================================================================
    // Quantifiers
    // ========================================================================

    /// Returns `true` if any element satisfies the condition.
    fn any<P>(&self, condition: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().any(condition)
    }

    /// Returns `true` if every element satisfies the condition.
    ///
    /// Vacuously `true` for an empty sequence.
    fn all<P>(&self, condition: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().all(condition)
    }

    /// Returns `true` if no element satisfies the condition.
    fn none<P>(&self, condition: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        !self.any(condition)
    }

    // ========================================================================
    // Element access
    // ========================================================================

    /// Returns the first element.
    fn first(&self) -> Result<&T> {
        self.as_slice().first().ok_or(QueryError::EmptyCollection)
    }

    /// Returns the first element satisfying the condition.
    fn first_where<P>(&self, condition: P) -> Result<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice()
            .iter()
            .find(|item| condition(item))
            .ok_or(QueryError::NoMatch)
    }

    /// Returns the first element, or `None` if there are none.
    fn first_or_default(&self) -> Option<&T> {
        self.first().ok()
    }

    /// Returns the first element satisfying the condition, or `None`.
    fn first_where_or_default<P>(&self, condition: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.first_where(condition).ok()
    }

    /// Returns the last element.
    fn last(&self) -> Result<&T> {
        self.as_slice().last().ok_or(QueryError::EmptyCollection)
    }

    /// Returns the last element satisfying the condition.
    ///
    /// Scans the whole sequence front to back.
    fn last_where<P>(&self, condition: P) -> Result<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice()
            .iter()
            .filter(|item| condition(item))
            .last()
            .ok_or(QueryError::NoMatch)
    }

    /// Returns the last element, or `None` if there are none.
    fn last_or_default(&self) -> Option<&T> {
        self.last().ok()
    }

    /// Returns the last element satisfying the condition, or `None`.
    fn last_where_or_default<P>(&self, condition: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.last_where(condition).ok()
    }

    /// Returns the only element.
    ///
    /// Fails with [`QueryError::EmptyCollection`] on an empty sequence and
    /// [`QueryError::TooManyElements`] if there is more than one element.
    fn single(&self) -> Result<&T> {
        match self.as_slice() {
            [] => Err(QueryError::EmptyCollection),
            [only] => Ok(only),
            items => Err(QueryError::TooManyElements { count: items.len() }),
        }
    }

    /// Returns the only element satisfying the condition.
    ///
    /// Fails with [`QueryError::NoMatch`] if nothing matches and
    /// [`QueryError::TooManyElements`] if more than one element matches.
    fn single_where<P>(&self, condition: P) -> Result<&T>
    where
        P: Fn(&T) -> bool,
    {
        let mut matches = self.as_slice().iter().filter(|item| condition(item));
        let found = matches.next().ok_or(QueryError::NoMatch)?;
        let extra = matches.count();
        if extra > 0 {
            return Err(QueryError::TooManyElements { count: extra + 1 });
        }
        Ok(found)
    }

    /// Like [`single`](Queryable::single), but an empty sequence yields
    /// `Ok(None)`. Too many elements is still an error.
    fn single_or_default(&self) -> Result<Option<&T>> {
        absent_as_none(self.single())
    }

    /// Like [`single_where`](Queryable::single_where), but no match yields
    /// `Ok(None)`. Too many matches is still an error.
    fn single_where_or_default<P>(&self, condition: P) -> Result<Option<&T>>
    where
        P: Fn(&T) -> bool,
    {
        absent_as_none(self.single_where(condition))
    }

    // ========================================================================
    // Extremes
    // ========================================================================

    /// Returns the smallest element by natural order.
    ///
    /// Fails with [`QueryError::NotComparable`] if two elements have no
    /// defined order (e.g. `NaN`).
    fn min(&self) -> Result<&T>
    where
        T: PartialOrd,
    {
        extremum(self.as_slice(), Ordering::Less, |a, b| a.partial_cmp(b))
    }

    /// Returns the largest element by natural order.
    fn max(&self) -> Result<&T>
    where
        T: PartialOrd,
    {
        extremum(self.as_slice(), Ordering::Greater, |a, b| a.partial_cmp(b))
    }

    /// Returns the smallest element according to `comparator`.
    fn min_with<C>(&self, comparator: C) -> Result<&T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        extremum(self.as_slice(), Ordering::Less, |a, b| Some(comparator(a, b)))
    }

    /// Returns the largest element according to `comparator`.
    fn max_with<C>(&self, comparator: C) -> Result<&T>
    where
        C: Fn(&T, &T) -> Ordering,
    {
        extremum(self.as_slice(), Ordering::Greater, |a, b| {
            Some(comparator(a, b))
        })
    }

    /// Returns the element whose selected key is the smallest.
    ///
    /// The element itself is returned, not the key, so this answers
    /// "which record has the smallest X".
    fn min_by_key<K, F>(&self, selector: F) -> Result<&T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extremum(self.as_slice(), Ordering::Less, |a, b| {
            selector(a).partial_cmp(&selector(b))
        })
    }

    /// Returns the element whose selected key is the largest.
    fn max_by_key<K, F>(&self, selector: F) -> Result<&T>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        extremum(self.as_slice(), Ordering::Greater, |a, b| {
            selector(a).partial_cmp(&selector(b))
        })
    }

    /// Returns the element whose selected key is the smallest according to
    /// `comparator`.
    fn min_by_key_with<K, F, C>(&self, selector: F, comparator: C) -> Result<&T>
    where
        F: Fn(&T) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        extremum(self.as_slice(), Ordering::Less, |a, b| {
            Some(comparator(&selector(a), &selector(b)))
        })
    }

    /// Returns the element whose selected key is the largest according to
    /// `comparator`.
    fn max_by_key_with<K, F, C>(&self, selector: F, comparator: C) -> Result<&T>
    where
        F: Fn(&T) -> K,
        C: Fn(&K, &K) -> Ordering,
    {
        extremum(self.as_slice(), Ordering::Greater, |a, b| {
            Some(comparator(&selector(a), &selector(b)))
        })
    }

    /// Returns the smallest selected key (the key, not the element).
    fn min_of<K, F>(&self, selector: F) -> Result<K>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.min_by_key(&selector).map(&selector)
    }

    /// Returns the largest selected key (the key, not the element).
    fn max_of<K, F>(&self, selector: F) -> Result<K>
    where
        K: PartialOrd,
        F: Fn(&T) -> K,
    {
        self.max_by_key(&selector).map(&selector)
    }

    // ========================================================================
    // Counting and numeric aggregates
    // ========================================================================

    /// Returns the number of elements.
    fn count(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns the number of elements satisfying the condition.
    fn count_where<P>(&self, condition: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.as_slice().iter().filter(|item| condition(item)).count()
    }

    /// Sums the elements themselves.
    ///
    /// Fails with [`QueryError::NotNumeric`] at the first element without a
    /// numeric value. An empty sequence sums to `0.0`.
    fn sum(&self) -> Result<f64>
    where
        T: Numeric,
    {
        sum_numeric(self.as_slice())
    }

    /// Sums a numeric projection of the elements.
    fn sum_by<N, F>(&self, selector: F) -> f64
    where
        N: Into<Number>,
        F: Fn(&T) -> N,
    {
        sum_projected(self.as_slice(), selector)
    }

    /// Averages the elements themselves.
    ///
    /// Fails with [`QueryError::EmptyCollection`] on an empty sequence.
    fn average(&self) -> Result<f64>
    where
        T: Numeric,
    {
        mean(self.sum()?, self.count())
    }

    /// Averages a numeric projection of the elements.
    ///
    /// Fails with [`QueryError::EmptyCollection`] on an empty sequence.
    fn average_by<N, F>(&self, selector: F) -> Result<f64>
    where
        N: Into<Number>,
        F: Fn(&T) -> N,
    {
        mean(self.sum_by(selector), self.count())
    }

    /// Folds the sequence into a single value, starting from `seed`.
    fn aggregate<A, F>(&self, seed: A, accumulator: F) -> A
    where
        F: Fn(A, &T) -> A,
    {
        self.as_slice().iter().fold(seed, accumulator)
    }

    /// Folds the sequence, then converts the accumulated value.
    fn aggregate_with<A, R, F, S>(&self, seed: A, accumulator: F, result_selector: S) -> R
    where
        F: Fn(A, &T) -> A,
        S: FnOnce(A) -> R,
    {
        result_selector(self.aggregate(seed, accumulator))
    }

    /// Runs `action` on every element in order.
    fn for_each<A>(&self, action: A)
    where
        A: FnMut(&T),
    {
        self.as_slice().iter().for_each(action)
    }

    // ========================================================================
    // Slicing
    // ========================================================================

    /// Skips the first `amount` elements.
    ///
    /// Fails with [`QueryError::InvalidArgument`] if `amount > count()`.
    fn skip(&self, amount: usize) -> Result<Query<T>>
    where
        T: Clone,
    {
        let items = self.as_slice();
        check_amount(amount, items.len())?;
        Ok(Query::new(items[amount..].to_vec()))
    }

    /// Skips the last `amount` elements.
    fn skip_last(&self, amount: usize) -> Result<Query<T>>
    where
        T: Clone,
    {
        let items = self.as_slice();
        check_amount(amount, items.len())?;
        Ok(Query::new(items[..items.len() - amount].to_vec()))
    }

    /// Takes the first `amount` elements.
    fn take(&self, amount: usize) -> Result<Query<T>>
    where
        T: Clone,
    {
        let items = self.as_slice();
        check_amount(amount, items.len())?;
        Ok(Query::new(items[..amount].to_vec()))
    }

    /// Takes the last `amount` elements.
    fn take_last(&self, amount: usize) -> Result<Query<T>>
    where
        T: Clone,
    {
        let items = self.as_slice();
        check_amount(amount, items.len())?;
        Ok(Query::new(items[items.len() - amount..].to_vec()))
    }

    // ========================================================================
    // Projection
    // ========================================================================

    /// Copies the elements satisfying the condition into a new builder.
    ///
    /// Unlike [`Query::filter`] this leaves the source untouched, so it also
    /// works on an ordered builder.
    fn filtered<P>(&self, condition: P) -> Query<T>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        self.as_slice()
            .iter()
            .filter(|item| condition(item))
            .cloned()
            .collect()
    }

    /// Projects every element through `converter`.
    fn select<R, F>(&self, converter: F) -> Query<R>
    where
        F: Fn(&T) -> R,
    {
        self.as_slice().iter().map(converter).collect()
    }

    /// Copies the sequence into a new unordered builder.
    ///
    /// On an ordered builder this forces the pending sort without ending
    /// the query.
    fn select_all(&self) -> Query<T>
    where
        T: Clone,
    {
        Query::new(self.as_slice().to_vec())
    }

    /// Projects every element and keeps the first occurrence of each value.
    fn select_distinct<R, F>(&self, converter: F) -> Query<R>
    where
        R: Eq + Hash + Clone,
        F: Fn(&T) -> R,
    {
        let mut seen = HashSet::new();
        self.as_slice()
            .iter()
            .map(converter)
            .filter(|value| seen.insert(value.clone()))
            .collect()
    }

    /// Keeps the first occurrence of each distinct element.
    fn select_distinct_all(&self) -> Query<T>
    where
        T: Eq + Hash + Clone,
    {
        self.select_distinct(T::clone)
    }

    /// Flattens a per-element sub-collection.
    fn select_many<U, I, F>(&self, collection_selector: F) -> Query<U>
    where
        I: IntoIterator<Item = U>,
        F: Fn(&T) -> I,
    {
        self.as_slice().iter().flat_map(collection_selector).collect()
    }

    /// Flattens a per-element sub-collection, pairing every sub-element with
    /// its source element through `combiner`.
    fn select_many_with<U, I, R, F, C>(&self, collection_selector: F, combiner: C) -> Query<R>
    where
        I: IntoIterator<Item = U>,
        F: Fn(&T) -> I,
        C: Fn(&T, U) -> R,
    {
        let mut results = Vec::new();
        for item in self.as_slice() {
            for sub in collection_selector(item) {
                results.push(combiner(item, sub));
            }
        }
        Query::new(results)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Copies the sequence into a `Vec`.
    fn to_list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Copies the sequence into a `HashSet`.
    fn to_set(&self) -> HashSet<T>
    where
        T: Eq + Hash + Clone,
    {
        self.as_slice().iter().cloned().collect()
    }

    /// Copies the sequence into a boxed slice.
    fn to_array(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.as_slice().into()
    }

    /// Builds a map from a key and a value projection.
    ///
    /// Duplicate keys are not an error: the last element with a given key
    /// wins.
    fn to_map<K, V, FK, FV>(&self, key_selector: FK, value_selector: FV) -> HashMap<K, V>
    where
        K: Eq + Hash,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> V,
    {
        self.as_slice()
            .iter()
            .map(|item| (key_selector(item), value_selector(item)))
            .collect()
    }

    // ========================================================================
    // Sub-builders
    // ========================================================================

    /// Starts a join of this sequence with `other`.
    ///
    /// Until [`Join::on`] is called every pair matches.
    fn join<U, I>(&self, other: I) -> Join<T, U>
    where
        T: Clone,
        I: IntoIterator<Item = U>,
    {
        Join::new(self.to_list(), other.into_iter().collect())
    }

    /// Starts a conditional batch over the elements satisfying `condition`.
    fn when<P>(&self, condition: P) -> When<T, P>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        When::new(self.to_list(), condition)
    }
}

fn absent_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_absent() => Ok(None),
        Err(err) => Err(err),
    }
}

impl<T> Queryable<T> for [T] {
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T> Queryable<T> for Vec<T> {
    fn as_slice(&self) -> &[T] {
        self
    }
}
