//! Conditional-batch builder.

use tracing::trace;

use crate::aggregate::sum_projected;
use crate::number::Number;
use crate::query::Query;

/// Operations applied only to the elements satisfying a condition.
///
/// Created by [`Queryable::when`](crate::Queryable::when) over a copy of the
/// builder's sequence, so nothing done here reaches the original builder.
///
/// # Example
///
/// ```
/// use standout_linq::{Query, Queryable};
///
/// let scores = Query::new(vec![40, 75, 90, 55]);
///
/// assert_eq!(scores.when(|s| *s >= 60).then_count(), 2);
///
/// let curved = scores.when(|s| *s < 60).then(|s| *s += 10).to_list();
/// assert_eq!(curved, vec![50, 75, 90, 65]);
/// assert_eq!(scores.to_list(), vec![40, 75, 90, 55]);
/// ```
#[derive(Debug, Clone)]
pub struct When<T, P> {
    items: Vec<T>,
    predicate: P,
}

impl<T, P> When<T, P>
where
    P: Fn(&T) -> bool,
{
    pub(crate) fn new(items: Vec<T>, predicate: P) -> Self {
        When { items, predicate }
    }

    /// Runs `action` on every matching element and returns a builder over
    /// the whole sequence, matching or not.
    pub fn then<A>(mut self, mut action: A) -> Query<T>
    where
        A: FnMut(&mut T),
    {
        let mut touched = 0usize;
        for item in self.items.iter_mut() {
            if (self.predicate)(item) {
                action(item);
                touched += 1;
            }
        }
        trace!(touched, total = self.items.len(), "conditional action applied");
        Query::from(self.items)
    }

    /// Returns a builder over the matching elements only.
    pub fn then_filter(self) -> Query<T> {
        let predicate = self.predicate;
        self.items.into_iter().filter(|item| predicate(item)).collect()
    }

    /// Counts the matching elements.
    pub fn then_count(&self) -> usize {
        self.matching().count()
    }

    /// Sums a numeric projection of the matching elements.
    pub fn then_sum<N, F>(&self, selector: F) -> f64
    where
        N: Into<Number>,
        F: Fn(&T) -> N,
    {
        sum_projected(self.matching(), selector)
    }

    fn matching(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter().filter(|item| (self.predicate)(item))
    }
}

#[cfg(test)]
mod tests {
    use crate::query::Query;
    use crate::queryable::Queryable;

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        owner: &'static str,
        balance: i64,
        flagged: bool,
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                owner: "ada",
                balance: 120,
                flagged: false,
            },
            Account {
                owner: "bob",
                balance: -30,
                flagged: false,
            },
            Account {
                owner: "cy",
                balance: -5,
                flagged: false,
            },
        ]
    }

    #[test]
    fn then_mutates_only_matching_elements() {
        let query = Query::new(accounts());
        let updated = query
            .when(|a| a.balance < 0)
            .then(|a| a.flagged = true);

        let flags: Vec<_> = updated.iter().map(|a| (a.owner, a.flagged)).collect();
        assert_eq!(flags, vec![("ada", false), ("bob", true), ("cy", true)]);

        // the source builder keeps its own snapshot
        assert!(query.none(|a| a.flagged));
    }

    #[test]
    fn then_filter_keeps_matches() {
        let overdrawn = Query::new(accounts())
            .when(|a| a.balance < 0)
            .then_filter()
            .select(|a| a.owner)
            .to_list();
        assert_eq!(overdrawn, vec!["bob", "cy"]);
    }

    #[test]
    fn then_count_and_sum() {
        let query = Query::new(accounts());
        let negative = query.when(|a| a.balance < 0);
        assert_eq!(negative.then_count(), 2);
        assert_eq!(negative.then_sum(|a| a.balance), -35.0);

        assert_eq!(query.when(|a| a.balance > 1000).then_count(), 0);
        assert_eq!(query.when(|a| a.balance > 1000).then_sum(|a| a.balance), 0.0);
    }
}
