//! Nested-loop join builder.

use tracing::debug;

use crate::query::Query;

/// The predicate a join starts with: every pair matches.
pub type MatchAll<L, R> = fn(&L, &R) -> bool;

fn match_all<L, R>(_: &L, _: &R) -> bool {
    true
}

/// A pending join between two owned snapshots.
///
/// Created by [`Queryable::join`](crate::Queryable::join). The predicate is
/// set with [`on`](Join::on) and the join runs when [`into`](Join::into)
/// supplies a combiner.
///
/// The join is an unindexed nested loop: O(left × right) predicate calls,
/// emitting results in left-major, right-minor order.
///
/// # Example
///
/// ```
/// use standout_linq::{Query, Queryable};
///
/// let people = vec!["Sandor", "Tamas"];
/// let cars = vec![("Sandor", "SQL-123"), ("Tamas", "FOS-999"), ("Tamas", "PRO-000")];
///
/// let plates = Query::new(people)
///     .join(cars)
///     .on(|person, car| *person == car.0)
///     .into(|person, car| format!("{person}: {}", car.1))
///     .to_list();
///
/// assert_eq!(plates, vec!["Sandor: SQL-123", "Tamas: FOS-999", "Tamas: PRO-000"]);
/// ```
#[derive(Debug, Clone)]
pub struct Join<L, R, P = MatchAll<L, R>> {
    left: Vec<L>,
    right: Vec<R>,
    predicate: P,
}

impl<L, R> Join<L, R> {
    pub(crate) fn new(left: Vec<L>, right: Vec<R>) -> Self {
        Join {
            left,
            right,
            predicate: match_all,
        }
    }
}

impl<L, R, P> Join<L, R, P> {
    /// Replaces the join predicate.
    pub fn on<Q>(self, predicate: Q) -> Join<L, R, Q>
    where
        Q: Fn(&L, &R) -> bool,
    {
        Join {
            left: self.left,
            right: self.right,
            predicate,
        }
    }
}

impl<L, R, P> Join<L, R, P>
where
    P: Fn(&L, &R) -> bool,
{
    /// Runs the join, combining every matching pair.
    pub fn into<O, C>(self, combiner: C) -> Query<O>
    where
        C: Fn(&L, &R) -> O,
    {
        let mut joined = Vec::new();
        for left in &self.left {
            for right in &self.right {
                if (self.predicate)(left, right) {
                    joined.push(combiner(left, right));
                }
            }
        }

        debug!(
            left = self.left.len(),
            right = self.right.len(),
            emitted = joined.len(),
            "join evaluated"
        );
        Query::new(joined)
    }
}
