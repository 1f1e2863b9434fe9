//! Extremum search and numeric folding shared by the query surface.

use std::cmp::Ordering;

use crate::error::{QueryError, Result};
use crate::number::{Number, Numeric};

/// Finds the element whose comparison against the current extreme yields
/// `wanted` (`Less` for a minimum, `Greater` for a maximum).
///
/// The first element seeds the search; a candidate replaces the extreme
/// only when strictly better, so ties keep the earliest element.
/// `compare(candidate, current)` returning `None` aborts with
/// [`QueryError::NotComparable`].
pub(crate) fn extremum<T, C>(items: &[T], wanted: Ordering, mut compare: C) -> Result<&T>
where
    C: FnMut(&T, &T) -> Option<Ordering>,
{
    let mut elements = items.iter().enumerate();
    let (mut best_index, mut best) = elements.next().ok_or(QueryError::EmptyCollection)?;

    for (index, candidate) in elements {
        match compare(candidate, best) {
            Some(ordering) if ordering == wanted => {
                best_index = index;
                best = candidate;
            }
            Some(_) => {}
            None => {
                return Err(QueryError::NotComparable {
                    left: best_index,
                    right: index,
                })
            }
        }
    }

    Ok(best)
}

/// Rejects slice amounts larger than the sequence.
pub(crate) fn check_amount(amount: usize, len: usize) -> Result<()> {
    if amount > len {
        return Err(QueryError::InvalidArgument { amount, len });
    }
    Ok(())
}

/// Sums elements that carry their own numeric value.
pub(crate) fn sum_numeric<T: Numeric>(items: &[T]) -> Result<f64> {
    items.iter().enumerate().try_fold(0.0, |total, (index, item)| {
        let number = item
            .to_number()
            .ok_or(QueryError::NotNumeric { index })?;
        Ok(total + number.to_f64())
    })
}

/// Sums the numeric projection of every element.
pub(crate) fn sum_projected<'s, T, N, F>(items: impl IntoIterator<Item = &'s T>, selector: F) -> f64
where
    T: 's,
    N: Into<Number>,
    F: Fn(&T) -> N,
{
    items
        .into_iter()
        .map(|item| selector(item).into().to_f64())
        .sum()
}

/// Divides a sum by an element count, refusing empty input.
pub(crate) fn mean(total: f64, count: usize) -> Result<f64> {
    if count == 0 {
        return Err(QueryError::EmptyCollection);
    }
    Ok(total / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extremum_keeps_earliest_tie() {
        let items = [(1, 'a'), (0, 'b'), (0, 'c'), (1, 'd')];
        let min = extremum(&items, Ordering::Less, |a, b| a.0.partial_cmp(&b.0)).unwrap();
        assert_eq!(*min, (0, 'b'));

        let max = extremum(&items, Ordering::Greater, |a, b| a.0.partial_cmp(&b.0)).unwrap();
        assert_eq!(*max, (1, 'a'));
    }

    #[test]
    fn extremum_empty() {
        let items: [i32; 0] = [];
        let err = extremum(&items, Ordering::Less, |a, b| a.partial_cmp(b)).unwrap_err();
        assert!(matches!(err, QueryError::EmptyCollection));
    }

    #[test]
    fn extremum_incomparable() {
        let items = [1.0, 2.0, f64::NAN];
        let err = extremum(&items, Ordering::Greater, |a, b| a.partial_cmp(b)).unwrap_err();
        assert!(matches!(err, QueryError::NotComparable { left: 1, right: 2 }));
    }

    #[test]
    fn amount_bounds() {
        assert!(check_amount(0, 0).is_ok());
        assert!(check_amount(3, 3).is_ok());
        assert!(matches!(
            check_amount(4, 3),
            Err(QueryError::InvalidArgument { amount: 4, len: 3 })
        ));
    }

    #[test]
    fn numeric_sums() {
        assert_eq!(sum_numeric(&[1, 2, 3]).unwrap(), 6.0);
        assert_eq!(sum_numeric::<u8>(&[]).unwrap(), 0.0);
        assert!(matches!(
            sum_numeric(&[Some(1), None]),
            Err(QueryError::NotNumeric { index: 1 })
        ));
        assert_eq!(sum_projected(&[(1, 2.5), (2, 0.5)], |p: &(i32, f64)| p.1), 3.0);
    }

    #[test]
    fn mean_of_empty_fails() {
        assert!(matches!(mean(0.0, 0), Err(QueryError::EmptyCollection)));
        assert_eq!(mean(9.0, 3).unwrap(), 3.0);
    }
}
