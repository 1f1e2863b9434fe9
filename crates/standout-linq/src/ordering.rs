//! Key orderings and the stable insertion sort that applies them.
//!
//! A [`KeyOrder`] is a single sort criterion: a projection, a direction,
//! and a way to compare projections. Two strategies are provided:
//!
//! - [`NaturalOrder`] compares keys through their [`Ord`] implementation.
//! - [`ComparatorOrder`] compares keys with a caller-supplied comparator.
//!
//! [`insertion_sort`] applies one key ordering to a sequence. Multi-key
//! ordering is a chain of these passes, run from the least significant key
//! to the primary key; because every pass is stable, the last (primary)
//! pass dominates while ties keep the order set by the earlier passes.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Which way a key sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    /// Smallest key first.
    Asc,
    /// Largest key first.
    Desc,
}

impl Dir {
    /// Orients a key comparison: unchanged for `Asc`, reversed for `Desc`.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }
}

/// A single sort criterion over elements of type `T`.
pub trait KeyOrder<T> {
    /// Compares the keys of two elements, ignoring direction.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// The direction this key sorts in.
    fn dir(&self) -> Dir;

    /// Returns `true` if `placed` must come after `element` under this key.
    ///
    /// Equal keys never displace each other, which is what keeps
    /// [`insertion_sort`] stable.
    fn displaces(&self, placed: &T, element: &T) -> bool {
        self.dir().apply(self.compare(placed, element)) == Ordering::Greater
    }
}

/// Orders by a key's natural [`Ord`] ordering.
pub struct NaturalOrder<F, K> {
    selector: F,
    dir: Dir,
    key: PhantomData<fn() -> K>,
}

impl<F, K> NaturalOrder<F, K> {
    /// Creates a natural ordering over the key produced by `selector`.
    pub fn new(selector: F, dir: Dir) -> Self {
        NaturalOrder {
            selector,
            dir,
            key: PhantomData,
        }
    }
}

impl<T, F, K> KeyOrder<T> for NaturalOrder<F, K>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.selector)(a).cmp(&(self.selector)(b))
    }

    fn dir(&self) -> Dir {
        self.dir
    }
}

impl<F, K> fmt::Debug for NaturalOrder<F, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaturalOrder")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

/// Orders by a key using a caller-supplied comparator.
pub struct ComparatorOrder<F, C, K> {
    selector: F,
    comparator: C,
    dir: Dir,
    key: PhantomData<fn() -> K>,
}

impl<F, C, K> ComparatorOrder<F, C, K> {
    /// Creates an ordering that compares `selector` keys with `comparator`.
    pub fn new(selector: F, comparator: C, dir: Dir) -> Self {
        ComparatorOrder {
            selector,
            comparator,
            dir,
            key: PhantomData,
        }
    }
}

impl<T, F, C, K> KeyOrder<T> for ComparatorOrder<F, C, K>
where
    F: Fn(&T) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.comparator)(&(self.selector)(a), &(self.selector)(b))
    }

    fn dir(&self) -> Dir {
        self.dir
    }
}

impl<F, C, K> fmt::Debug for ComparatorOrder<F, C, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComparatorOrder")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

/// Stable insertion sort of `items` by a single key ordering.
///
/// Each element, taken in input order, is inserted before the first placed
/// element it strictly precedes, or appended. Elements with equal keys keep
/// their relative input order. O(n²) comparisons.
pub fn insertion_sort<T, O>(items: Vec<T>, order: &O) -> Vec<T>
where
    O: KeyOrder<T> + ?Sized,
{
    let mut sorted: Vec<T> = Vec::with_capacity(items.len());
    for element in items {
        match sorted
            .iter()
            .position(|placed| order.displaces(placed, &element))
        {
            Some(index) => sorted.insert(index, element),
            None => sorted.push(element),
        }
    }
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_apply() {
        assert_eq!(Dir::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Dir::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(Dir::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Dir::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn natural_order_compares_keys() {
        let by_len: NaturalOrder<_, usize> = NaturalOrder::new(|s: &&str| s.len(), Dir::Asc);
        assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
        assert_eq!(by_len.compare(&"ab", &"cd"), Ordering::Equal);
        assert!(by_len.displaces(&"abc", &"ab"));
        assert!(!by_len.displaces(&"ab", &"cd"));
    }

    #[test]
    fn comparator_order_uses_comparator() {
        let by_value: ComparatorOrder<_, _, f64> =
            ComparatorOrder::new(|x: &f64| *x, |a: &f64, b: &f64| a.total_cmp(b), Dir::Desc);
        assert_eq!(by_value.compare(&1.0, &2.0), Ordering::Less);
        assert!(by_value.displaces(&1.0, &2.0));
    }

    #[test]
    fn insertion_sort_ascending() {
        let order = NaturalOrder::new(|x: &i32| *x, Dir::Asc);
        assert_eq!(insertion_sort(vec![3, 1, 2, 5, 4], &order), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn insertion_sort_descending() {
        let order = NaturalOrder::new(|x: &i32| *x, Dir::Desc);
        assert_eq!(insertion_sort(vec![3, 1, 2, 5, 4], &order), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn insertion_sort_is_stable() {
        let items = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd'), (2, 'e')];

        let asc = NaturalOrder::new(|p: &(i32, char)| p.0, Dir::Asc);
        assert_eq!(
            insertion_sort(items.clone(), &asc),
            vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c'), (2, 'e')]
        );

        let desc = NaturalOrder::new(|p: &(i32, char)| p.0, Dir::Desc);
        assert_eq!(
            insertion_sort(items, &desc),
            vec![(2, 'a'), (2, 'c'), (2, 'e'), (1, 'b'), (1, 'd')]
        );
    }

    #[test]
    fn chained_passes_sort_by_primary_then_secondary() {
        let items = vec![("b", 2), ("a", 2), ("b", 1), ("a", 1)];
        let secondary = NaturalOrder::new(|p: &(&'static str, i32)| p.1, Dir::Asc);
        let primary = NaturalOrder::new(|p: &(&'static str, i32)| p.0, Dir::Asc);

        let sorted = insertion_sort(insertion_sort(items, &secondary), &primary);
        assert_eq!(sorted, vec![("a", 1), ("a", 2), ("b", 1), ("b", 2)]);
    }

    #[test]
    fn insertion_sort_through_trait_object() {
        let order: Box<dyn KeyOrder<i32>> =
            Box::new(NaturalOrder::<_, i32>::new(|x: &i32| -x, Dir::Asc));
        assert_eq!(insertion_sort(vec![1, 3, 2], order.as_ref()), vec![3, 2, 1]);
    }

    #[test]
    fn insertion_sort_empty() {
        let order = NaturalOrder::new(|x: &i32| *x, Dir::Asc);
        assert!(insertion_sort(Vec::new(), &order).is_empty());
    }
}
