//! Linq - Fluent, composable queries over in-memory collections.
//!
//! Linq wraps a collection in a builder and lets you chain filtering,
//! projection, ordering, joining and aggregation, materializing the result
//! when you ask for it. It supports:
//!
//! - In-place filtering and concatenation on the unordered [`Query`]
//! - Multi-key stable ordering with mixed directions ([`OrderedQuery`])
//! - Element access, extremes, counts, sums and averages ([`Queryable`])
//! - Nested-loop joins ([`Join`]) and conditional batches ([`When`])
//!
//! # Quick Start
//!
//! ```rust
//! use standout_linq::{Query, Queryable};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     name: &'static str,
//!     age: u32,
//! }
//!
//! let people = vec![
//!     Person { name: "Sandor", age: 48 },
//!     Person { name: "Maca", age: 56 },
//!     Person { name: "Papp", age: 57 },
//!     Person { name: "Tamas", age: 22 },
//! ];
//!
//! let query = Query::new(people);
//!
//! assert_eq!(query.min_by_key(|p| p.age).unwrap().name, "Tamas");
//! assert_eq!(query.max_by_key(|p| p.age).unwrap().name, "Papp");
//!
//! let over_fifty = query
//!     .order_by_descending(|p| p.age)
//!     .select(|p| p.name)
//!     .take(2)
//!     .unwrap()
//!     .to_list();
//! assert_eq!(over_fifty, vec!["Papp", "Maca"]);
//! ```
//!
//! # Evaluation Model
//!
//! Every builder owns a private copy of its sequence. Operations either
//! rewrite that copy in place and hand the builder back (`filter`,
//! `concat`), or produce a new builder and leave the original untouched
//! (`select`, `skip`, `take`, `join`, ...).
//!
//! Ordering is the one deferred step:
//!
//! ```text
//! Query --order_by--> OrderedQuery --then_by*--> OrderedQuery --(first read)--> sorted
//! ```
//!
//! The pending keys are applied as a chain of stable insertion sorts, least
//! significant key first, the first time anything reads the sequence.
//!
//! # Errors
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | `EmptyCollection` | `first`, `last`, `single`, extremes, `average` on no elements |
//! | `NoMatch` | `first_where`, `last_where`, `single_where` with no match |
//! | `TooManyElements` | `single`, `single_where` (also the `_or_default` forms) |
//! | `NotComparable` | `min`, `max`, `*_by_key` over keys without an order (NaN) |
//! | `NotNumeric` | `sum`, `average` over elements without a numeric value |
//! | `InvalidArgument` | `skip`, `skip_last`, `take`, `take_last` past the end |

mod aggregate;
mod error;
mod join;
mod number;
mod ordered;
mod ordering;
mod query;
mod queryable;
mod when;

// Re-export public API
pub use error::{QueryError, Result};
pub use join::{Join, MatchAll};
pub use number::{Number, Numeric};
pub use ordered::OrderedQuery;
pub use ordering::{insertion_sort, ComparatorOrder, Dir, KeyOrder, NaturalOrder};
pub use query::Query;
pub use queryable::Queryable;
pub use when::When;
