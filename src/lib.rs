//! Enumeration of combinatorial families.
//!
//!Each family is a small value holding its size parameters (and, for some, a table of counts).
//!It implements [`Enumeration`], which gives the number of objects, the first and last objects
//!of a fixed total order, ranking and unranking, bidirectional [`Cursor`]s and a std
//![`Iterator`]. Objects are produced one at a time by rewriting a single buffer in place, so the
//!whole family is never materialised.
//!
//!| family | object | order | count |
//!|---|---|---|---|
//!| [`Combinations`] | strictly increasing `k`-tuple over `0..n` | lexicographic | `C(n, k)` |
//!| [`Permutations`] | arrangement of `0..n` | lexicographic | `n!` |
//!| [`Multisets`] | non-decreasing `k`-tuple over `0..n` | lexicographic | `C(n+k-1, k)` |
//!| [`Subsets`] | membership vector of length `n` | binary counting | `2^n` |
//!| [`Partitions`] | non-increasing positive parts summing to `n` | reverse lexicographic | `p(n)` |
//!| [`SetPartitions`] | restricted growth string of length `n` | lexicographic | `Bell(n)` |
//!| [`SubMultisets`] | `s` with `s[i] <= m[i]` | mixed radix | `prod(m[i] + 1)` |
//!| [`DyckPaths`] | `2n` steps, up or down | lexicographic | `Catalan(n)` |
//!| [`MotzkinPaths`] | `n` steps, up, flat or down | lexicographic | `Motzkin(n)` |
//!
//!```
//!use combinatoria::{Combinations, Enumeration};
//!
//!let family = Combinations::<u8>::new(5, 3)?;
//!assert_eq!(family.len(), 10);
//!
//!let mut cursor = family.begin();
//!cursor.advance_by(4)?;
//!assert_eq!(cursor.current()?, &[0, 2, 4]);
//!assert_eq!(family.rank(&[0, 2, 4])?, 4);
//!
//!for combination in &family {
//!    assert_eq!(combination.len(), 3);
//!}
//!# Ok::<(), anyhow::Error>(())
//!```
//!
//!Integer families are generic over their [`Element`] type, `u32` by default. Constructors
//!reject parameters whose objects would not fit in it, or whose count would not fit in a `u64`.
//!
//!With the default `sampling` feature, every family can draw uniformly random objects through
//![`Enumeration::random`].

mod combinations;
pub mod count;
mod cursor;
mod element;
mod enumeration;
mod error;
mod multisets;
mod partitions;
pub mod paths;
mod permutations;
mod set_partitions;
mod submultisets;
mod subsets;

pub use combinations::{CombinationState, Combinations};
pub use cursor::{Cursor, Direction, Iter};
pub use element::Element;
pub use enumeration::{Enumeration, Transition};
pub use error::{CursorError, RangeError};
pub use multisets::{MultisetState, Multisets};
pub use partitions::{PartitionState, Partitions};
pub use paths::{DyckPaths, MotzkinPaths, PathParseError, PathState, Step, parse_path};
pub use permutations::{PermutationState, Permutations};
pub use set_partitions::{SetPartitionState, SetPartitions};
pub use submultisets::{SubMultisetState, SubMultisets};
pub use subsets::{SubsetState, Subsets};
