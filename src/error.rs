//! Errors reported by constructors, unranking and cursors.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
///Invalid size parameters, an out-of-range rank or a foreign object.
pub enum RangeError {
    ///Asked for subsets larger than the ground set.
    #[error("cannot choose {k} elements from a set of {n}")]
    KExceedsN {
        ///Size of the ground set.
        n: usize,
        ///Requested subset size.
        k: usize,
    },
    ///Asked for a number of parts (or blocks) outside `1..=n`, or for an empty range of them.
    #[error("cannot split {n} into between {fewest} and {most} parts")]
    PartCounts {
        ///The size being split.
        n: usize,
        ///Requested smallest number of parts.
        fewest: usize,
        ///Requested largest number of parts.
        most: usize,
    },
    ///Asked for a non-empty selection out of zero symbol classes.
    #[error("cannot draw {k} items from zero symbol classes")]
    NoSymbols {
        ///Requested selection size.
        k: usize,
    },
    ///The element type is too narrow for the values an object may hold.
    #[error("{value} does not fit in {type_name}")]
    ElementOverflow {
        ///Largest value an object of the family can contain.
        value: usize,
        ///Name of the element type.
        type_name: &'static str,
    },
    ///The number of objects does not fit in a `u64`.
    #[error("the number of objects overflows u64")]
    CountOverflow,
    ///Asked for a rank at or past the number of objects.
    #[error("rank {rank} is out of range for a family of {len} objects")]
    RankOutOfRange {
        ///The rejected rank.
        rank: u64,
        ///Number of objects in the family.
        len: u64,
    },
    ///The given sequence does not encode an object of the family.
    #[error("the sequence is not a member of this family")]
    NotAMember,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
///Misuse of a [`crate::Cursor`].
pub enum CursorError {
    ///Dereferenced or advanced a cursor sitting at its end sentinel.
    #[error("the cursor is past its last object")]
    PastEnd,
    ///Retreated a cursor sitting on its first object.
    #[error("the cursor is already on its first object")]
    BeforeBegin,
}

pub(crate) fn check_rank(rank: u64, len: u64) -> Result<(), RangeError> {
    if rank < len {
        Ok(())
    } else {
        tracing::debug!(rank, len, "rejected rank");
        Err(RangeError::RankOutOfRange { rank, len })
    }
}
