use serde::{Deserialize, Serialize};

use super::{Alphabet, Lattice, PathState, Step};
use crate::{
    count::catalan,
    cursor::Iter,
    enumeration::Enumeration,
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
///Balanced bracket words with `n` pairs, as paths of `2n` steps over [`Step::Up`] and
///[`Step::Down`], in lexicographic order.
///
///```
///# use combinatoria::{DyckPaths, Enumeration, paths::format_path};
///let family = DyckPaths::new(3)?;
///let words: Vec<_> = family.iter().map(|path| format_path(&path)).collect();
///assert_eq!(words, ["((()))", "(()())", "(())()", "()(())", "()()()"]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct DyckPaths {
    n: usize,
    lattice: Lattice,
}

impl DyckPaths {
    ///Paths with `n` up steps.
    ///
    ///# Errors
    ///Returns [`RangeError::CountOverflow`] if the `n`-th Catalan number does not fit in a `u64`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        catalan(n as u64)
            .ok_or(RangeError::CountOverflow)
            .inspect_err(|_| tracing::debug!(n, "Dyck path count overflows"))?;
        Ok(DyckPaths {
            n,
            lattice: Lattice::new(Alphabet::Dyck, 2 * n)?,
        })
    }

    ///Number of up steps, and of down steps.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }
}

impl TryFrom<usize> for DyckPaths {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        DyckPaths::new(n)
    }
}

impl From<DyckPaths> for usize {
    fn from(value: DyckPaths) -> Self {
        value.n
    }
}

impl Enumeration for DyckPaths {
    type Item = Step;
    type State = PathState;

    fn len(&self) -> u64 {
        self.lattice.len()
    }

    fn first(&self) -> Self::State {
        self.lattice.first()
    }

    fn last(&self) -> Self::State {
        self.lattice.last()
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len())?;
        Ok(self.lattice.unrank(rank))
    }

    fn rank(&self, object: &[Step]) -> Result<u64, RangeError> {
        self.lattice.rank(object)
    }
}

impl<'a> IntoIterator for &'a DyckPaths {
    type Item = Vec<Step>;
    type IntoIter = Iter<PathState>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        enumeration::Transition,
        paths::{format_path, parse_path},
    };

    #[test]
    fn catalan_counts() -> anyhow::Result<()> {
        for n in 0..10 {
            let family = DyckPaths::new(n)?;
            assert_eq!(Some(family.len()), catalan(n as u64));
            assert_eq!(family.iter().count() as u64, family.len());
        }
        assert!(DyckPaths::new(36).is_ok());
        assert_eq!(DyckPaths::new(37), Err(RangeError::CountOverflow));
        Ok(())
    }

    #[test]
    fn extremes() -> anyhow::Result<()> {
        let family = DyckPaths::new(4)?;
        assert_eq!(format_path(family.first().as_slice()), "(((())))");
        assert_eq!(format_path(family.last().as_slice()), "()()()()");
        let empty = DyckPaths::new(0)?;
        assert_eq!(empty.iter().collect::<Vec<_>>(), [Vec::<Step>::new()]);
        Ok(())
    }

    #[test]
    fn every_path_is_balanced() -> anyhow::Result<()> {
        let family = DyckPaths::new(6)?;
        let all: Vec<_> = family.iter().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        for path in &all {
            assert_eq!(path.len(), 12);
            let mut height = 0isize;
            for step in path {
                height += step.rise();
                assert!(height >= 0);
            }
            assert_eq!(height, 0);
        }
        Ok(())
    }

    #[test]
    fn ranks() -> anyhow::Result<()> {
        let family = DyckPaths::new(7)?;
        for (position, path) in family.iter().enumerate() {
            assert_eq!(family.rank(&path)?, position as u64);
            assert_eq!(family.nth(position as u64)?, path);
        }
        let small = DyckPaths::new(3)?;
        assert_eq!(small.rank(&parse_path("(())()")?)?, 2);
        assert_eq!(
            small.rank(&parse_path("())(()")?),
            Err(RangeError::NotAMember)
        );
        assert_eq!(
            small.rank(&parse_path("((-)))")?),
            Err(RangeError::NotAMember)
        );
        assert_eq!(
            small.rank(&parse_path("((((((")?),
            Err(RangeError::NotAMember)
        );
        Ok(())
    }
}
