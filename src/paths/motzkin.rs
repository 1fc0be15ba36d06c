use serde::{Deserialize, Serialize};

use super::{Alphabet, Lattice, PathState, Step};
use crate::{
    count::motzkin,
    cursor::Iter,
    enumeration::Enumeration,
    error::{RangeError, check_rank},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
///Paths of `n` steps over [`Step::Up`], [`Step::Flat`] and [`Step::Down`], in lexicographic
///order.
///
///```
///# use combinatoria::{Enumeration, MotzkinPaths, paths::format_path};
///let family = MotzkinPaths::new(3)?;
///let words: Vec<_> = family.iter().map(|path| format_path(&path)).collect();
///assert_eq!(words, ["(-)", "()-", "-()", "---"]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct MotzkinPaths {
    n: usize,
    lattice: Lattice,
}

impl MotzkinPaths {
    ///Paths of `n` steps.
    ///
    ///# Errors
    ///Returns [`RangeError::CountOverflow`] if the `n`-th Motzkin number does not fit in a `u64`.
    pub fn new(n: usize) -> Result<Self, RangeError> {
        motzkin(n as u64)
            .ok_or(RangeError::CountOverflow)
            .inspect_err(|_| tracing::debug!(n, "Motzkin path count overflows"))?;
        Ok(MotzkinPaths {
            n,
            lattice: Lattice::new(Alphabet::Motzkin, n)?,
        })
    }

    ///Number of steps.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }
}

impl TryFrom<usize> for MotzkinPaths {
    type Error = RangeError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        MotzkinPaths::new(n)
    }
}

impl From<MotzkinPaths> for usize {
    fn from(value: MotzkinPaths) -> Self {
        value.n
    }
}

impl Enumeration for MotzkinPaths {
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

impl<'a> IntoIterator for &'a MotzkinPaths {
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
    fn motzkin_counts() -> anyhow::Result<()> {
        for n in 0..12 {
            let family = MotzkinPaths::new(n)?;
            assert_eq!(Some(family.len()), motzkin(n as u64));
            assert_eq!(family.iter().count() as u64, family.len());
        }
        assert!(MotzkinPaths::new(45).is_ok());
        assert_eq!(MotzkinPaths::new(46), Err(RangeError::CountOverflow));
        Ok(())
    }

    #[test]
    fn extremes() -> anyhow::Result<()> {
        assert_eq!(
            format_path(MotzkinPaths::new(5)?.first().as_slice()),
            "((-))"
        );
        assert_eq!(format_path(MotzkinPaths::new(4)?.first().as_slice()), "(())");
        assert_eq!(format_path(MotzkinPaths::new(4)?.last().as_slice()), "----");
        Ok(())
    }

    #[test]
    fn ranks_and_order() -> anyhow::Result<()> {
        let family = MotzkinPaths::new(8)?;
        let all: Vec<_> = family.iter().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        for (position, path) in all.iter().enumerate() {
            assert_eq!(family.rank(path)?, position as u64);
            assert_eq!(&family.nth(position as u64)?, path);
        }
        assert_eq!(
            family.rank(&parse_path("-)(-----")?),
            Err(RangeError::NotAMember)
        );
        Ok(())
    }

    #[test]
    fn walks_backwards() -> anyhow::Result<()> {
        let family = MotzkinPaths::new(7)?;
        let mut backwards: Vec<_> = family.iter().rev().collect();
        backwards.reverse();
        assert_eq!(backwards, family.iter().collect::<Vec<_>>());
        Ok(())
    }
}
