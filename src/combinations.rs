//! The `k`-element subsets of `{0, .., n-1}`, spelled as strictly increasing tuples.
use std::{convert::Infallible, marker::PhantomData, ops::ControlFlow};

use serde::{Deserialize, Serialize};

use crate::{
    count::binomial,
    cursor::{Cursor, Iter},
    element::{Element, cast, check_fits, index, uncast},
    enumeration::{Enumeration, Transition},
    error::{RangeError, check_rank},
};

///`C(n, k)` for arguments already known to be bounded by a family count.
pub(crate) fn choose(n: usize, k: usize) -> u64 {
    binomial(n as u64, k as u64).expect("bounded by the family count")
}

///The lexicographic rank of a strictly increasing `values` among the `values.len()`-subsets
///of `{0, .., n-1}`.
pub(crate) fn lex_rank(n: usize, values: &[usize]) -> u64 {
    let k = values.len();
    let mut rank = 0;
    // Slot i skips every combination that agrees on the prefix and holds a smaller value here,
    // which by the hockey stick identity is C(n-1-prev, k-i) - C(n-value, k-i).
    let mut below = n;
    for (i, &value) in values.iter().enumerate() {
        rank += choose(below, k - i) - choose(n - value, k - i);
        below = n - value - 1;
    }
    rank
}

///The inverse of [`lex_rank`].
///
///Each slot is settled by a binary search over `C(m, slots left)`, so the cost does not grow
///with the distance between consecutive values.
pub(crate) fn lex_unrank(n: usize, k: usize, mut rank: u64) -> Vec<usize> {
    let mut values = Vec::with_capacity(k);
    let mut start = 0;
    for slot in 0..k {
        let rest = k - slot;
        // C(n - start, rest) completions remain, and C(n - 1 - c, rest) of them begin after c.
        let target = choose(n - start, rest) - rank;
        let (mut low, mut high) = (rest - 1, n - 1 - start);
        while low < high {
            let middle = low + (high - low).div_ceil(2);
            if choose(middle, rest) < target {
                low = middle;
            } else {
                high = middle - 1;
            }
        }
        let value = n - 1 - low;
        rank -= choose(n - start, rest) - choose(low + 1, rest);
        values.push(value);
        start = value + 1;
    }
    values
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "(usize, usize)",
    into = "(usize, usize)",
    bound = "T: Element"
)]
///Every way of choosing `k` of the first `n` naturals, in lexicographic order.
///
///```
///# use combinatoria::{Combinations, Enumeration};
///let family = Combinations::<u8>::new(4, 2)?;
///let all: Vec<_> = family.iter().collect();
///assert_eq!(all, [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]]);
///# Ok::<(), anyhow::Error>(())
///```
pub struct Combinations<T = u32> {
    n: usize,
    k: usize,
    len: u64,
    element: PhantomData<T>,
}

impl<T: Element> Combinations<T> {
    ///Chooses `k` out of `n`.
    ///
    ///# Errors
    ///Returns [`RangeError::KExceedsN`] if `k > n`, [`RangeError::ElementOverflow`] if `T`
    ///cannot hold `n - 1` and [`RangeError::CountOverflow`] if `C(n, k)` does not fit in a
    ///`u64`.
    pub fn new(n: usize, k: usize) -> Result<Self, RangeError> {
        if k > n {
            tracing::debug!(n, k, "rejected combinations");
            return Err(RangeError::KExceedsN { n, k });
        }
        check_fits::<T>(n.saturating_sub(1))?;
        let len = binomial(n as u64, k as u64)
            .ok_or(RangeError::CountOverflow)
            .inspect_err(|_| tracing::debug!(n, k, "combination count overflows"))?;
        Ok(Combinations {
            n,
            k,
            len,
            element: PhantomData,
        })
    }

    ///Size of the ground set.
    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }

    ///Size of each combination.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    ///A cursor on the first combination every prefix of which satisfies `accept`.
    ///
    ///`accept` is called on non-empty prefixes of growing length, and a rejected prefix is never
    ///extended, so the search skips whole subtrees of the order. `None` if nothing is accepted.
    ///
    ///```
    ///# use combinatoria::{Combinations, Enumeration};
    ///let family = Combinations::<u32>::new(10, 3)?;
    ///let spread = |prefix: &[u32]| prefix.windows(2).all(|w| w[1] - w[0] >= 4);
    ///let cursor = family.find_if(spread).expect("0, 4, 8 is spread out");
    ///assert_eq!(cursor.current()?, &[0, 4, 8]);
    ///# Ok::<(), anyhow::Error>(())
    ///```
    pub fn find_if<P>(&self, accept: P) -> Option<Cursor<'_, Self>>
    where
        P: FnMut(&[T]) -> bool,
    {
        let ControlFlow::Break(first) =
            self.search(accept, |found| ControlFlow::Break(found.to_vec()))
        else {
            return None;
        };
        let rank = self.rank(&first).ok()?;
        self.cursor_at(rank).ok()
    }

    ///Every combination every prefix of which satisfies `accept`, in lexicographic order.
    ///See [`Combinations::find_if`].
    pub fn find_all<P>(&self, accept: P) -> Vec<Vec<T>>
    where
        P: FnMut(&[T]) -> bool,
    {
        let mut all = vec![];
        let ControlFlow::Continue(()) = self.search(accept, |found| {
            all.push(found.to_vec());
            ControlFlow::<Infallible>::Continue(())
        });
        all
    }

    ///Depth-first walk over accepted prefixes, handing every accepted combination to `found`
    ///until it breaks.
    fn search<P, F, B>(&self, mut accept: P, mut found: F) -> ControlFlow<B>
    where
        P: FnMut(&[T]) -> bool,
        F: FnMut(&[T]) -> ControlFlow<B>,
    {
        let (n, k) = (self.n, self.k);
        if k == 0 {
            return found(&[]);
        }
        let mut prefix: Vec<T> = Vec::with_capacity(k);
        let mut candidate = 0;
        loop {
            let slot = prefix.len();
            if candidate > n - k + slot {
                let Some(parent) = prefix.pop() else {
                    return ControlFlow::Continue(());
                };
                candidate = uncast(parent) + 1;
                continue;
            }
            prefix.push(cast(candidate));
            candidate += 1;
            if accept(&prefix) {
                if prefix.len() < k {
                    continue;
                }
                found(&prefix)?;
            }
            prefix.pop();
        }
    }

    fn state(&self, values: impl IntoIterator<Item = usize>) -> CombinationState<T> {
        CombinationState {
            data: values.into_iter().map(cast).collect(),
            n: self.n,
        }
    }
}

impl<T: Element> Enumeration for Combinations<T> {
    type Item = T;
    type State = CombinationState<T>;

    fn len(&self) -> u64 {
        self.len
    }

    fn first(&self) -> Self::State {
        self.state(0..self.k)
    }

    fn last(&self) -> Self::State {
        self.state(self.n - self.k..self.n)
    }

    fn unrank(&self, rank: u64) -> Result<Self::State, RangeError> {
        check_rank(rank, self.len)?;
        Ok(self.state(lex_unrank(self.n, self.k, rank)))
    }

    fn rank(&self, object: &[T]) -> Result<u64, RangeError> {
        if object.len() != self.k {
            return Err(RangeError::NotAMember);
        }
        let values = object
            .iter()
            .map(|&x| index(x).filter(|&x| x < self.n))
            .collect::<Option<Vec<_>>>()
            .ok_or(RangeError::NotAMember)?;
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(RangeError::NotAMember);
        }
        Ok(lex_rank(self.n, &values))
    }
}

impl<'a, T: Element> IntoIterator for &'a Combinations<T> {
    type Item = Vec<T>;
    type IntoIter = Iter<CombinationState<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CursorError;

    #[test]
    fn lexicographic_order() -> anyhow::Result<()> {
        let family = Combinations::<u8>::new(5, 3)?;
        let all: Vec<_> = family.iter().collect();
        assert_eq!(all.len(), 10);
        assert_eq!(all[0], [0, 1, 2]);
        assert_eq!(all[1], [0, 1, 3]);
        assert_eq!(all[3], [0, 2, 3]);
        assert_eq!(all[9], [2, 3, 4]);
        assert!(all.windows(2).all(|w| w[0] < w[1]));

        let backwards: Vec<_> = family.iter().rev().collect();
        assert_eq!(backwards, all.iter().rev().cloned().collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn degenerate_sizes() -> anyhow::Result<()> {
        let none = Combinations::<u32>::new(4, 0)?;
        assert_eq!(none.len(), 1);
        assert_eq!(none.iter().collect::<Vec<_>>(), [Vec::<u32>::new()]);

        let all = Combinations::<u32>::new(4, 4)?;
        assert_eq!(all.iter().collect::<Vec<_>>(), [[0, 1, 2, 3]]);

        let empty = Combinations::<u32>::new(0, 0)?;
        assert_eq!(empty.len(), 1);

        assert_eq!(
            Combinations::<u32>::new(3, 4),
            Err(RangeError::KExceedsN { n: 3, k: 4 })
        );
        assert!(Combinations::<u8>::new(256, 1).is_ok());
        assert!(matches!(
            Combinations::<u8>::new(257, 1),
            Err(RangeError::ElementOverflow { value: 256, .. })
        ));
        assert_eq!(
            Combinations::<u64>::new(200, 100),
            Err(RangeError::CountOverflow)
        );
        Ok(())
    }

    #[test]
    fn rank_matches_position() -> anyhow::Result<()> {
        let family = Combinations::<u16>::new(9, 4)?;
        for (position, combination) in family.iter().enumerate() {
            let position = position as u64;
            assert_eq!(family.rank(&combination)?, position);
            assert_eq!(family.nth(position)?, combination);
        }
        assert_eq!(family.rank(&[0, 0, 1, 2]), Err(RangeError::NotAMember));
        assert_eq!(family.rank(&[0, 1, 2, 9]), Err(RangeError::NotAMember));
        assert_eq!(family.rank(&[0, 1, 2]), Err(RangeError::NotAMember));
        assert_eq!(
            family.nth(126),
            Err(RangeError::RankOutOfRange { rank: 126, len: 126 })
        );
        Ok(())
    }

    #[test]
    fn large_ranks() -> anyhow::Result<()> {
        let family = Combinations::<u32>::new(60, 30)?;
        let last = family.len() - 1;
        assert_eq!(family.nth(last)?, (30..60).collect::<Vec<_>>());
        assert_eq!(family.nth(0)?, (0..30).collect::<Vec<_>>());
        let middle = family.nth(last / 2)?;
        assert_eq!(family.rank(&middle)?, last / 2);

        let wide = Combinations::<u64>::new(1 << 31, 2)?;
        let last = wide.len() - 1;
        assert_eq!(wide.nth(last)?, [(1 << 31) - 2, (1 << 31) - 1]);
        assert_eq!(wide.nth((1 << 31) - 1)?, [1, 2]);
        for rank in [0, 1, 12_345_678_901, last / 3, last] {
            assert_eq!(wide.rank(&wide.nth(rank)?)?, rank);
        }
        Ok(())
    }

    #[test]
    fn pruned_search() -> anyhow::Result<()> {
        let family = Combinations::<u32>::new(7, 3)?;
        let no_neighbours = |prefix: &[u32]| prefix.windows(2).all(|w| w[1] > w[0] + 1);

        let found = family.find_all(no_neighbours);
        let expected: Vec<_> = family
            .iter()
            .filter(|c| c.windows(2).all(|w| w[1] > w[0] + 1))
            .collect();
        assert_eq!(found, expected);
        assert_eq!(found[0], [0, 2, 4]);

        let mut calls = 0;
        let accepted = family.find_all(|prefix| {
            calls += 1;
            prefix[0] != 0
        });
        assert_eq!(accepted.len(), 20);
        assert_eq!(calls, 35);

        let cursor = family
            .find_if(|prefix| prefix[0] >= 2)
            .expect("2, 3, 4 qualifies");
        assert_eq!(cursor.current()?, &[2, 3, 4]);
        assert_eq!(cursor.rank(), Some(25));
        assert!(family.find_if(|prefix| prefix[0] > 4).is_none());

        let empty = Combinations::<u32>::new(3, 0)?;
        assert_eq!(empty.find_all(|_| false), [Vec::<u32>::new()]);
        assert_eq!(empty.find_if(|_| false).and_then(|c| c.rank()), Some(0));
        Ok(())
    }

    #[test]
    fn cursor_sentinels() -> anyhow::Result<()> {
        let family = Combinations::<u32>::new(4, 2)?;
        let mut end = family.end();
        assert_eq!(end.get(), None);
        assert_eq!(end.advance(), Err(CursorError::PastEnd));
        end.retreat()?;
        assert_eq!(end.current()?, &[2, 3]);

        let mut begin = family.begin();
        assert_eq!(begin.retreat(), Err(CursorError::BeforeBegin));
        assert_eq!(begin.current()?, &[0, 1]);

        let mut rend = family.rend();
        rend.retreat()?;
        assert_eq!(rend.current()?, &[0, 1]);
        Ok(())
    }

    #[test]
    fn serialises_as_parameters() -> anyhow::Result<()> {
        let family = Combinations::<u32>::new(6, 2)?;
        let json = serde_json::to_string(&family)?;
        assert_eq!(json, "[6,2]");
        let back: Combinations<u32> = serde_json::from_str(&json)?;
        assert_eq!(back, family);
        assert!(serde_json::from_str::<Combinations<u32>>("[2,6]").is_err());
        Ok(())
    }
}
