//! Lattice paths that start and end on the baseline and never dip below it.
//!
//!Dyck and Motzkin paths differ only in whether flat steps are allowed, so both families run on
//!the same engine: a table counting the ways to finish a path from a given height, plus the
//!smallest and largest such finishes in closed form.
use chumsky::prelude::*;
use std::fmt::Display;
use thiserror::Error;

use crate::{cursor::Direction, enumeration::Transition, error::RangeError};

mod dyck;
mod motzkin;
mod step;

pub use dyck::DyckPaths;
pub use motzkin::MotzkinPaths;
pub use step::Step;

///Unable to parse a path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct PathParseError(String);

impl From<Vec<Rich<'_, char>>> for PathParseError {
    fn from(value: Vec<Rich<'_, char>>) -> Self {
        PathParseError(
            value
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl Display for PathParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.0)
    }
}

fn path_parser<'a>() -> impl Parser<'a, &'a str, Vec<Step>, extra::Err<Rich<'a, char>>> + Clone {
    choice((
        just('(').to(Step::Up),
        just('-').to(Step::Flat),
        just(')').to(Step::Down),
    ))
    .repeated()
    .collect::<Vec<_>>()
    .padded()
    .then_ignore(end())
}

///Reads a path written with `(` for [`Step::Up`], `-` for [`Step::Flat`] and `)` for
///[`Step::Down`]. Surrounding whitespace is ignored.
///
///Only the spelling is checked: whether the steps form a member of some family is up to that
///family's `rank`.
///
///```
///# use combinatoria::{DyckPaths, Enumeration, paths::{Step, parse_path}};
///let steps = parse_path(" (()) ")?;
///assert_eq!(steps, [Step::Up, Step::Up, Step::Down, Step::Down]);
///assert_eq!(DyckPaths::new(2)?.rank(&steps)?, 0);
///# Ok::<(), anyhow::Error>(())
///```
///
///# Errors
///Returns a [`PathParseError`] on any other character.
pub fn parse_path(s: &str) -> Result<Vec<Step>, PathParseError> {
    path_parser()
        .parse(s)
        .into_result()
        .map_err(std::convert::Into::into)
}

///Writes a path in the notation read by [`parse_path`].
#[must_use]
pub fn format_path(steps: &[Step]) -> String {
    steps.iter().map(|step| step.symbol()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Alphabet {
    Dyck,
    Motzkin,
}

impl Alphabet {
    fn steps(self) -> &'static [Step] {
        match self {
            Alphabet::Dyck => &[Step::Up, Step::Down],
            Alphabet::Motzkin => &[Step::Up, Step::Flat, Step::Down],
        }
    }

    ///Whether `length` steps can bring a path from `height` back to the baseline.
    fn can_finish(self, length: usize, height: isize) -> bool {
        let Ok(height) = usize::try_from(height) else {
            return false;
        };
        height <= length && (self == Alphabet::Motzkin || (length - height) % 2 == 0)
    }

    fn smallest_finish(self, tail: &mut [Step], height: usize) {
        let length = tail.len();
        let ups = (length - height) / 2;
        let (rise, rest) = tail.split_at_mut(ups);
        rise.fill(Step::Up);
        match self {
            Alphabet::Dyck => rest.fill(Step::Down),
            Alphabet::Motzkin => {
                let flats = (length - height) % 2;
                let (flat, fall) = rest.split_at_mut(flats);
                flat.fill(Step::Flat);
                fall.fill(Step::Down);
            }
        }
    }

    fn largest_finish(self, tail: &mut [Step], height: usize) {
        let (fall, rest) = tail.split_at_mut(height);
        fall.fill(Step::Down);
        match self {
            Alphabet::Dyck => {
                for pair in rest.chunks_exact_mut(2) {
                    pair.copy_from_slice(&[Step::Up, Step::Down]);
                }
            }
            Alphabet::Motzkin => rest.fill(Step::Flat),
        }
    }
}

///The shared machinery of one path family: its alphabet, its length and its completion counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Lattice {
    alphabet: Alphabet,
    length: usize,
    ///`finishes[rest * (length + 1) + height]` counts the ways to return to the baseline from
    ///`height` in `rest` steps. Only `rest + height <= length` is filled in.
    finishes: Vec<u64>,
}

impl Lattice {
    pub(crate) fn new(alphabet: Alphabet, length: usize) -> Result<Self, RangeError> {
        let width = length + 1;
        let mut finishes = vec![0u64; width * width];
        finishes[0] = 1;
        for rest in 1..width {
            for height in 0..width - rest {
                let mut total = 0u64;
                for step in alphabet.steps() {
                    let Some(next) = height.checked_add_signed(step.rise()) else {
                        continue;
                    };
                    if next <= rest - 1 {
                        total = total
                            .checked_add(finishes[(rest - 1) * width + next])
                            .ok_or(RangeError::CountOverflow)?;
                    }
                }
                finishes[rest * width + height] = total;
            }
        }
        Ok(Lattice {
            alphabet,
            length,
            finishes,
        })
    }

    pub(crate) fn len(&self) -> u64 {
        self.finishes(self.length, 0)
    }

    fn finishes(&self, rest: usize, height: usize) -> u64 {
        if height > rest {
            return 0;
        }
        self.finishes[rest * (self.length + 1) + height]
    }

    pub(crate) fn first(&self) -> PathState {
        let mut steps = vec![Step::Up; self.length];
        self.alphabet.smallest_finish(&mut steps, 0);
        PathState {
            steps,
            alphabet: self.alphabet,
        }
    }

    pub(crate) fn last(&self) -> PathState {
        let mut steps = vec![Step::Up; self.length];
        self.alphabet.largest_finish(&mut steps, 0);
        PathState {
            steps,
            alphabet: self.alphabet,
        }
    }

    pub(crate) fn unrank(&self, rank: u64) -> PathState {
        let mut rank = rank;
        let mut height = 0isize;
        let mut steps = Vec::with_capacity(self.length);
        for i in 0..self.length {
            let rest = self.length - i - 1;
            for &step in self.alphabet.steps() {
                let next = height + step.rise();
                if !self.alphabet.can_finish(rest, next) {
                    continue;
                }
                let through = self.finishes(rest, next.unsigned_abs());
                if rank < through {
                    steps.push(step);
                    height = next;
                    break;
                }
                rank -= through;
            }
        }
        PathState {
            steps,
            alphabet: self.alphabet,
        }
    }

    pub(crate) fn rank(&self, steps: &[Step]) -> Result<u64, RangeError> {
        if steps.len() != self.length || !steps.iter().all(|s| self.alphabet.steps().contains(s)) {
            return Err(RangeError::NotAMember);
        }
        let mut rank = 0;
        let mut height = 0isize;
        for (i, &taken) in steps.iter().enumerate() {
            let rest = self.length - i - 1;
            // Every feasible smaller step at this position leads to paths ordered before ours.
            for &step in self.alphabet.steps().iter().take_while(|&&s| s < taken) {
                let next = height + step.rise();
                if self.alphabet.can_finish(rest, next) {
                    rank += self.finishes(rest, next.unsigned_abs());
                }
            }
            height += taken.rise();
            if height < 0 {
                return Err(RangeError::NotAMember);
            }
        }
        if height == 0 {
            Ok(rank)
        } else {
            Err(RangeError::NotAMember)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
///A path being walked through by [`DyckPaths`] or [`MotzkinPaths`].
pub struct PathState {
    steps: Vec<Step>,
    alphabet: Alphabet,
}

impl PathState {
    ///The height reached after each step.
    #[must_use]
    pub fn heights(&self) -> Vec<usize> {
        self.steps
            .iter()
            .scan(0usize, |height, step| {
                *height = height.checked_add_signed(step.rise())?;
                Some(*height)
            })
            .collect()
    }

    // Replaces the rightmost step that has a feasible neighbour in `direction`, then writes the
    // extreme finish in that direction after it.
    fn rewrite(&mut self, direction: Direction) -> bool {
        let length = self.steps.len();
        let alphabet = self.alphabet;
        let mut height_after = 0isize;
        for i in (0..length).rev() {
            let current = self.steps[i];
            let height_before = height_after - current.rise();
            let rest = length - i - 1;
            let mut feasible = alphabet
                .steps()
                .iter()
                .copied()
                .filter(|step| alphabet.can_finish(rest, height_before + step.rise()));
            let replacement = match direction {
                Direction::Forward => feasible.find(|&step| step > current),
                Direction::Reverse => feasible.filter(|&step| step < current).last(),
            };
            if let Some(replacement) = replacement {
                self.steps[i] = replacement;
                let height = (height_before + replacement.rise()).unsigned_abs();
                let tail = &mut self.steps[i + 1..];
                match direction {
                    Direction::Forward => alphabet.smallest_finish(tail, height),
                    Direction::Reverse => alphabet.largest_finish(tail, height),
                }
                return true;
            }
            height_after = height_before;
        }
        false
    }
}

impl Transition for PathState {
    type Item = Step;

    fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    fn to_successor(&mut self) -> bool {
        self.rewrite(Direction::Forward)
    }

    fn to_predecessor(&mut self) -> bool {
        self.rewrite(Direction::Reverse)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parsing() -> anyhow::Result<()> {
        assert_eq!(
            parse_path("(-)")?,
            [Step::Up, Step::Flat, Step::Down]
        );
        assert_eq!(parse_path("")?, Vec::<Step>::new());
        assert_eq!(parse_path("  ()  ")?, [Step::Up, Step::Down]);
        assert!(parse_path("(x)").is_err());
        assert!(parse_path("( )").is_err());
        Ok(())
    }

    #[test]
    fn formatting_round_trips() -> anyhow::Result<()> {
        let steps = [Step::Up, Step::Up, Step::Flat, Step::Down, Step::Down];
        let written = format_path(&steps);
        assert_eq!(written, "((-))");
        assert_eq!(parse_path(&written)?, steps);
        Ok(())
    }

    #[test]
    fn finishes() -> anyhow::Result<()> {
        let lattice = Lattice::new(Alphabet::Motzkin, 6)?;
        assert_eq!(lattice.len(), 51);
        assert_eq!(lattice.finishes(2, 2), 1);
        assert_eq!(lattice.finishes(3, 1), 5);
        assert_eq!(lattice.finishes(1, 2), 0);

        let lattice = Lattice::new(Alphabet::Dyck, 6)?;
        assert_eq!(lattice.len(), 5);
        assert_eq!(lattice.finishes(3, 0), 0);
        assert_eq!(lattice.finishes(3, 1), 2);
        Ok(())
    }

    #[test]
    fn heights() -> anyhow::Result<()> {
        let lattice = Lattice::new(Alphabet::Motzkin, 5)?;
        assert_eq!(lattice.first().heights(), [1, 2, 2, 1, 0]);
        assert_eq!(lattice.last().heights(), [0; 5]);
        Ok(())
    }
}
