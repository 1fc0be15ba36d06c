use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
///One step of a lattice path. Steps compare as `Up < Flat < Down`, which fixes the
///lexicographic order of every path family.
pub enum Step {
    ///Raises the height by one. Written `(`.
    Up,
    ///Keeps the height. Written `-`.
    Flat,
    ///Lowers the height by one. Written `)`.
    Down,
}

impl Step {
    ///How the step changes the height.
    #[must_use]
    pub fn rise(self) -> isize {
        match self {
            Step::Up => 1,
            Step::Flat => 0,
            Step::Down => -1,
        }
    }

    ///The bracket character spelling the step.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Step::Up => '(',
            Step::Flat => '-',
            Step::Down => ')',
        }
    }
}

impl Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordering() {
        assert!(Step::Up < Step::Flat);
        assert!(Step::Flat < Step::Down);
        assert_eq!(Step::Down.to_string(), ")");
        assert_eq!(
            [Step::Up, Step::Flat, Step::Down].map(Step::rise),
            [1, 0, -1]
        );
    }

    #[test]
    fn serde_names() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Step::Flat)?, "\"Flat\"");
        let steps: Vec<Step> = serde_json::from_str("[\"Up\",\"Down\"]")?;
        assert_eq!(steps, [Step::Up, Step::Down]);
        Ok(())
    }
}
