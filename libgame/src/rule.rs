use std::{fmt, str::FromStr};

use anyhow::{Context, ensure};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::grid::CellState;

const MAX_NEIGHBORS: usize = 8;

/// Birth/survival neighbor counts, written as `B3/S23`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    pub birth: Vec<usize>,
    pub survive: Vec<usize>,
}

impl Rule {
    pub fn next_state(&self, state: CellState, alive_neighbors: usize) -> CellState {
        let alive = match state {
            CellState::Alive => self.survive.contains(&alive_neighbors),
            CellState::Empty => self.birth.contains(&alive_neighbors),
        };

        CellState::from(alive)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            birth: vec![3],
            survive: vec![2, 3],
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "B{}/S{}",
            self.birth.iter().join(""),
            self.survive.iter().join("")
        )
    }
}

impl FromStr for Rule {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (birth, survive) = s
            .trim()
            .split_once('/')
            .with_context(|| format!("Rule {s:?} is missing the '/' separator"))?;

        let birth = parse_counts(birth, 'B').with_context(|| format!("Parsing rule {s:?}"))?;
        let survive = parse_counts(survive, 'S').with_context(|| format!("Parsing rule {s:?}"))?;

        Ok(Self { birth, survive })
    }
}

fn parse_counts(part: &str, prefix: char) -> anyhow::Result<Vec<usize>> {
    let digits = part
        .strip_prefix(prefix)
        .or_else(|| part.strip_prefix(prefix.to_ascii_lowercase()))
        .with_context(|| format!("Expected {prefix:?} prefix in {part:?}"))?;

    let counts = digits
        .chars()
        .map(|digit| -> anyhow::Result<usize> {
            let count = digit
                .to_digit(10)
                .with_context(|| format!("{digit:?} is not a neighbor count"))?
                as usize;

            ensure!(
                count <= MAX_NEIGHBORS,
                "Neighbor count {count} exceeds {MAX_NEIGHBORS}"
            );
            Ok(count)
        })
        .collect::<anyhow::Result<Vec<usize>>>()?;

    Ok(counts.into_iter().sorted().dedup().collect())
}

impl TryFrom<String> for Rule {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}
