use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::DrillError;
use crate::language::Normalizer;
use crate::store::Store;

/// Which side of the dictionary is asked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Show the word, expect its meaning
    Direct,
    /// Show the meaning, expect the word
    Reverse,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Direct => "direct",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Direction::Direct),
            "reverse" => Ok(Direction::Reverse),
            other => Err(DrillError::InvalidArgument(other.to_string())),
        }
    }
}

/// How the next challenge is picked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillOrder {
    /// Every entry once per lap, reshuffled between laps
    #[default]
    Shuffle,
    /// Independent uniform draw each time, repeats allowed
    Random,
}

impl FromStr for DrillOrder {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shuffle" => Ok(DrillOrder::Shuffle),
            "random" => Ok(DrillOrder::Random),
            other => Err(DrillError::InvalidArgument(other.to_string())),
        }
    }
}

/// Drill session over one side of a store
pub struct Drill<'a, R> {
    pairs: Vec<(&'a str, &'a str)>,
    normalizer: &'a dyn Normalizer,
    direction: Direction,
    order: DrillOrder,
    rng: R,
    cursor: usize,
    current: Option<usize>,
    laps: usize,
}

impl<'a, R: Rng> Drill<'a, R> {
    pub fn new(store: &'a Store, direction: Direction, rng: R) -> Result<Self, DrillError> {
        Self::with_order(store, direction, DrillOrder::default(), rng)
    }

    pub fn with_order(
        store: &'a Store,
        direction: Direction,
        order: DrillOrder,
        rng: R,
    ) -> Result<Self, DrillError> {
        // Answers are compared in the language of the expected side
        let (index, normalizer) = match direction {
            Direction::Direct => (store.direct_index(), store.meaning_plugin()),
            Direction::Reverse => (store.reverse_index(), store.original_plugin()),
        };

        if index.is_empty() {
            return Err(DrillError::EmptyDictionary);
        }

        let pairs: Vec<(&str, &str)> = index
            .iter()
            .map(|(challenge, answer)| (challenge.as_str(), answer.as_str()))
            .collect();
        let cursor = pairs.len();

        tracing::debug!("Starting {} drill over {} entries", direction, pairs.len());
        Ok(Self {
            pairs,
            normalizer,
            direction,
            order,
            rng,
            cursor,
            current: None,
            laps: 0,
        })
    }

    /// Advance to the next challenge and return it
    pub fn next_challenge(&mut self) -> &'a str {
        let idx = match self.order {
            DrillOrder::Shuffle => {
                if self.cursor >= self.pairs.len() {
                    self.pairs.shuffle(&mut self.rng);
                    self.cursor = 0;
                    self.laps += 1;
                    tracing::debug!("Starting lap {}", self.laps);
                }
                let idx = self.cursor;
                self.cursor += 1;
                idx
            }
            DrillOrder::Random => self.rng.gen_range(0..self.pairs.len()),
        };

        self.current = Some(idx);
        let (challenge, _) = self.pairs[idx];
        tracing::debug!("Next challenge is '{}'", challenge);
        challenge
    }

    /// Compare a typed answer with the expected one after trimming and normalization
    pub fn check(&self, answer: &str) -> bool {
        let Some(expected) = self.answer() else {
            return false;
        };
        let converted = self.normalizer.convert(answer.trim());
        if converted == expected {
            true
        } else {
            tracing::debug!("'{}' (converted from '{}') is incorrect", converted, answer);
            false
        }
    }

    pub fn challenge(&self) -> Option<&'a str> {
        self.current.map(|idx| self.pairs[idx].0)
    }

    pub fn answer(&self) -> Option<&'a str> {
        self.current.map(|idx| self.pairs[idx].1)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of laps started so far
    pub fn laps(&self) -> usize {
        self.laps
    }
}
