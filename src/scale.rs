use serde::{Deserialize, Serialize};

use crate::notes::{self, OCTAVE_SIZE};
use crate::{Error, Result};

/// Root of a scale, given either as a chromatic index or a note name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BaseNote {
    Index(i64),
    Name(String),
}

impl BaseNote {
    pub fn resolve(&self) -> Result<i64> {
        match self {
            BaseNote::Index(i) => Ok(*i),
            BaseNote::Name(name) if notes::contains(name) => Ok(notes::index_of(name)? as i64),
            BaseNote::Name(name) => Err(Error::InvalidArgument(format!(
                "base note must be a chromatic index or a note name, got {name:?}"
            ))),
        }
    }
}

impl Default for BaseNote {
    fn default() -> Self {
        BaseNote::Name("C3".to_string())
    }
}

impl From<i64> for BaseNote {
    fn from(i: i64) -> Self {
        BaseNote::Index(i)
    }
}

impl From<&str> for BaseNote {
    fn from(name: &str) -> Self {
        BaseNote::Name(name.to_string())
    }
}

impl From<String> for BaseNote {
    fn from(name: String) -> Self {
        BaseNote::Name(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    HeptatonicMajor,
    NaturalMinor,
    PentatonicBlues,
    PentatonicMajor,
    Chromatic,
}

impl ScaleKind {
    pub fn pattern(self) -> Vec<i32> {
        match self {
            ScaleKind::HeptatonicMajor => vec![0, 2, 4, 5, 7, 9, 11],
            ScaleKind::NaturalMinor => vec![0, 2, 3, 5, 7, 8, 10],
            ScaleKind::PentatonicBlues => vec![0, 3, 5, 6, 7, 10],
            ScaleKind::PentatonicMajor => vec![0, 2, 4, 7, 9],
            ScaleKind::Chromatic => (0..OCTAVE_SIZE as i32).collect(),
        }
    }
}

/// Maps scale steps to frequencies. Step 0 is the base note, every
/// `notes_per_octave` steps climb one octave, negative steps descend.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    base: i64,
    pattern: Vec<i32>,
}

impl Scale {
    pub fn new(base: impl Into<BaseNote>, pattern: Vec<i32>) -> Result<Self> {
        let base = base.into().resolve()?;
        if pattern.is_empty() {
            return Err(Error::InvalidArgument(
                "scale pattern must not be empty".to_string(),
            ));
        }
        Ok(Scale { base, pattern })
    }

    pub fn named(base: impl Into<BaseNote>, kind: ScaleKind) -> Result<Self> {
        Self::new(base, kind.pattern())
    }

    pub fn base(&self) -> i64 {
        self.base
    }

    pub fn pattern(&self) -> &[i32] {
        &self.pattern
    }

    pub fn notes_per_octave(&self) -> usize {
        self.pattern.len()
    }

    /// Chromatic index of a scale step, before any table bounds check.
    /// Uses floor division so that step -1 is the top of the octave below.
    /// `None` when the index does not fit in an `i64`.
    pub fn chromatic_index(&self, step: i64) -> Option<i64> {
        let len = self.pattern.len() as i64;
        let offset = self.pattern[step.rem_euclid(len) as usize] as i64;
        step.div_euclid(len)
            .checked_mul(OCTAVE_SIZE as i64)?
            .checked_add(self.base)?
            .checked_add(offset)
    }

    pub fn at(&self, step: i64) -> Result<f32> {
        match self.chromatic_index(step) {
            Some(index) => notes::frequency_at(index),
            None => Err(Error::OutOfRange {
                index: if step < 0 { i64::MIN } else { i64::MAX },
                max: notes::NOTE_COUNT - 1,
            }),
        }
    }

    /// Resolves a whole index sequence into a track of frequencies.
    pub fn compose(&self, indices: &[i32]) -> Result<Vec<f32>> {
        indices.iter().map(|&i| self.at(i as i64)).collect()
    }
}
