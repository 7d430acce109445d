//! Options and outcomes for pattern guessing.

use serde::{Deserialize, Serialize};

/// Which of the two duplicate frames in a cycle gets decimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropDuplicate {
    /// Always the first duplicate (the `n` side).
    First,
    /// Always the second duplicate (the `c` side).
    Second,
    /// Whichever side has the higher mics across the whole section.
    #[default]
    UglierPerSection,
    /// Whichever side has the higher mics, decided cycle by cycle.
    UglierPerCycle,
}

/// How the slot before each `nn` pair of a pattern is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThirdNMatch {
    /// Always match it with `n`.
    Always,
    /// Keep the `c` from the template.
    #[default]
    Never,
    /// Use `n` where its mic is lower than the `c` mic.
    IfPrettier,
}

/// Acceptance thresholds for the dominant `nc` position.
///
/// Percentages are shares of all `nc` pairs in the section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessThresholds {
    /// The dominant position must hold more than this share.
    pub min_best_percent: f32,
    /// And lead the runner-up by more than this.
    pub min_margin_percent: f32,
}

impl Default for GuessThresholds {
    fn default() -> Self {
        Self {
            min_best_percent: 40.0,
            min_margin_percent: 10.0,
        }
    }
}

/// Everything the guesser needs besides the project.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuessOptions {
    pub third_n_match: ThirdNMatch,
    pub drop_duplicate: DropDuplicate,
    pub thresholds: GuessThresholds,
}

/// Why a section was left alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// Shorter than the minimum length of the project-wide pass.
    TooShort { length: i32 },
    /// No position held a clear majority of `nc` pairs.
    NoDominantPattern {
        best_percent: f32,
        next_best_percent: f32,
    },
}

/// Result of guessing one section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SectionGuess {
    /// Matches and decimation were rewritten.
    Applied {
        /// Cycle position of the first duplicate.
        best: i32,
        /// Position dropped in every cycle, or `None` when decided per cycle.
        drop: Option<i32>,
    },
    /// Nothing changed.
    Skipped(SkipReason),
}

impl SectionGuess {
    /// Whether the section was rewritten.
    pub fn is_applied(&self) -> bool {
        matches!(self, SectionGuess::Applied { .. })
    }
}

/// Per-section report of a project-wide pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GuessReport {
    /// (section start, outcome) in section order.
    pub sections: Vec<(i32, SectionGuess)>,
}

impl GuessReport {
    /// Sections that were rewritten.
    pub fn applied(&self) -> impl Iterator<Item = i32> + '_ {
        self.sections
            .iter()
            .filter(|(_, guess)| guess.is_applied())
            .map(|(start, _)| *start)
    }

    /// Sections skipped for being too short.
    pub fn too_short(&self) -> impl Iterator<Item = i32> + '_ {
        self.sections
            .iter()
            .filter(|(_, guess)| matches!(guess, SectionGuess::Skipped(SkipReason::TooShort { .. })))
            .map(|(start, _)| *start)
    }

    /// Sections without a recognizable pattern.
    pub fn ambiguous(&self) -> impl Iterator<Item = i32> + '_ {
        self.sections
            .iter()
            .filter(|(_, guess)| {
                matches!(guess, SectionGuess::Skipped(SkipReason::NoDominantPattern { .. }))
            })
            .map(|(start, _)| *start)
    }
}
