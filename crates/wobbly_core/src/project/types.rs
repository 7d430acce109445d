//! Value types stored in a project.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::range::{FrameRange, Ranged, RangeMap};
use crate::error::{ProjectError, ProjectResult};

/// Field match for one source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Match {
    /// Match with the previous field.
    P,
    /// Match with the current field.
    #[default]
    C,
    /// Match with the next field.
    N,
    /// Bottom field of the previous frame.
    B,
    /// Bottom field of the next frame.
    U,
}

impl Match {
    /// All matches in mic order.
    pub const ALL: [Match; 5] = [Match::P, Match::C, Match::N, Match::B, Match::U];

    /// Lowercase letter used in project files and scripts.
    pub fn as_char(self) -> char {
        match self {
            Match::P => 'p',
            Match::C => 'c',
            Match::N => 'n',
            Match::B => 'b',
            Match::U => 'u',
        }
    }

    /// Parse a match letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Match::P),
            'c' => Some(Match::C),
            'n' => Some(Match::N),
            'b' => Some(Match::B),
            'u' => Some(Match::U),
            _ => None,
        }
    }

    /// Index of this match in a frame's mic array.
    pub fn mic_index(self) -> usize {
        match self {
            Match::P => 0,
            Match::C => 1,
            Match::N => 2,
            Match::B => 3,
            Match::U => 4,
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Per-frame combing metrics, one per candidate match in [`Match::ALL`] order.
pub type Mics = [i16; 5];

/// Stage of the filter chain a frame number refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum FilterChainPosition {
    /// After trimming the source.
    PostSource,
    /// After field matching.
    PostFieldMatch,
    /// After decimation.
    PostDecimate,
}

impl FilterChainPosition {
    /// Integer used in project files.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::PostSource => 0,
            Self::PostFieldMatch => 1,
            Self::PostDecimate => 2,
        }
    }
}

impl TryFrom<i32> for FilterChainPosition {
    type Error = ProjectError;

    fn try_from(value: i32) -> ProjectResult<Self> {
        match value {
            0 => Ok(Self::PostSource),
            1 => Ok(Self::PostFieldMatch),
            2 => Ok(Self::PostDecimate),
            other => Err(ProjectError::out_of_range(format!(
                "Filter chain position {} is out of range (expected 0, 1 or 2).",
                other
            ))),
        }
    }
}

impl From<FilterChainPosition> for i32 {
    fn from(position: FilterChainPosition) -> Self {
        position.as_i32()
    }
}

impl fmt::Display for FilterChainPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PostSource => write!(f, "post source"),
            Self::PostFieldMatch => write!(f, "post field match"),
            Self::PostDecimate => write!(f, "post decimate"),
        }
    }
}

/// Range of frames replaced by a single repeated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct FreezeFrame {
    pub first: i32,
    pub last: i32,
    pub replacement: i32,
}

impl Ranged for FreezeFrame {
    fn range(&self) -> FrameRange {
        FrameRange {
            first: self.first,
            last: self.last,
        }
    }
}

impl From<[i32; 3]> for FreezeFrame {
    fn from(v: [i32; 3]) -> Self {
        Self {
            first: v[0],
            last: v[1],
            replacement: v[2],
        }
    }
}

impl From<FreezeFrame> for [i32; 3] {
    fn from(ff: FreezeFrame) -> Self {
        [ff.first, ff.last, ff.replacement]
    }
}

impl fmt::Display for FreezeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.first, self.last, self.replacement)
    }
}

/// Contiguous run of frames sharing a preset chain.
///
/// A section ends where the next one starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub start: i32,
    /// Preset names applied in order. Weak references into the preset registry.
    #[serde(default)]
    pub presets: Vec<String>,
    #[serde(default)]
    pub fps_num: i64,
    #[serde(default)]
    pub fps_den: i64,
    #[serde(default)]
    pub num_frames: i32,
}

impl Section {
    /// Create a section with no presets.
    pub fn new(start: i32) -> Self {
        Self {
            start,
            presets: Vec::new(),
            fps_num: 0,
            fps_den: 0,
            num_frames: 0,
        }
    }
}

/// Named script fragment applied to a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contents: String,
}

/// Named set of frame ranges filtered by one preset at one chain position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomList {
    pub name: String,
    /// Preset name, empty when none is assigned.
    pub preset: String,
    pub position: FilterChainPosition,
    pub frames: RangeMap<FrameRange>,
}

impl CustomList {
    /// Create an empty list with no preset.
    pub fn new(name: impl Into<String>, position: FilterChainPosition) -> Self {
        Self {
            name: name.into(),
            preset: String::new(),
            position,
            frames: RangeMap::new(),
        }
    }

    /// Set the preset.
    pub fn with_preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = preset.into();
        self
    }

    /// Whether a preset is assigned.
    pub fn has_preset(&self) -> bool {
        !self.preset.is_empty()
    }
}

/// Crop applied after decimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Crop {
    pub enabled: bool,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Final resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resize {
    pub enabled: bool,
    pub width: i32,
    pub height: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_letters_round_trip() {
        for m in Match::ALL {
            assert_eq!(Match::from_char(m.as_char()), Some(m));
        }
        assert_eq!(Match::from_char('x'), None);
    }

    #[test]
    fn mic_index_follows_letter_order() {
        let indices: Vec<usize> = Match::ALL.iter().map(|m| m.mic_index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn position_rejects_unknown_values() {
        assert_eq!(
            FilterChainPosition::try_from(2).unwrap(),
            FilterChainPosition::PostDecimate
        );
        assert!(FilterChainPosition::try_from(3).is_err());
        assert!(FilterChainPosition::try_from(-1).is_err());
    }

    #[test]
    fn match_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Match::N).unwrap(), "\"n\"");
        let parsed: Vec<Match> = serde_json::from_str("[\"p\",\"u\"]").unwrap();
        assert_eq!(parsed, vec![Match::P, Match::U]);
    }
}
