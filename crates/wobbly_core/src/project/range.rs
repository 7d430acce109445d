//! Inclusive frame ranges and an ordered registry of them.
//!
//! [`RangeMap`] keys entries by their first frame and answers
//! predecessor/successor queries explicitly, which is all the trim,
//! freeze-frame and custom-list registries need.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive range of frames, always stored with `first <= last`.
///
/// Serialized as a two-element `[first, last]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct FrameRange {
    pub first: i32,
    pub last: i32,
}

impl FrameRange {
    /// Create a range, swapping the ends if they are reversed.
    pub fn new(a: i32, b: i32) -> Self {
        if a <= b {
            Self { first: a, last: b }
        } else {
            Self { first: b, last: a }
        }
    }

    /// Number of frames in the range.
    pub fn len(&self) -> i32 {
        self.last - self.first + 1
    }

    /// Always false; a range holds at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `frame` lies inside the range.
    pub fn contains(&self, frame: i32) -> bool {
        self.first <= frame && frame <= self.last
    }

    /// Whether the two ranges share at least one frame.
    pub fn intersects(&self, other: &FrameRange) -> bool {
        self.first <= other.last && other.first <= self.last
    }
}

impl From<[i32; 2]> for FrameRange {
    fn from(pair: [i32; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<FrameRange> for [i32; 2] {
    fn from(range: FrameRange) -> Self {
        [range.first, range.last]
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.first, self.last)
    }
}

/// Something that covers an inclusive frame range.
pub trait Ranged {
    fn range(&self) -> FrameRange;
}

impl Ranged for FrameRange {
    fn range(&self) -> FrameRange {
        *self
    }
}

/// Disjoint ranged entries ordered by their first frame.
///
/// The map does not enforce disjointness on its own; callers check
/// [`RangeMap::find_overlap`] before inserting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMap<T> {
    entries: BTreeMap<i32, T>,
}

impl<T> Default for RangeMap<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Ranged> RangeMap<T> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry with the greatest first frame `<= frame`.
    pub fn predecessor(&self, frame: i32) -> Option<&T> {
        self.entries.range(..=frame).next_back().map(|(_, v)| v)
    }

    /// Entry with the smallest first frame `> frame`.
    pub fn successor(&self, frame: i32) -> Option<&T> {
        let start = frame.checked_add(1)?;
        self.entries.range(start..).next().map(|(_, v)| v)
    }

    /// Entry whose range contains `frame`.
    pub fn find(&self, frame: i32) -> Option<&T> {
        self.predecessor(frame)
            .filter(|entry| entry.range().contains(frame))
    }

    /// First registered entry that shares a frame with `range`.
    ///
    /// Checks the entry containing `range.first`, the one containing
    /// `range.last`, and any entry starting strictly inside the range.
    pub fn find_overlap(&self, range: FrameRange) -> Option<&T> {
        self.find(range.first)
            .or_else(|| self.find(range.last))
            .or_else(|| {
                self.successor(range.first)
                    .filter(|entry| entry.range().first < range.last)
            })
    }

    /// Insert an entry, replacing any entry with the same first frame.
    pub fn insert(&mut self, entry: T) {
        self.entries.insert(entry.range().first, entry);
    }

    /// Remove the entry starting exactly at `first`.
    pub fn remove(&mut self, first: i32) -> Option<T> {
        self.entries.remove(&first)
    }

    /// Entry starting exactly at `first`.
    pub fn get(&self, first: i32) -> Option<&T> {
        self.entries.get(&first)
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|_, v| keep(v));
    }

    /// Replace every entry with `f(entry)`, dropping those mapped to `None`.
    ///
    /// Entries are re-keyed by their new first frame.
    pub fn remap(&mut self, mut f: impl FnMut(&T) -> Option<T>) {
        let old = std::mem::take(&mut self.entries);
        for entry in old.values().filter_map(|entry| f(entry)) {
            self.insert(entry);
        }
    }

    /// Entries in ascending order of first frame.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.entries.values()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry by start frame.
    pub fn first(&self) -> Option<&T> {
        self.entries.values().next()
    }

    /// Last entry by start frame.
    pub fn last(&self) -> Option<&T> {
        self.entries.values().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(ranges: &[(i32, i32)]) -> RangeMap<FrameRange> {
        let mut map = RangeMap::new();
        for &(a, b) in ranges {
            map.insert(FrameRange::new(a, b));
        }
        map
    }

    #[test]
    fn new_normalizes_reversed_ends() {
        let range = FrameRange::new(9, 3);
        assert_eq!(range, FrameRange { first: 3, last: 9 });
        assert_eq!(range.len(), 7);
    }

    #[test]
    fn find_returns_containing_range_only() {
        let map = map_of(&[(2, 4), (10, 10), (15, 20)]);

        for frame in 0..25 {
            let found = map.find(frame).copied();
            let expected = match frame {
                2..=4 => Some(FrameRange::new(2, 4)),
                10 => Some(FrameRange::new(10, 10)),
                15..=20 => Some(FrameRange::new(15, 20)),
                _ => None,
            };
            assert_eq!(found, expected, "frame {}", frame);
        }
    }

    #[test]
    fn predecessor_and_successor() {
        let map = map_of(&[(0, 4), (10, 12)]);
        assert_eq!(map.predecessor(9).map(|r| r.first), Some(0));
        assert_eq!(map.predecessor(10).map(|r| r.first), Some(10));
        assert_eq!(map.successor(0).map(|r| r.first), Some(10));
        assert!(map.successor(10).is_none());
        assert!(map.predecessor(-1).is_none());
    }

    #[test]
    fn overlap_detects_enclosed_range() {
        let map = map_of(&[(5, 6)]);
        assert!(map.find_overlap(FrameRange::new(0, 10)).is_some());
        assert!(map.find_overlap(FrameRange::new(6, 8)).is_some());
        assert!(map.find_overlap(FrameRange::new(0, 5)).is_some());
        assert!(map.find_overlap(FrameRange::new(7, 9)).is_none());
        assert!(map.find_overlap(FrameRange::new(0, 4)).is_none());
    }

    #[test]
    fn serializes_as_pair() {
        let json = serde_json::to_string(&FrameRange::new(4, 7)).unwrap();
        assert_eq!(json, "[4,7]");
        let parsed: FrameRange = serde_json::from_str("[7,4]").unwrap();
        assert_eq!(parsed, FrameRange::new(4, 7));
    }
}
