//! Decimation bookkeeping.
//!
//! Frames are grouped into cycles of five. Each cycle stores the
//! positions marked for dropping as a 5-bit mask, and the tracker keeps
//! the post-decimation frame count in step with every change.

use crate::error::{ProjectError, ProjectResult};

/// Number of frames in one telecine cycle.
pub const CYCLE_LENGTH: i32 = 5;

/// Dropped positions per cycle plus the running post-decimation count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecimationTracker {
    cycles: Vec<u8>,
    source_frames: i32,
    decimated_frames: i32,
}

fn cycle_count(frames: i32) -> usize {
    if frames <= 0 {
        0
    } else {
        ((frames - 1) / CYCLE_LENGTH + 1) as usize
    }
}

impl DecimationTracker {
    /// Tracker for `source_frames` frames with nothing dropped.
    pub fn new(source_frames: i32) -> Self {
        let source_frames = source_frames.max(0);
        Self {
            cycles: vec![0; cycle_count(source_frames)],
            source_frames,
            decimated_frames: source_frames,
        }
    }

    /// Frames before decimation.
    pub fn source_frames(&self) -> i32 {
        self.source_frames
    }

    /// Frames left after dropping every marked frame.
    pub fn decimated_frames(&self) -> i32 {
        self.decimated_frames
    }

    fn check(&self, frame: i32, action: &str) -> ProjectResult<()> {
        if frame < 0 || frame >= self.source_frames {
            return Err(ProjectError::out_of_range(format!(
                "Can't {} frame {}: value out of range.",
                action, frame
            )));
        }
        Ok(())
    }

    fn split(frame: i32) -> (usize, u8) {
        ((frame / CYCLE_LENGTH) as usize, 1 << (frame % CYCLE_LENGTH))
    }

    /// Mark a frame for dropping. Returns true if it was not marked before.
    pub fn add(&mut self, frame: i32) -> ProjectResult<bool> {
        self.check(frame, "mark for decimation")?;
        let (cycle, bit) = Self::split(frame);
        if self.cycles[cycle] & bit != 0 {
            return Ok(false);
        }
        self.cycles[cycle] |= bit;
        self.decimated_frames -= 1;
        Ok(true)
    }

    /// Unmark a frame. Returns true if it was marked.
    pub fn remove(&mut self, frame: i32) -> ProjectResult<bool> {
        self.check(frame, "delete decimated")?;
        let (cycle, bit) = Self::split(frame);
        if self.cycles[cycle] & bit == 0 {
            return Ok(false);
        }
        self.cycles[cycle] &= !bit;
        self.decimated_frames += 1;
        Ok(true)
    }

    /// Whether a frame is marked for dropping.
    pub fn contains(&self, frame: i32) -> ProjectResult<bool> {
        self.check(frame, "check decimation of")?;
        let (cycle, bit) = Self::split(frame);
        Ok(self.cycles[cycle] & bit != 0)
    }

    /// Unmark every frame in the cycle containing `frame`.
    ///
    /// Returns how many frames were unmarked.
    pub fn clear_cycle(&mut self, frame: i32) -> ProjectResult<u32> {
        self.check(frame, "clear decimated frames from cycle containing")?;
        let (cycle, _) = Self::split(frame);
        let removed = self.cycles[cycle].count_ones();
        self.cycles[cycle] = 0;
        self.decimated_frames += removed as i32;
        Ok(removed)
    }

    /// Number of dropped positions in a cycle.
    pub fn dropped_in_cycle(&self, cycle: usize) -> u32 {
        self.cycles.get(cycle).map_or(0, |mask| mask.count_ones())
    }

    /// Whether anything at all is marked.
    pub fn any(&self) -> bool {
        self.cycles.iter().any(|&mask| mask != 0)
    }

    /// Number of cycles.
    pub fn cycle_count(&self) -> usize {
        self.cycles.len()
    }

    /// Marked frames in ascending order, as source frame numbers.
    pub fn frames(&self) -> impl Iterator<Item = i32> + '_ {
        self.cycles.iter().enumerate().flat_map(|(cycle, &mask)| {
            (0..CYCLE_LENGTH)
                .filter(move |pos| mask & (1 << pos) != 0)
                .map(move |pos| cycle as i32 * CYCLE_LENGTH + pos)
        })
    }

    /// Map a source frame to its index after decimation.
    ///
    /// Negative input maps to 0 and input past the end maps to the last
    /// decimated frame. A dropped frame maps to the frame that follows it.
    pub fn frame_after_decimation(&self, frame: i32) -> i32 {
        let last = (self.decimated_frames - 1).max(0);
        if frame < 0 {
            return 0;
        }
        if frame >= self.source_frames {
            return last;
        }

        let (cycle, _) = Self::split(frame);
        let position = frame % CYCLE_LENGTH;

        let dropped_before: i32 = self.cycles[..cycle]
            .iter()
            .map(|mask| mask.count_ones() as i32)
            .sum();

        let kept_in_cycle = (0..position)
            .filter(|pos| self.cycles[cycle] & (1 << pos) == 0)
            .count() as i32;

        (cycle as i32 * CYCLE_LENGTH - dropped_before + kept_in_cycle).min(last)
    }

    /// Insert `count` unmarked frames before `at`, shifting later marks.
    pub fn insert_frames(&mut self, at: i32, count: i32) {
        let count = count.max(0);
        let marked: Vec<i32> = self
            .frames()
            .map(|f| if f >= at { f + count } else { f })
            .collect();
        self.rebuild(self.source_frames + count, &marked);
    }

    /// Remove the frames `at..at + count`, shifting later marks back.
    ///
    /// Marks inside the removed span are discarded.
    pub fn remove_frames(&mut self, at: i32, count: i32) {
        let count = count.clamp(0, self.source_frames);
        let end = at + count;
        let marked: Vec<i32> = self
            .frames()
            .filter(|&f| f < at || f >= end)
            .map(|f| if f >= end { f - count } else { f })
            .collect();
        self.rebuild(self.source_frames - count, &marked);
    }

    fn rebuild(&mut self, source_frames: i32, marked: &[i32]) {
        *self = Self::new(source_frames);
        for &frame in marked {
            let (cycle, bit) = Self::split(frame);
            if let Some(mask) = self.cycles.get_mut(cycle) {
                if *mask & bit == 0 {
                    *mask |= bit;
                    self.decimated_frames -= 1;
                }
            }
        }
    }
}
