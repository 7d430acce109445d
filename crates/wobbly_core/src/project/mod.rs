//! The editing session: per-frame annotations and every range registry.
//!
//! A [`WobblyProject`] owns all of its registries. Lookups hand out
//! borrowed views; every change goes through a validating method that
//! checks its arguments before mutating anything.
//!
//! # Example
//!
//! ```
//! use wobbly_core::project::{Match, WobblyProject};
//!
//! let mut project = WobblyProject::new("video.d2v", (30000, 1001), (720, 480));
//! project.add_trim(0, 99).unwrap();
//! project.add_freeze_frame(10, 12, 9).unwrap();
//! project.set_match(5, Match::N).unwrap();
//!
//! assert!(project.find_freeze_frame(11).is_some());
//! assert_eq!(project.source_frames(), 100);
//! ```

mod custom_lists;
mod decimation;
mod freeze;
mod matches;
mod presets;
mod range;
mod sections;
mod types;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::{iter, mem};

pub use decimation::{DecimationTracker, CYCLE_LENGTH};
pub use presets::{is_name_safe_for_script, DEFAULT_PRESET_CONTENTS};
pub use range::{FrameRange, RangeMap, Ranged};
pub use types::{
    Crop, CustomList, FilterChainPosition, FreezeFrame, Match, Mics, Preset, Resize, Section,
};

use crate::error::{ProjectError, ProjectResult};

/// One IVTC editing session.
#[derive(Debug, Clone)]
pub struct WobblyProject {
    pub(crate) project_path: Option<PathBuf>,
    pub(crate) input_file: String,
    pub(crate) fps_num: i64,
    pub(crate) fps_den: i64,
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) trims: RangeMap<FrameRange>,
    pub(crate) vfm_parameters: BTreeMap<String, f64>,
    pub(crate) vdecimate_parameters: BTreeMap<String, f64>,
    pub(crate) mics: Vec<Mics>,
    pub(crate) matches: Vec<Match>,
    pub(crate) original_matches: Vec<Match>,
    pub(crate) combed_frames: BTreeSet<i32>,
    pub(crate) decimation: DecimationTracker,
    pub(crate) decimate_metrics: Vec<i32>,
    pub(crate) sections: BTreeMap<i32, Section>,
    pub(crate) presets: BTreeMap<String, Preset>,
    pub(crate) frozen_frames: RangeMap<FreezeFrame>,
    pub(crate) custom_lists: Vec<CustomList>,
    pub(crate) resize: Resize,
    pub(crate) crop: Crop,
}

impl WobblyProject {
    /// Create an empty project for the given source.
    ///
    /// The project has no trims (and therefore no frames) until
    /// [`add_trim`](Self::add_trim) is called. The section at frame 0
    /// exists from the start.
    pub fn new(input_file: impl Into<String>, fps: (i64, i64), resolution: (i32, i32)) -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(0, Section::new(0));

        Self {
            project_path: None,
            input_file: input_file.into(),
            fps_num: fps.0,
            fps_den: fps.1,
            width: resolution.0,
            height: resolution.1,
            trims: RangeMap::new(),
            vfm_parameters: BTreeMap::new(),
            vdecimate_parameters: BTreeMap::new(),
            mics: Vec::new(),
            matches: Vec::new(),
            original_matches: Vec::new(),
            combed_frames: BTreeSet::new(),
            decimation: DecimationTracker::new(0),
            decimate_metrics: Vec::new(),
            sections,
            presets: BTreeMap::new(),
            frozen_frames: RangeMap::new(),
            custom_lists: Vec::new(),
            resize: Resize {
                enabled: false,
                width: resolution.0,
                height: resolution.1,
            },
            crop: Crop::default(),
        }
    }

    // ------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------

    /// Path of the file this project was last read from or written to.
    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    /// Source file loaded by the generated script.
    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    /// Input frame rate as (numerator, denominator).
    pub fn fps(&self) -> (i64, i64) {
        (self.fps_num, self.fps_den)
    }

    /// Input resolution as (width, height).
    pub fn resolution(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Frames after trimming.
    pub fn source_frames(&self) -> i32 {
        self.decimation.source_frames()
    }

    /// Frame count at a given point of the filter chain.
    pub fn frame_count(&self, position: FilterChainPosition) -> i32 {
        match position {
            FilterChainPosition::PostSource | FilterChainPosition::PostFieldMatch => {
                self.decimation.source_frames()
            }
            FilterChainPosition::PostDecimate => self.decimation.decimated_frames(),
        }
    }

    /// Field matcher parameters.
    pub fn vfm_parameters(&self) -> &BTreeMap<String, f64> {
        &self.vfm_parameters
    }

    /// Decimator parameters.
    pub fn vdecimate_parameters(&self) -> &BTreeMap<String, f64> {
        &self.vdecimate_parameters
    }

    /// Set one field matcher parameter.
    pub fn set_vfm_parameter(&mut self, name: impl Into<String>, value: f64) {
        self.vfm_parameters.insert(name.into(), value);
    }

    /// Set one decimator parameter.
    pub fn set_vdecimate_parameter(&mut self, name: impl Into<String>, value: f64) {
        self.vdecimate_parameters.insert(name.into(), value);
    }

    /// Format a frame number as `HH:MM:SS.mmm` at the input frame rate.
    pub fn frame_to_time(&self, frame: i32) -> String {
        if self.fps_num <= 0 || self.fps_den <= 0 {
            return "00:00:00.000".to_string();
        }

        let frame = i64::from(frame.max(0));
        let milliseconds = (frame * self.fps_den * 1000 / self.fps_num) % 1000;
        let seconds_total = frame * self.fps_den / self.fps_num;
        let seconds = seconds_total % 60;
        let minutes = (seconds_total / 60) % 60;
        let hours = seconds_total / 3600;

        format!(
            "{:02}:{:02}:{:02}.{:03}",
            hours, minutes, seconds, milliseconds
        )
    }

    pub(crate) fn check_frame(&self, frame: i32, what: impl FnOnce() -> String) -> ProjectResult<()> {
        if frame < 0 || frame >= self.source_frames() {
            return Err(ProjectError::out_of_range(format!(
                "{}: value out of range.",
                what()
            )));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Trims
    // ------------------------------------------------------------------

    /// Trimmed ranges of the source, ordered by first frame.
    pub fn trims(&self) -> &RangeMap<FrameRange> {
        &self.trims
    }

    /// Keep the source frames `first..=last`.
    ///
    /// The new frames are spliced in at the trim's position. Per-frame
    /// data gets defaults there and later annotations shift up.
    pub fn add_trim(&mut self, first: i32, last: i32) -> ProjectResult<()> {
        let range = FrameRange::new(first, last);

        if range.first < 0 {
            return Err(ProjectError::out_of_range(format!(
                "Can't add trim {}: values out of range.",
                range
            )));
        }

        if let Some(existing) = self.trims.find_overlap(range) {
            return Err(ProjectError::overlap(format!(
                "Can't add trim {}: overlaps {}.",
                range, existing
            )));
        }

        let at = self.trim_offset(range.first);
        self.trims.insert(range);
        self.insert_frame_data(at, range.len());
        Ok(())
    }

    /// Remove the trim starting at `first`.
    ///
    /// Per-frame data of the removed frames is dropped and later
    /// annotations shift down to stay on the frames they describe.
    pub fn delete_trim(&mut self, first: i32) -> ProjectResult<()> {
        let at = self.trim_offset(first);
        let removed = self.trims.remove(first).ok_or_else(|| {
            ProjectError::not_found(format!("Can't delete trim starting at {}: no such trim.", first))
        })?;

        self.remove_frame_data(at, removed.len());
        Ok(())
    }

    /// Frame index, after trimming, of the first frame of a trim starting at `first`.
    fn trim_offset(&self, first: i32) -> i32 {
        self.trims
            .iter()
            .take_while(|trim| trim.first < first)
            .map(|trim| trim.len())
            .sum()
    }

    /// Frames left after decimation before frame `at`.
    fn decimated_offset(&self, at: i32) -> i32 {
        at - self.decimation.frames().take_while(|&f| f < at).count() as i32
    }

    fn insert_frame_data(&mut self, at: i32, count: i32) {
        let index = at as usize;
        let len = count as usize;

        self.mics.splice(index..index, iter::repeat([0; 5]).take(len));
        self.matches.splice(index..index, iter::repeat(Match::C).take(len));
        self.original_matches
            .splice(index..index, iter::repeat(Match::C).take(len));
        self.decimate_metrics.splice(index..index, iter::repeat(0).take(len));

        let decimated_at = self.decimated_offset(at);
        self.decimation.insert_frames(at, count);

        let shift = |frame: i32, from: i32| if frame >= from { frame + count } else { frame };

        self.combed_frames = mem::take(&mut self.combed_frames)
            .into_iter()
            .map(|f| shift(f, at))
            .collect();

        // The section at 0 stays put; frames inserted before a later
        // section join the one before it.
        self.sections = mem::take(&mut self.sections)
            .into_values()
            .map(|mut section| {
                if section.start > 0 {
                    section.start = shift(section.start, at);
                }
                (section.start, section)
            })
            .collect();

        self.frozen_frames.remap(|ff| {
            Some(FreezeFrame {
                first: shift(ff.first, at),
                last: shift(ff.last, at),
                replacement: shift(ff.replacement, at),
            })
        });

        for list in &mut self.custom_lists {
            let from = match list.position {
                FilterChainPosition::PostDecimate => decimated_at,
                _ => at,
            };
            list.frames.remap(|r| {
                Some(FrameRange {
                    first: shift(r.first, from),
                    last: shift(r.last, from),
                })
            });
        }
    }

    fn remove_frame_data(&mut self, at: i32, count: i32) {
        let end = at + count;
        let span = at as usize..end as usize;

        self.mics.drain(span.clone());
        self.matches.drain(span.clone());
        self.original_matches.drain(span.clone());
        self.decimate_metrics.drain(span);

        let decimated_at = self.decimated_offset(at);
        let decimated_count = self.decimated_offset(end) - decimated_at;
        self.decimation.remove_frames(at, count);
        let frames = self.source_frames();

        self.combed_frames = mem::take(&mut self.combed_frames)
            .into_iter()
            .filter_map(|f| cut_frame(f, at, count))
            .collect();

        // Sections starting inside the removed span collapse onto the first
        // surviving frame after it. Ascending order leaves the one that
        // covered that frame in place.
        let mut sections = BTreeMap::new();
        for mut section in mem::take(&mut self.sections).into_values() {
            let start = match cut_frame(section.start, at, count) {
                Some(start) => start,
                None if at < frames => at,
                None => continue,
            };
            section.start = start;
            sections.insert(start, section);
        }
        sections.entry(0).or_insert_with(|| Section::new(0));
        self.sections = sections;

        self.frozen_frames.remap(|ff| {
            let range = cut_range(ff.range(), at, count)?;
            Some(FreezeFrame {
                first: range.first,
                last: range.last,
                replacement: cut_frame(ff.replacement, at, count)?,
            })
        });

        for list in &mut self.custom_lists {
            let (from, removed) = match list.position {
                FilterChainPosition::PostDecimate => (decimated_at, decimated_count),
                _ => (at, count),
            };
            list.frames.remap(|r| cut_range(*r, from, removed));
        }
    }

    // ------------------------------------------------------------------
    // Raw per-frame metrics
    // ------------------------------------------------------------------

    /// Combing metrics per frame.
    pub fn mics(&self) -> &[Mics] {
        &self.mics
    }

    /// Replace all mics. The length must equal the frame count.
    pub fn set_mics(&mut self, mics: Vec<Mics>) -> ProjectResult<()> {
        self.check_len("mics", mics.len())?;
        self.mics = mics;
        Ok(())
    }

    /// Current matches.
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    /// Matches as produced by the field matcher.
    pub fn original_matches(&self) -> &[Match] {
        &self.original_matches
    }

    /// Replace the original matches and reset the current ones to them.
    pub fn set_original_matches(&mut self, matches: Vec<Match>) -> ProjectResult<()> {
        self.check_len("original matches", matches.len())?;
        self.matches = matches.clone();
        self.original_matches = matches;
        Ok(())
    }

    /// Decimation metric per frame.
    pub fn decimate_metrics(&self) -> &[i32] {
        &self.decimate_metrics
    }

    /// Replace the decimation metrics. The length must equal the frame count.
    pub fn set_decimate_metrics(&mut self, metrics: Vec<i32>) -> ProjectResult<()> {
        self.check_len("decimate metrics", metrics.len())?;
        self.decimate_metrics = metrics;
        Ok(())
    }

    fn check_len(&self, what: &str, len: usize) -> ProjectResult<()> {
        if len != self.source_frames() as usize {
            return Err(ProjectError::out_of_range(format!(
                "Can't set {}: got {} entries, expected {}.",
                what,
                len,
                self.source_frames()
            )));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Decimation
    // ------------------------------------------------------------------

    /// Decimation state.
    pub fn decimation(&self) -> &DecimationTracker {
        &self.decimation
    }

    /// Mark a frame for dropping.
    pub fn add_decimated_frame(&mut self, frame: i32) -> ProjectResult<()> {
        self.decimation.add(frame).map(|_| ())
    }

    /// Unmark a frame.
    pub fn delete_decimated_frame(&mut self, frame: i32) -> ProjectResult<()> {
        self.decimation.remove(frame).map(|_| ())
    }

    /// Whether a frame is marked for dropping.
    pub fn is_decimated_frame(&self, frame: i32) -> ProjectResult<bool> {
        self.decimation.contains(frame)
    }

    /// Unmark every frame in the cycle containing `frame`.
    pub fn clear_decimated_frames_from_cycle(&mut self, frame: i32) -> ProjectResult<()> {
        self.decimation.clear_cycle(frame).map(|_| ())
    }

    /// Map a source frame to its index after decimation, clamping bad input.
    pub fn frame_number_after_decimation(&self, frame: i32) -> i32 {
        self.decimation.frame_after_decimation(frame)
    }

    // ------------------------------------------------------------------
    // Combed frames
    // ------------------------------------------------------------------

    /// Frames flagged as combed.
    pub fn combed_frames(&self) -> &BTreeSet<i32> {
        &self.combed_frames
    }

    /// Flag a frame as combed.
    pub fn add_combed_frame(&mut self, frame: i32) -> ProjectResult<()> {
        self.check_frame(frame, || format!("Can't mark frame {} as combed", frame))?;
        self.combed_frames.insert(frame);
        Ok(())
    }

    /// Clear the combed flag of a frame.
    pub fn delete_combed_frame(&mut self, frame: i32) {
        self.combed_frames.remove(&frame);
    }

    /// Whether a frame is flagged as combed.
    pub fn is_combed_frame(&self, frame: i32) -> bool {
        self.combed_frames.contains(&frame)
    }

    // ------------------------------------------------------------------
    // Crop and resize
    // ------------------------------------------------------------------

    /// Crop settings.
    pub fn crop(&self) -> &Crop {
        &self.crop
    }

    /// Set the crop margins. Negative margins are rejected.
    pub fn set_crop(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> ProjectResult<()> {
        if left < 0 || top < 0 || right < 0 || bottom < 0 {
            return Err(ProjectError::out_of_range(format!(
                "Can't crop ({},{},{},{}): negative values.",
                left, top, right, bottom
            )));
        }

        self.crop.left = left;
        self.crop.top = top;
        self.crop.right = right;
        self.crop.bottom = bottom;
        Ok(())
    }

    /// Enable or disable cropping.
    pub fn set_crop_enabled(&mut self, enabled: bool) {
        self.crop.enabled = enabled;
    }

    /// Resize settings.
    pub fn resize(&self) -> &Resize {
        &self.resize
    }

    /// Set the output size. Both dimensions must be positive.
    pub fn set_resize(&mut self, width: i32, height: i32) -> ProjectResult<()> {
        if width <= 0 || height <= 0 {
            return Err(ProjectError::out_of_range(format!(
                "Can't resize to {}x{}: dimensions must be positive.",
                width, height
            )));
        }

        self.resize.width = width;
        self.resize.height = height;
        Ok(())
    }

    /// Enable or disable resizing.
    pub fn set_resize_enabled(&mut self, enabled: bool) {
        self.resize.enabled = enabled;
    }
}

/// Index of `frame` once `at..at + count` is removed, or `None` if it was removed.
fn cut_frame(frame: i32, at: i32, count: i32) -> Option<i32> {
    if frame < at {
        Some(frame)
    } else if frame >= at + count {
        Some(frame - count)
    } else {
        None
    }
}

/// What is left of `range` once `at..at + count` is removed.
fn cut_range(range: FrameRange, at: i32, count: i32) -> Option<FrameRange> {
    let end = at + count;
    let first = if range.first < at {
        range.first
    } else if range.first >= end {
        range.first - count
    } else {
        at
    };
    let last = if range.last < at {
        range.last
    } else if range.last >= end {
        range.last - count
    } else {
        at - 1
    };

    (first <= last).then_some(FrameRange { first, last })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Project with a single trim covering `frames` frames.
    pub(crate) fn project_with_frames(frames: i32) -> WobblyProject {
        let mut project = WobblyProject::new("source.d2v", (30000, 1001), (720, 480));
        if frames > 0 {
            project.add_trim(0, frames - 1).unwrap();
        }
        project
    }

    #[test]
    fn new_project_has_default_section() {
        let project = WobblyProject::new("a.d2v", (30000, 1001), (720, 480));
        assert_eq!(project.source_frames(), 0);
        assert_eq!(project.sections().count(), 1);
        assert_eq!(project.section_start(0), 0);
    }

    #[test]
    fn trims_define_frame_count() {
        let mut project = project_with_frames(0);
        project.add_trim(100, 199).unwrap();
        project.add_trim(0, 49).unwrap();
        assert_eq!(project.source_frames(), 150);
        assert_eq!(project.matches().len(), 150);
        assert_eq!(project.mics().len(), 150);
        assert_eq!(project.frame_count(FilterChainPosition::PostDecimate), 150);

        let err = project.add_trim(40, 60).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlap);
        assert_eq!(project.source_frames(), 150);
    }

    #[test]
    fn delete_trim_drops_annotations_past_end() {
        let mut project = project_with_frames(0);
        project.add_trim(0, 9).unwrap();
        project.add_trim(20, 29).unwrap();
        project.add_section(15).unwrap();
        project.add_freeze_frame(12, 13, 2).unwrap();
        project.add_combed_frame(18).unwrap();
        project.add_decimated_frame(17).unwrap();

        project.delete_trim(20).unwrap();

        assert_eq!(project.source_frames(), 10);
        assert!(project.find_next_section(0).is_none());
        assert!(project.frozen_frames().is_empty());
        assert!(!project.is_combed_frame(18));
        assert_eq!(project.frame_count(FilterChainPosition::PostDecimate), 10);

        let err = project.delete_trim(20).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn deleting_first_trim_keeps_data_of_remaining_trim() {
        let mut project = project_with_frames(0);
        project.add_trim(0, 9).unwrap();
        project.add_trim(20, 29).unwrap();

        let mut originals = vec![Match::C; 20];
        originals[10] = Match::N;
        project.set_original_matches(originals).unwrap();
        let mut mics = vec![[0; 5]; 20];
        mics[11] = [1, 2, 3, 4, 5];
        project.set_mics(mics).unwrap();
        project.add_freeze_frame(12, 13, 11).unwrap();
        project.add_section(15).unwrap();
        project.add_combed_frame(18).unwrap();
        project.add_decimated_frame(17).unwrap();

        project.delete_trim(0).unwrap();

        assert_eq!(project.source_frames(), 10);
        assert_eq!(project.matches()[0], Match::N);
        assert_eq!(project.original_matches()[0], Match::N);
        assert_eq!(project.mics()[1], [1, 2, 3, 4, 5]);
        assert_eq!(
            project.find_freeze_frame(3),
            Some(&FreezeFrame {
                first: 2,
                last: 3,
                replacement: 1
            })
        );
        assert!(project.section(5).is_some());
        assert!(project.is_combed_frame(8));
        assert!(project.is_decimated_frame(7).unwrap());
        assert_eq!(project.frame_count(FilterChainPosition::PostDecimate), 9);
    }

    #[test]
    fn adding_earlier_trim_shifts_existing_data() {
        let mut project = project_with_frames(0);
        project.add_trim(100, 104).unwrap();
        project.set_original_matches(vec![Match::N; 5]).unwrap();
        project.add_combed_frame(2).unwrap();
        project.add_section(3).unwrap();
        project.add_freeze_frame(1, 2, 4).unwrap();
        project
            .add_custom_list(CustomList::new("fix", FilterChainPosition::PostSource))
            .unwrap();
        project.add_custom_list_range("fix", 1, 2).unwrap();

        project.add_trim(0, 4).unwrap();

        let matches: String = project.matches().iter().map(|m| m.as_char()).collect();
        assert_eq!(matches, "cccccnnnnn");
        assert!(project.is_combed_frame(7));
        assert!(!project.is_combed_frame(2));
        assert!(project.section(8).is_some());
        assert_eq!(project.section_start(4), 0);
        assert_eq!(project.find_freeze_frame(6).map(|ff| ff.replacement), Some(9));
        let list = project.custom_list("fix").unwrap();
        assert_eq!(
            list.frames.iter().copied().collect::<Vec<_>>(),
            vec![FrameRange::new(6, 7)]
        );
    }

    #[test]
    fn deleting_middle_trim_collapses_sections_and_decimated_lists() {
        let mut project = project_with_frames(0);
        project.add_trim(0, 4).unwrap();
        project.add_trim(10, 14).unwrap();
        project.add_trim(20, 24).unwrap();
        for frame in [2, 7, 12] {
            project.add_decimated_frame(frame).unwrap();
        }
        project.add_section(3).unwrap();
        project.add_section(7).unwrap();
        project.add_preset("fix").unwrap();
        project
            .add_custom_list(
                CustomList::new("cleanup", FilterChainPosition::PostDecimate).with_preset("fix"),
            )
            .unwrap();
        // Decimated frames 9..=10 are source frames 11 and 13.
        project.add_custom_list_range("cleanup", 9, 10).unwrap();

        project.delete_trim(10).unwrap();

        assert_eq!(project.source_frames(), 10);
        assert_eq!(project.decimation().frames().collect::<Vec<_>>(), vec![2, 7]);
        assert_eq!(project.section_start(4), 3);
        assert_eq!(project.section_start(5), 5);
        assert!(project.section(7).is_none());

        let list = project.custom_list("cleanup").unwrap();
        assert_eq!(
            list.frames.iter().copied().collect::<Vec<_>>(),
            vec![FrameRange::new(5, 6)]
        );
    }

    #[test]
    fn deleting_every_trim_keeps_default_section() {
        let mut project = project_with_frames(10);
        project.add_section(4).unwrap();
        project.delete_trim(0).unwrap();
        assert_eq!(project.source_frames(), 0);
        assert!(project.matches().is_empty());
        assert_eq!(project.sections().count(), 1);
        assert!(project.section(0).is_some());
    }

    #[test]
    fn raw_metric_lengths_are_checked() {
        let mut project = project_with_frames(5);
        assert!(project.set_mics(vec![[0; 5]; 4]).is_err());
        project.set_mics(vec![[1, 2, 3, 4, 5]; 5]).unwrap();
        assert_eq!(project.mics()[4], [1, 2, 3, 4, 5]);

        project
            .set_original_matches(vec![Match::N, Match::C, Match::C, Match::C, Match::N])
            .unwrap();
        assert_eq!(project.matches()[0], Match::N);
        assert!(project.set_decimate_metrics(vec![0; 6]).is_err());
    }

    #[test]
    fn frame_to_time_formats_ntsc() {
        let project = project_with_frames(1);
        assert_eq!(project.frame_to_time(0), "00:00:00.000");
        assert_eq!(project.frame_to_time(30), "00:00:01.001");
        assert_eq!(project.frame_to_time(107893), "01:00:00.029");
    }

    #[test]
    fn combed_frames_are_validated() {
        let mut project = project_with_frames(10);
        project.add_combed_frame(3).unwrap();
        assert!(project.is_combed_frame(3));
        assert!(project.add_combed_frame(10).is_err());
        project.delete_combed_frame(3);
        assert!(!project.is_combed_frame(3));
    }

    #[test]
    fn crop_and_resize_validate_values() {
        let mut project = project_with_frames(10);
        assert!(project.set_crop(-1, 0, 0, 0).is_err());
        project.set_crop(8, 0, 8, 0).unwrap();
        project.set_crop_enabled(true);
        assert_eq!(project.crop().left, 8);
        assert!(project.crop().enabled);

        assert!(project.set_resize(0, 480).is_err());
        project.set_resize(640, 480).unwrap();
        assert_eq!(project.resize().width, 640);
        assert!(!project.resize().enabled);
    }
}
