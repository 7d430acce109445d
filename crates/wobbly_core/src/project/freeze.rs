//! Freeze-frame registry.

use super::range::{FrameRange, RangeMap};
use super::types::FreezeFrame;
use super::WobblyProject;
use crate::error::{ProjectError, ProjectResult};

impl WobblyProject {
    /// Registered freeze frames, ordered by first frame.
    pub fn frozen_frames(&self) -> &RangeMap<FreezeFrame> {
        &self.frozen_frames
    }

    /// Replace frames `first..=last` with `replacement`.
    ///
    /// Reversed ends are swapped. Fails with `OutOfRange` if any value lies
    /// outside the trimmed source and with `Overlap` if the range shares a
    /// frame with an existing freeze frame.
    pub fn add_freeze_frame(&mut self, first: i32, last: i32, replacement: i32) -> ProjectResult<()> {
        let range = FrameRange::new(first, last);
        let candidate = FreezeFrame {
            first: range.first,
            last: range.last,
            replacement,
        };

        let frames = self.source_frames();
        let in_range = |f: i32| f >= 0 && f < frames;
        if !in_range(range.first) || !in_range(range.last) || !in_range(replacement) {
            return Err(ProjectError::out_of_range(format!(
                "Can't add freeze frame {}: values out of range.",
                candidate
            )));
        }

        if let Some(existing) = self.frozen_frames.find_overlap(range) {
            return Err(ProjectError::overlap(format!(
                "Can't add freeze frame {}: overlaps {}.",
                candidate, existing
            )));
        }

        self.frozen_frames.insert(candidate);
        Ok(())
    }

    /// Remove the freeze frame starting at `first`. Unknown starts are ignored.
    pub fn delete_freeze_frame(&mut self, first: i32) {
        self.frozen_frames.remove(first);
    }

    /// Freeze frame covering `frame`, if any.
    pub fn find_freeze_frame(&self, frame: i32) -> Option<&FreezeFrame> {
        self.frozen_frames.find(frame)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::project::tests::project_with_frames;
    use crate::project::FreezeFrame;

    #[test]
    fn overlapping_freeze_frame_is_rejected() {
        let mut project = project_with_frames(20);
        project.add_freeze_frame(3, 3, 10).unwrap();

        let err = project.add_freeze_frame(3, 3, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlap);
        assert!(err.to_string().contains("(3,3,10)"));
        assert_eq!(project.frozen_frames().len(), 1);
        assert_eq!(project.find_freeze_frame(3).unwrap().replacement, 10);
    }

    #[test]
    fn enclosing_range_is_an_overlap() {
        let mut project = project_with_frames(30);
        project.add_freeze_frame(10, 12, 9).unwrap();
        assert!(project.add_freeze_frame(5, 20, 4).is_err());
        assert!(project.add_freeze_frame(12, 15, 20).is_err());
        assert!(project.add_freeze_frame(8, 10, 0).is_err());
        project.add_freeze_frame(13, 15, 20).unwrap();
        assert_eq!(project.frozen_frames().len(), 2);
    }

    #[test]
    fn reversed_range_is_normalized() {
        let mut project = project_with_frames(20);
        project.add_freeze_frame(8, 5, 4).unwrap();
        assert_eq!(
            project.find_freeze_frame(6),
            Some(&FreezeFrame {
                first: 5,
                last: 8,
                replacement: 4
            })
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut project = project_with_frames(20);
        for (first, last, replacement) in [(-1, 2, 3), (0, 20, 3), (0, 2, 20), (0, 2, -1)] {
            let err = project.add_freeze_frame(first, last, replacement).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::OutOfRange);
        }
        assert!(project.frozen_frames().is_empty());
    }

    #[test]
    fn find_covers_exactly_registered_frames() {
        let mut project = project_with_frames(40);
        project.add_freeze_frame(2, 4, 1).unwrap();
        project.add_freeze_frame(10, 10, 11).unwrap();
        project.add_freeze_frame(30, 39, 29).unwrap();

        for frame in 0..40 {
            let expected = matches!(frame, 2..=4 | 10 | 30..=39);
            assert_eq!(project.find_freeze_frame(frame).is_some(), expected, "frame {}", frame);
        }

        project.delete_freeze_frame(10);
        assert!(project.find_freeze_frame(10).is_none());
        project.delete_freeze_frame(11);
        assert_eq!(project.frozen_frames().len(), 2);
    }
}
