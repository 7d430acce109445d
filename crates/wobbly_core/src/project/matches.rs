//! Match editing and pattern application.

use super::decimation::CYCLE_LENGTH;
use super::types::Match;
use super::WobblyProject;
use crate::error::{ProjectError, ProjectResult};

fn parse_match_pattern(pattern: &str) -> ProjectResult<[Match; 5]> {
    let letters: Vec<Match> = pattern.chars().filter_map(Match::from_char).collect();
    if pattern.chars().count() != CYCLE_LENGTH as usize || letters.len() != CYCLE_LENGTH as usize {
        return Err(ProjectError::malformed(format!(
            "Match pattern '{}' must be exactly 5 of the letters p, c, n, b, u.",
            pattern
        )));
    }
    Ok([letters[0], letters[1], letters[2], letters[3], letters[4]])
}

fn parse_decimation_pattern(pattern: &str) -> ProjectResult<[bool; 5]> {
    let drops: Vec<bool> = pattern
        .chars()
        .filter_map(|c| match c {
            'd' => Some(true),
            'k' => Some(false),
            _ => None,
        })
        .collect();
    if pattern.chars().count() != CYCLE_LENGTH as usize || drops.len() != CYCLE_LENGTH as usize {
        return Err(ProjectError::malformed(format!(
            "Decimation pattern '{}' must be exactly 5 of the letters d (drop) and k (keep).",
            pattern
        )));
    }
    Ok([drops[0], drops[1], drops[2], drops[3], drops[4]])
}

impl WobblyProject {
    /// Set the match of one frame.
    pub fn set_match(&mut self, frame: i32, m: Match) -> ProjectResult<()> {
        self.check_frame(frame, || format!("Can't set the match of frame {}", frame))?;
        self.matches[frame as usize] = m;
        Ok(())
    }

    /// Step a frame's match through n, c, p.
    ///
    /// The first frame never gets `p` and the last frame never gets `n`;
    /// `b` and `u` become `c`. Returns the new match.
    pub fn cycle_match(&mut self, frame: i32) -> ProjectResult<Match> {
        self.check_frame(frame, || format!("Can't cycle the match of frame {}", frame))?;

        let last = self.source_frames() - 1;
        let next = match self.matches[frame as usize] {
            Match::N => Match::C,
            Match::C if frame == 0 => Match::N,
            Match::C => Match::P,
            Match::P if frame == last => Match::C,
            Match::P => Match::N,
            Match::B | Match::U => Match::C,
        };

        self.matches[frame as usize] = next;
        Ok(next)
    }

    /// Restore original matches for `start..=end`.
    pub fn reset_range_matches(&mut self, start: i32, end: i32) -> ProjectResult<()> {
        let (start, end) = if start > end { (end, start) } else { (start, end) };

        if start < 0 || end >= self.source_frames() {
            return Err(ProjectError::out_of_range(format!(
                "Can't reset the matches for range [{},{}]: values out of range.",
                start, end
            )));
        }

        let range = start as usize..=end as usize;
        self.matches[range.clone()].copy_from_slice(&self.original_matches[range]);
        Ok(())
    }

    /// Restore original matches for the section starting at `section_start`.
    pub fn reset_section_matches(&mut self, section_start: i32) -> ProjectResult<()> {
        let end = self.section_end(section_start);
        self.reset_range_matches(section_start, end - 1)
    }

    /// Apply a 5-letter match pattern across a section, starting at its
    /// first frame.
    ///
    /// The first frame of the source keeps its match when the pattern
    /// asks for `p` or `b`, and the last frame when it asks for `n` or `u`.
    pub fn set_section_matches_from_pattern(
        &mut self,
        section_start: i32,
        pattern: &str,
    ) -> ProjectResult<()> {
        let pattern = parse_match_pattern(pattern)?;
        self.check_frame(section_start, || {
            format!("Can't apply a match pattern to section {}", section_start)
        })?;

        let end = self.section_end(section_start);
        let last = self.source_frames() - 1;

        for frame in section_start..end {
            let m = pattern[((frame - section_start) % CYCLE_LENGTH) as usize];
            let incompatible = (frame == 0 && matches!(m, Match::P | Match::B))
                || (frame == last && matches!(m, Match::N | Match::U));
            if !incompatible {
                self.matches[frame as usize] = m;
            }
        }
        Ok(())
    }

    /// Apply a 5-letter decimation pattern (`d` drop, `k` keep) across a
    /// section, starting at its first frame.
    pub fn set_section_decimation_from_pattern(
        &mut self,
        section_start: i32,
        pattern: &str,
    ) -> ProjectResult<()> {
        let pattern = parse_decimation_pattern(pattern)?;
        self.check_frame(section_start, || {
            format!("Can't apply a decimation pattern to section {}", section_start)
        })?;

        let end = self.section_end(section_start);
        for frame in section_start..end {
            if pattern[((frame - section_start) % CYCLE_LENGTH) as usize] {
                self.decimation.add(frame)?;
            } else {
                self.decimation.remove(frame)?;
            }
        }
        Ok(())
    }
}
