//! Pattern guessing from the field matcher's original matches.
//!
//! A telecined section shows an `n` match followed by a `c` match once
//! per cycle, always at the same cycle position. Finding that position
//! tells us which two frames are duplicates: the matches of the whole
//! section are rewritten from a fixed template and one of the duplicates
//! is marked for decimation in every cycle.

mod types;

pub use types::{
    DropDuplicate, GuessOptions, GuessReport, GuessThresholds, SectionGuess, SkipReason,
    ThirdNMatch,
};

use crate::error::{ProjectError, ProjectResult};
use crate::project::{Match, WobblyProject, CYCLE_LENGTH};

/// Match templates, indexed by the position of the first duplicate.
const PATTERNS: [&str; 5] = ["ncccn", "nnccc", "cnncc", "ccnnc", "cccnn"];

fn pattern_for(best: i32, third_n_match: ThirdNMatch) -> [Match; 5] {
    let mut pattern = [Match::C; 5];
    for (slot, c) in pattern.iter_mut().zip(PATTERNS[best as usize].chars()) {
        *slot = Match::from_char(c).unwrap_or(Match::C);
    }
    if third_n_match == ThirdNMatch::Always {
        pattern[((best + 3) % CYCLE_LENGTH) as usize] = Match::N;
    }
    pattern
}

/// Index of the first maximum, optionally ignoring one position.
fn first_max(counts: &[i32; 5], skip: Option<usize>) -> usize {
    let mut best = 0;
    let mut best_count = -1;
    for (position, &count) in counts.iter().enumerate() {
        if Some(position) == skip {
            continue;
        }
        if count > best_count {
            best_count = count;
            best = position;
        }
    }
    best
}

impl WobblyProject {
    /// Guess the telecine pattern of one section and apply it.
    ///
    /// Only frames of the section are touched. Decimation marks in the
    /// parts of boundary cycles owned by neighbouring sections survive.
    pub fn guess_section_patterns_from_matches(
        &mut self,
        section_start: i32,
        options: &GuessOptions,
    ) -> ProjectResult<SectionGuess> {
        if !self.sections.contains_key(&section_start) {
            return Err(ProjectError::not_found(format!(
                "Can't guess patterns for section {}: no such section.",
                section_start
            )));
        }

        let section_end = self.section_end(section_start);
        if section_end <= section_start {
            return Ok(SectionGuess::Skipped(SkipReason::TooShort { length: 0 }));
        }
        let scan_end = section_end.min(self.source_frames() - 1);

        let mut positions = [0i32; 5];
        let mut total = 0;
        for i in section_start..scan_end {
            if self.original_matches[i as usize] == Match::N
                && self.original_matches[i as usize + 1] == Match::C
            {
                positions[(i % CYCLE_LENGTH) as usize] += 1;
                total += 1;
            }
        }

        let best = first_max(&positions, None);
        let next_best = first_max(&positions, Some(best));

        let (best_percent, next_best_percent) = if total > 0 {
            (
                positions[best] as f32 * 100.0 / total as f32,
                positions[next_best] as f32 * 100.0 / total as f32,
            )
        } else {
            (0.0, 0.0)
        };

        let thresholds = &options.thresholds;
        if best_percent <= thresholds.min_best_percent
            || best_percent - next_best_percent <= thresholds.min_margin_percent
        {
            tracing::debug!(
                "Section {}: no dominant pattern (best {:.1}%, next best {:.1}%)",
                section_start,
                best_percent,
                next_best_percent
            );
            return Ok(SectionGuess::Skipped(SkipReason::NoDominantPattern {
                best_percent,
                next_best_percent,
            }));
        }

        let best = best as i32;

        // With the first duplicate in the last slot the pair straddles two
        // cycles, so there is no per-cycle choice to make.
        let mut policy = options.drop_duplicate;
        if policy == DropDuplicate::UglierPerCycle && best == 4 {
            policy = DropDuplicate::UglierPerSection;
        }

        let section_drop = match policy {
            DropDuplicate::First => Some(best),
            DropDuplicate::Second => Some((best + 1) % CYCLE_LENGTH),
            DropDuplicate::UglierPerSection => {
                Some(self.uglier_duplicate_in_section(section_start, scan_end, best))
            }
            DropDuplicate::UglierPerCycle => None,
        };

        self.apply_guessed_decimation(section_start, section_end, best, section_drop)?;
        self.apply_guessed_matches(section_start, section_end, best, options.third_n_match);

        tracing::info!(
            "Section {}: duplicates at position {} ({:.1}%), dropping {:?}",
            section_start,
            best,
            best_percent,
            section_drop
        );

        Ok(SectionGuess::Applied {
            best,
            drop: section_drop,
        })
    }

    /// Guess every section at least `minimum_length` frames long.
    pub fn guess_project_patterns_from_matches(
        &mut self,
        minimum_length: i32,
        options: &GuessOptions,
    ) -> ProjectResult<GuessReport> {
        let starts: Vec<i32> = self.sections.keys().copied().collect();
        let mut report = GuessReport::default();

        for start in starts {
            let length = self.section_end(start) - start;
            let outcome = if length < minimum_length {
                tracing::debug!("Section {}: too short to guess ({} frames)", start, length);
                SectionGuess::Skipped(SkipReason::TooShort { length })
            } else {
                self.guess_section_patterns_from_matches(start, options)?
            };
            report.sections.push((start, outcome));
        }

        tracing::info!(
            "Guessed patterns: {} applied, {} too short, {} without a clear pattern",
            report.applied().count(),
            report.too_short().count(),
            report.ambiguous().count()
        );
        Ok(report)
    }

    /// Position to drop when the side with the worse mic wins most cycles.
    fn uglier_duplicate_in_section(&self, start: i32, scan_end: i32, best: i32) -> i32 {
        let mut drop_n = 0;
        let mut drop_c = 0;

        for i in (start..scan_end).filter(|i| i % CYCLE_LENGTH == best) {
            let mic_n = self.mics[i as usize][Match::N.mic_index()];
            let mic_c = self.mics[i as usize + 1][Match::C.mic_index()];
            if mic_n > mic_c {
                drop_n += 1;
            } else {
                drop_c += 1;
            }
        }

        if drop_n > drop_c {
            best
        } else {
            (best + 1) % CYCLE_LENGTH
        }
    }

    fn uglier_duplicate_in_cycle(&self, cycle: i32, best: i32) -> i32 {
        let first = (cycle * CYCLE_LENGTH + best) as usize;
        let mic_n = self.mics.get(first).map_or(0, |m| m[Match::N.mic_index()]);
        let mic_c = self.mics.get(first + 1).map_or(0, |m| m[Match::C.mic_index()]);
        if mic_n > mic_c {
            best
        } else {
            (best + 1) % CYCLE_LENGTH
        }
    }

    fn apply_guessed_decimation(
        &mut self,
        section_start: i32,
        section_end: i32,
        best: i32,
        section_drop: Option<i32>,
    ) -> ProjectResult<()> {
        let first_cycle = section_start / CYCLE_LENGTH;
        let last_cycle = (section_end - 1) / CYCLE_LENGTH;
        let start_position = section_start % CYCLE_LENGTH;
        let end_position = (section_end - 1) % CYCLE_LENGTH;

        for cycle in first_cycle..=last_cycle {
            let drop = match section_drop {
                Some(drop) => drop,
                None => {
                    let mut forced = None;
                    if cycle == first_cycle {
                        if start_position > best + 1 {
                            continue;
                        } else if start_position > best {
                            forced = Some(best + 1);
                        }
                    }
                    if cycle == last_cycle && forced.is_none() {
                        if end_position < best {
                            continue;
                        } else if end_position < best + 1 {
                            forced = Some(best);
                        }
                    }
                    forced.unwrap_or_else(|| self.uglier_duplicate_in_cycle(cycle, best))
                }
            };

            let cycle_start = cycle * CYCLE_LENGTH;
            let from = cycle_start.max(section_start);
            let to = (cycle_start + CYCLE_LENGTH).min(section_end);
            for frame in from..to {
                self.decimation.remove(frame)?;
            }

            let frame = cycle_start + drop;
            if frame >= section_start && frame < section_end {
                self.decimation.add(frame)?;
            }
        }

        Ok(())
    }

    fn apply_guessed_matches(
        &mut self,
        section_start: i32,
        section_end: i32,
        best: i32,
        third_n_match: ThirdNMatch,
    ) {
        let pattern = pattern_for(best, third_n_match);

        for i in section_start..section_end {
            let slot = (i % CYCLE_LENGTH) as usize;
            let next_slot = ((i + 1) % CYCLE_LENGTH) as usize;
            let frame = i as usize;

            self.matches[frame] = if third_n_match == ThirdNMatch::IfPrettier
                && pattern[slot] == Match::C
                && pattern[next_slot] == Match::N
            {
                let mic_n = self.mics[frame][Match::N.mic_index()];
                let mic_c = self.mics[frame][Match::C.mic_index()];
                if mic_n < mic_c {
                    Match::N
                } else {
                    Match::C
                }
            } else {
                pattern[slot]
            };
        }

        // A last frame that looks much worse than its p match gets the p match.
        let last = (section_end - 1) as usize;
        let mic_chosen = i32::from(self.mics[last][self.matches[last].mic_index()]);
        let mic_p = i32::from(self.mics[last][Match::P.mic_index()]);
        if mic_chosen > mic_p * 2 {
            self.matches[last] = Match::P;
        }
    }
}
