//! Section registry.
//!
//! Sections partition the trimmed source. Each one runs from its start
//! up to the next section's start, or to the end of the source.

use super::types::Section;
use super::WobblyProject;
use crate::error::{ProjectError, ProjectResult};

impl WobblyProject {
    /// All sections in ascending order of start frame.
    pub fn sections(&self) -> impl DoubleEndedIterator<Item = &Section> + '_ {
        self.sections.values()
    }

    /// Add a section with no presets at `start`.
    pub fn add_section(&mut self, start: i32) -> ProjectResult<()> {
        self.add_section_with(Section::new(start))
    }

    /// Add a fully specified section, replacing any section at the same start.
    pub fn add_section_with(&mut self, section: Section) -> ProjectResult<()> {
        if section.start < 0 || section.start >= self.source_frames() {
            return Err(ProjectError::out_of_range(format!(
                "Can't add section starting at {}: value out of range.",
                section.start
            )));
        }

        self.sections.insert(section.start, section);
        Ok(())
    }

    /// Remove the section starting at `start`. The section at 0 is kept.
    pub fn delete_section(&mut self, start: i32) {
        if start > 0 {
            self.sections.remove(&start);
        }
    }

    /// Section starting exactly at `start`.
    pub fn section(&self, start: i32) -> Option<&Section> {
        self.sections.get(&start)
    }

    /// Section containing `frame`: the one with the greatest start `<= frame`.
    ///
    /// Frames before 0 resolve to the first section. Only `None` if the
    /// section map was emptied, which no public operation allows.
    pub fn find_section(&self, frame: i32) -> Option<&Section> {
        self.sections
            .range(..=frame)
            .next_back()
            .or_else(|| self.sections.iter().next())
            .map(|(_, section)| section)
    }

    /// Start of the section containing `frame`.
    pub fn section_start(&self, frame: i32) -> i32 {
        self.find_section(frame).map_or(0, |section| section.start)
    }

    /// First section starting after `frame`.
    pub fn find_next_section(&self, frame: i32) -> Option<&Section> {
        let start = frame.checked_add(1)?;
        self.sections.range(start..).next().map(|(_, section)| section)
    }

    /// First frame after the section containing `frame`.
    pub fn section_end(&self, frame: i32) -> i32 {
        self.find_next_section(frame)
            .map_or(self.source_frames(), |next| next.start)
    }

    /// Append a preset to a section's chain. The same preset may appear twice.
    pub fn assign_preset_to_section(&mut self, preset: &str, section_start: i32) -> ProjectResult<()> {
        if !self.presets.contains_key(preset) {
            return Err(ProjectError::not_found(format!(
                "Can't assign preset '{}' to section {}: no such preset.",
                preset, section_start
            )));
        }

        let section = self.sections.get_mut(&section_start).ok_or_else(|| {
            ProjectError::not_found(format!(
                "Can't assign preset '{}' to section {}: no such section.",
                preset, section_start
            ))
        })?;

        section.presets.push(preset.to_string());
        Ok(())
    }

    /// Remove the first occurrence of a preset from a section's chain.
    pub fn remove_preset_from_section(&mut self, preset: &str, section_start: i32) -> ProjectResult<()> {
        let section = self.sections.get_mut(&section_start).ok_or_else(|| {
            ProjectError::not_found(format!(
                "Can't remove preset '{}' from section {}: no such section.",
                preset, section_start
            ))
        })?;

        let index = section.presets.iter().position(|p| p == preset).ok_or_else(|| {
            ProjectError::not_found(format!(
                "Can't remove preset '{}' from section {}: not assigned.",
                preset, section_start
            ))
        })?;

        section.presets.remove(index);
        Ok(())
    }
}
