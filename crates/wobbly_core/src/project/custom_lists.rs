//! Custom list registry.
//!
//! Lists keep insertion order; that order is the order their splices
//! appear in the generated script.

use super::presets::is_name_safe_for_script;
use super::range::FrameRange;
use super::types::{CustomList, FilterChainPosition};
use super::WobblyProject;
use crate::error::{ProjectError, ProjectResult};

impl WobblyProject {
    /// Custom lists in insertion order.
    pub fn custom_lists(&self) -> &[CustomList] {
        &self.custom_lists
    }

    /// Custom list by name.
    pub fn custom_list(&self, name: &str) -> Option<&CustomList> {
        self.custom_lists.iter().find(|l| l.name == name)
    }

    fn custom_list_index(&self, name: &str, action: &str) -> ProjectResult<usize> {
        self.custom_lists
            .iter()
            .position(|l| l.name == name)
            .ok_or_else(|| {
                ProjectError::not_found(format!(
                    "Can't {} custom list '{}': no such list.",
                    action, name
                ))
            })
    }

    /// Register a custom list.
    ///
    /// The name must be script-safe and unused, and the preset, if any,
    /// must exist. Ranges already in the list must fit its position and
    /// must not overlap each other.
    pub fn add_custom_list(&mut self, list: CustomList) -> ProjectResult<()> {
        if !is_name_safe_for_script(&list.name) {
            return Err(ProjectError::invalid_name(format!(
                "Can't add custom list '{}': name is invalid. Use only letters, numbers, and the underscore character. The first character cannot be a number.",
                list.name
            )));
        }

        if list.has_preset() && !self.presets.contains_key(&list.preset) {
            return Err(ProjectError::not_found(format!(
                "Can't add custom list '{}' with preset '{}': no such preset.",
                list.name, list.preset
            )));
        }

        if self.custom_list(&list.name).is_some() {
            return Err(ProjectError::invalid_name(format!(
                "Can't add custom list '{}': a list with this name already exists.",
                list.name
            )));
        }

        let frames = self.frame_count(list.position);
        if let Some(bad) = list.frames.iter().find(|r| r.first < 0 || r.last >= frames) {
            return Err(ProjectError::out_of_range(format!(
                "Can't add custom list '{}' with range {}: values out of range.",
                list.name, bad
            )));
        }

        let ranges: Vec<&FrameRange> = list.frames.iter().collect();
        if let Some(pair) = ranges.windows(2).find(|pair| pair[0].last >= pair[1].first) {
            return Err(ProjectError::overlap(format!(
                "Can't add custom list '{}' with range {}: overlaps {}.",
                list.name, pair[1], pair[0]
            )));
        }

        self.custom_lists.push(list);
        Ok(())
    }

    /// Remove a custom list by name.
    pub fn delete_custom_list(&mut self, name: &str) -> ProjectResult<()> {
        let index = self.custom_list_index(name, "delete")?;
        self.custom_lists.remove(index);
        Ok(())
    }

    /// Assign a preset to a list. An empty name clears the assignment.
    pub fn set_custom_list_preset(&mut self, name: &str, preset: &str) -> ProjectResult<()> {
        let index = self.custom_list_index(name, "assign a preset to")?;

        if !preset.is_empty() && !self.presets.contains_key(preset) {
            return Err(ProjectError::not_found(format!(
                "Can't assign preset '{}' to custom list '{}': no such preset.",
                preset, name
            )));
        }

        self.custom_lists[index].preset = preset.to_string();
        Ok(())
    }

    /// Move a list to another point of the filter chain.
    ///
    /// Every range must fit the frame count at the new position.
    pub fn set_custom_list_position(
        &mut self,
        name: &str,
        position: FilterChainPosition,
    ) -> ProjectResult<()> {
        let index = self.custom_list_index(name, "move")?;
        let frames = self.frame_count(position);

        if let Some(last) = self.custom_lists[index].frames.last() {
            if last.last >= frames {
                return Err(ProjectError::out_of_range(format!(
                    "Can't move custom list '{}' to {}: range {} out of range.",
                    name, position, last
                )));
            }
        }

        self.custom_lists[index].position = position;
        Ok(())
    }

    /// Add the frames `first..=last` to a list.
    pub fn add_custom_list_range(&mut self, name: &str, first: i32, last: i32) -> ProjectResult<()> {
        let index = self.custom_list_index(name, "add a range to")?;
        let range = FrameRange::new(first, last);
        let list = &self.custom_lists[index];
        let frames = self.frame_count(list.position);

        if range.first < 0 || range.last >= frames {
            return Err(ProjectError::out_of_range(format!(
                "Can't add range {} to custom list '{}': values out of range.",
                range, name
            )));
        }

        if let Some(existing) = list.frames.find_overlap(range) {
            return Err(ProjectError::overlap(format!(
                "Can't add range {} to custom list '{}': overlaps {}.",
                range, name, existing
            )));
        }

        self.custom_lists[index].frames.insert(range);
        Ok(())
    }

    /// Remove the range of a list that contains `frame`.
    pub fn delete_custom_list_range(&mut self, name: &str, frame: i32) -> ProjectResult<()> {
        let index = self.custom_list_index(name, "delete a range from")?;
        let list = &mut self.custom_lists[index];

        let first = list.frames.find(frame).map(|r| r.first).ok_or_else(|| {
            ProjectError::not_found(format!(
                "Can't delete range containing frame {} from custom list '{}': no such range.",
                frame, name
            ))
        })?;

        list.frames.remove(first);
        Ok(())
    }

    /// Range of a list containing `frame`.
    pub fn find_custom_list_range(&self, name: &str, frame: i32) -> Option<FrameRange> {
        self.custom_list(name)
            .and_then(|list| list.frames.find(frame))
            .copied()
    }
}
