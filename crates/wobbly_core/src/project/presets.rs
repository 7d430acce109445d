//! Preset registry.
//!
//! Sections and custom lists refer to presets by name. Renaming a preset
//! rewrites those names; deleting one scrubs them.

use super::types::Preset;
use super::WobblyProject;
use crate::error::{ProjectError, ProjectResult};

/// Body given to presets created without contents.
pub const DEFAULT_PRESET_CONTENTS: &str = "# The preset is a Python function. It takes a single parameter, called 'clip'.\n\
# Filter that and assign the result to the same variable.\n\
# The VapourSynth core object is called 'c'.\n";

const NAME_RULES: &str =
    "Use only letters, numbers, and the underscore character. The first character cannot be a number.";

/// Whether `name` can be used as a function or variable name in a script.
///
/// ASCII letters, digits and underscores only, not starting with a digit.
pub fn is_name_safe_for_script(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl WobblyProject {
    /// Presets ordered by name.
    pub fn presets(&self) -> impl Iterator<Item = &Preset> + '_ {
        self.presets.values()
    }

    /// Whether a preset with this name exists.
    pub fn has_preset(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Add a preset with the default template body.
    pub fn add_preset(&mut self, name: &str) -> ProjectResult<()> {
        self.add_preset_with_contents(name, DEFAULT_PRESET_CONTENTS)
    }

    /// Add a preset with the given body.
    pub fn add_preset_with_contents(&mut self, name: &str, contents: &str) -> ProjectResult<()> {
        if !is_name_safe_for_script(name) {
            return Err(ProjectError::invalid_name(format!(
                "Can't add preset '{}': name is invalid. {}",
                name, NAME_RULES
            )));
        }

        if self.presets.contains_key(name) {
            return Err(ProjectError::invalid_name(format!(
                "Can't add preset '{}': a preset with this name already exists.",
                name
            )));
        }

        self.presets.insert(
            name.to_string(),
            Preset {
                name: name.to_string(),
                contents: contents.to_string(),
            },
        );
        Ok(())
    }

    /// Rename a preset and every reference to it.
    pub fn rename_preset(&mut self, old_name: &str, new_name: &str) -> ProjectResult<()> {
        if !self.presets.contains_key(old_name) {
            return Err(ProjectError::not_found(format!(
                "Can't rename preset '{}' to '{}': no such preset.",
                old_name, new_name
            )));
        }

        if !is_name_safe_for_script(new_name) {
            return Err(ProjectError::invalid_name(format!(
                "Can't rename preset '{}' to '{}': new name is invalid. {}",
                old_name, new_name, NAME_RULES
            )));
        }

        if old_name == new_name {
            return Ok(());
        }

        if self.presets.contains_key(new_name) {
            return Err(ProjectError::invalid_name(format!(
                "Can't rename preset '{}' to '{}': a preset with this name already exists.",
                old_name, new_name
            )));
        }

        if let Some(mut preset) = self.presets.remove(old_name) {
            preset.name = new_name.to_string();
            self.presets.insert(new_name.to_string(), preset);
        }

        let mut updated = 0usize;
        for section in self.sections.values_mut() {
            for name in section.presets.iter_mut().filter(|n| n.as_str() == old_name) {
                *name = new_name.to_string();
                updated += 1;
            }
        }
        for list in self.custom_lists.iter_mut().filter(|l| l.preset == old_name) {
            list.preset = new_name.to_string();
            updated += 1;
        }

        tracing::debug!(
            "Renamed preset '{}' to '{}' ({} references updated)",
            old_name,
            new_name,
            updated
        );
        Ok(())
    }

    /// Delete a preset. Section chains drop it; custom lists lose their preset.
    pub fn delete_preset(&mut self, name: &str) -> ProjectResult<()> {
        if self.presets.remove(name).is_none() {
            return Err(ProjectError::not_found(format!(
                "Can't delete preset '{}': no such preset.",
                name
            )));
        }

        for section in self.sections.values_mut() {
            section.presets.retain(|n| n != name);
        }
        for list in self.custom_lists.iter_mut().filter(|l| l.preset == name) {
            list.preset.clear();
        }

        tracing::debug!("Deleted preset '{}'", name);
        Ok(())
    }

    /// Body of a preset.
    pub fn preset_contents(&self, name: &str) -> ProjectResult<&str> {
        self.presets
            .get(name)
            .map(|preset| preset.contents.as_str())
            .ok_or_else(|| {
                ProjectError::not_found(format!(
                    "Can't retrieve the contents of preset '{}': no such preset.",
                    name
                ))
            })
    }

    /// Replace the body of a preset.
    pub fn set_preset_contents(&mut self, name: &str, contents: &str) -> ProjectResult<()> {
        let preset = self.presets.get_mut(name).ok_or_else(|| {
            ProjectError::not_found(format!(
                "Can't modify the contents of preset '{}': no such preset.",
                name
            ))
        })?;
        preset.contents = contents.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::project::tests::project_with_frames;
    use crate::project::{CustomList, FilterChainPosition};

    #[test]
    fn name_safety_rules() {
        assert!(is_name_safe_for_script("deblock"));
        assert!(is_name_safe_for_script("_x9"));
        assert!(is_name_safe_for_script("Fix_2"));
        assert!(!is_name_safe_for_script(""));
        assert!(!is_name_safe_for_script("9lives"));
        assert!(!is_name_safe_for_script("has space"));
        assert!(!is_name_safe_for_script("dé"));
        assert!(!is_name_safe_for_script("a-b"));
    }

    #[test]
    fn add_preset_rejects_bad_and_duplicate_names() {
        let mut project = project_with_frames(10);
        assert_eq!(project.add_preset("1st").unwrap_err().kind(), ErrorKind::InvalidName);
        project.add_preset("first").unwrap();
        assert_eq!(project.add_preset("first").unwrap_err().kind(), ErrorKind::InvalidName);
        assert_eq!(project.preset_contents("first").unwrap(), DEFAULT_PRESET_CONTENTS);
    }

    fn project_with_references() -> crate::project::WobblyProject {
        let mut project = project_with_frames(30);
        project.add_preset("old").unwrap();
        project.add_preset("other").unwrap();
        project.add_section(10).unwrap();
        project.assign_preset_to_section("old", 0).unwrap();
        project.assign_preset_to_section("other", 0).unwrap();
        project.assign_preset_to_section("old", 10).unwrap();
        project.assign_preset_to_section("old", 10).unwrap();
        project
            .add_custom_list(CustomList::new("fixes", FilterChainPosition::PostSource).with_preset("old"))
            .unwrap();
        project
            .add_custom_list(CustomList::new("misc", FilterChainPosition::PostSource).with_preset("other"))
            .unwrap();
        project
    }

    #[test]
    fn rename_updates_every_reference() {
        let mut project = project_with_references();
        project.rename_preset("old", "new").unwrap();

        assert!(!project.has_preset("old"));
        assert_eq!(project.preset_contents("new").unwrap(), DEFAULT_PRESET_CONTENTS);
        assert_eq!(project.section(0).unwrap().presets, vec!["new", "other"]);
        assert_eq!(project.section(10).unwrap().presets, vec!["new", "new"]);
        assert_eq!(project.custom_list("fixes").unwrap().preset, "new");
        assert_eq!(project.custom_list("misc").unwrap().preset, "other");
    }

    #[test]
    fn rename_failures_leave_state_untouched() {
        let mut project = project_with_references();
        let before = project.clone();

        let err = project.rename_preset("missing", "new").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = project.rename_preset("old", "0bad").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        let err = project.rename_preset("old", "other").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);

        assert_eq!(project.section(0), before.section(0));
        assert_eq!(project.section(10), before.section(10));
        assert!(project.has_preset("old"));
        assert_eq!(project.custom_list("fixes").unwrap().preset, "old");
    }

    #[test]
    fn delete_scrubs_references() {
        let mut project = project_with_references();
        project.delete_preset("old").unwrap();

        assert!(!project.has_preset("old"));
        assert_eq!(project.section(0).unwrap().presets, vec!["other"]);
        assert!(project.section(10).unwrap().presets.is_empty());
        assert_eq!(project.custom_list("fixes").unwrap().preset, "");
        assert_eq!(project.custom_list("misc").unwrap().preset, "other");

        assert_eq!(project.delete_preset("old").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn contents_can_be_replaced() {
        let mut project = project_with_frames(10);
        project.add_preset_with_contents("blur", "clip = c.std.BoxBlur(clip)").unwrap();
        project.set_preset_contents("blur", "clip = c.std.Median(clip)").unwrap();
        assert_eq!(project.preset_contents("blur").unwrap(), "clip = c.std.Median(clip)");
        assert!(project.set_preset_contents("nope", "").is_err());
    }
}
