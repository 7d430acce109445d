//! VapourSynth script generation.
//!
//! Scripts are assembled stage by stage from the current project state.
//! Nothing here mutates the project, and the same state always yields
//! the same text.
//!
//! # Final script stages
//!
//! 1. Header and preset functions
//! 2. Source and trims
//! 3. Custom lists placed right after the source
//! 4. Field matching and per-section preset chains
//! 5. Custom lists placed after field matching
//! 6. Freeze frames, then decimation
//! 7. Custom lists placed after decimation
//! 8. Crop, resize and the optional preview conversion

use crate::config::ScriptSettings;
use crate::error::{ProjectError, ProjectResult};
use crate::project::{CustomList, FilterChainPosition, WobblyProject};

/// Builder for the scripts handed to VapourSynth.
pub struct ScriptBuilder<'a> {
    project: &'a WobblyProject,
}

impl<'a> ScriptBuilder<'a> {
    /// Create a builder over a project.
    pub fn new(project: &'a WobblyProject) -> Self {
        Self { project }
    }

    /// Complete filter chain.
    ///
    /// `for_preview` appends the RGB conversion used for display.
    /// Fails if a custom list with ranges has no preset.
    pub fn final_script(&self, for_preview: bool) -> ProjectResult<String> {
        let project = self.project;
        let mut script = String::new();

        self.add_header(&mut script);
        self.add_presets(&mut script);
        self.add_source(&mut script);
        self.add_trims(&mut script);
        self.add_custom_lists(&mut script, FilterChainPosition::PostSource)?;
        self.add_field_hint(&mut script);
        self.add_sections(&mut script);
        self.add_custom_lists(&mut script, FilterChainPosition::PostFieldMatch)?;

        if !project.frozen_frames.is_empty() {
            self.add_freeze_frames(&mut script);
        }
        if project.decimation.any() {
            self.add_decimated_frames(&mut script);
        }

        self.add_custom_lists(&mut script, FilterChainPosition::PostDecimate)?;

        if project.crop.enabled {
            self.add_crop(&mut script);
        }
        if project.resize.enabled {
            self.add_resize(&mut script);
        }
        if for_preview {
            self.add_rgb_conversion(&mut script);
        }
        self.add_output(&mut script);

        tracing::debug!("Generated final script ({} bytes)", script.len());
        Ok(script)
    }

    /// Fast preview chain: matching and freeze frames only, no decimation.
    ///
    /// With `show_crop` the cropped area is drawn as a coloured border.
    pub fn main_display_script(&self, show_crop: bool) -> String {
        let project = self.project;
        let mut script = String::new();

        self.add_header(&mut script);
        self.add_source(&mut script);
        self.add_trims(&mut script);
        self.add_field_hint(&mut script);

        if !project.frozen_frames.is_empty() {
            self.add_freeze_frames(&mut script);
        }
        if show_crop && project.crop.enabled {
            self.add_crop(&mut script);
            self.add_crop_borders(&mut script);
        }

        self.add_rgb_conversion(&mut script);
        self.add_output(&mut script);
        script
    }

    fn add_header(&self, script: &mut String) {
        script.push_str("import vapoursynth as vs\n\nc = vs.get_core()\n\n");
    }

    /// Every preset becomes a function taking and returning `clip`.
    fn add_presets(&self, script: &mut String) {
        for preset in self.project.presets.values() {
            script.push_str(&format!("def {}(clip):\n", preset.name));
            for line in preset.contents.lines() {
                if line.is_empty() {
                    script.push('\n');
                } else {
                    script.push_str(&format!("    {}\n", line));
                }
            }
            script.push_str("    return clip\n\n\n");
        }
    }

    /// The source is cached as output 1 so reloading the script is cheap.
    fn add_source(&self, script: &mut String) {
        script.push_str(&format!(
            "try:\n    src = vs.get_output(index=1)\nexcept KeyError:\n    src = c.d2v.Source(input=r'{}')\n    src.set_output(index=1)\n\n",
            self.project.input_file
        ));
    }

    fn add_trims(&self, script: &mut String) {
        if self.project.trims.is_empty() {
            return;
        }

        script.push_str("src = c.std.Splice(clips=[");
        for trim in self.project.trims.iter() {
            script.push_str(&format!("src[{}:{}],", trim.first, trim.last + 1));
        }
        script.push_str("])\n\n");
    }

    fn add_field_hint(&self, script: &mut String) {
        let project = self.project;
        let tff = project.vfm_parameters.get("order").copied().unwrap_or(0.0) as i32;
        let matches: String = project.matches.iter().map(|m| m.as_char()).collect();

        script.push_str(&format!(
            "src = c.fh.FieldHint(clip=src, tff={}, matches='{}')\n\n",
            tff, matches
        ));
    }

    /// Slice the clip per section, run each slice through its preset
    /// chain and splice the slices back together.
    fn add_sections(&self, script: &mut String) {
        let project = self.project;
        let mut splice = String::from("src = c.std.Splice(mismatch=True, clips=[");

        for section in project.sections.values() {
            let name = format!("section{}", section.start);
            script.push_str(&format!("{} = src", name));

            for preset in &section.presets {
                if !project.presets.contains_key(preset) {
                    tracing::warn!(
                        "Section {} refers to unknown preset '{}', skipping it",
                        section.start,
                        preset
                    );
                    continue;
                }
                script.push_str(&format!("\n{} = {}({})", name, preset, name));
            }

            match project.find_next_section(section.start) {
                Some(next) => script.push_str(&format!("[{}:{}]\n", section.start, next.start)),
                None => script.push_str(&format!("[{}:]\n", section.start)),
            }
            splice.push_str(&format!("{},", name));
        }

        splice.push_str("])\n\n");
        script.push_str(&splice);
    }

    fn add_custom_lists(&self, script: &mut String, position: FilterChainPosition) -> ProjectResult<()> {
        let frames = self.project.frame_count(position);

        for list in self.project.custom_lists.iter() {
            if list.position != position || list.frames.is_empty() {
                continue;
            }
            if !list.has_preset() {
                return Err(ProjectError::not_found(format!(
                    "Custom list '{}' has no preset assigned.",
                    list.name
                )));
            }
            self.add_custom_list(script, list, frames);
        }
        Ok(())
    }

    /// Splice the list's ranges from the filtered clip into the gaps of `src`.
    fn add_custom_list(&self, script: &mut String, list: &CustomList, frames: i32) {
        let name = format!("cl_{}", list.name);
        script.push_str(&format!("{} = {}(src)\n", name, list.preset));

        let mut splice = String::from("src = c.std.Splice(mismatch=True, clips=[");
        let mut next_unfiltered = 0;

        for range in list.frames.iter() {
            if range.first > next_unfiltered {
                splice.push_str(&format!("src[{}:{}],", next_unfiltered, range.first));
            }
            splice.push_str(&format!("{}[{}:{}],", name, range.first, range.last + 1));
            next_unfiltered = range.last + 1;
        }

        if next_unfiltered < frames {
            splice.push_str(&format!("src[{}:]", next_unfiltered));
        }
        splice.push_str("])\n\n");
        script.push_str(&splice);
    }

    fn add_freeze_frames(&self, script: &mut String) {
        let mut first = String::new();
        let mut last = String::new();
        let mut replacement = String::new();

        for ff in self.project.frozen_frames.iter() {
            first.push_str(&format!("{},", ff.first));
            last.push_str(&format!("{},", ff.last));
            replacement.push_str(&format!("{},", ff.replacement));
        }

        script.push_str(&format!(
            "src = c.std.FreezeFrames(clip=src, first=[{}], last=[{}], replacement=[{}])\n\n",
            first, last, replacement
        ));
    }

    fn add_decimated_frames(&self, script: &mut String) {
        script.push_str("src = c.std.DeleteFrames(clip=src, frames=[");
        for frame in self.project.decimation.frames() {
            script.push_str(&format!("{},", frame));
        }
        script.push_str("])\n\n");
    }

    fn add_crop(&self, script: &mut String) {
        let crop = &self.project.crop;
        script.push_str(&format!(
            "src = c.std.CropRel(clip=src, left={}, top={}, right={}, bottom={})\n\n",
            crop.left, crop.top, crop.right, crop.bottom
        ));
    }

    fn add_crop_borders(&self, script: &mut String) {
        let crop = &self.project.crop;
        script.push_str(&format!(
            "src = c.std.AddBorders(clip=src, left={}, top={}, right={}, bottom={}, color=[128, 230, 180])\n\n",
            crop.left, crop.top, crop.right, crop.bottom
        ));
    }

    fn add_resize(&self, script: &mut String) {
        let resize = &self.project.resize;
        script.push_str(&format!(
            "src = c.resize.Bicubic(clip=src, width={}, height={})\n\n",
            resize.width, resize.height
        ));
    }

    fn add_rgb_conversion(&self, script: &mut String) {
        script.push_str(
            "src = c.std.FlipVertical(clip=src)\nsrc = c.resize.Bicubic(clip=src, format=vs.COMPATBGR32)\n\n",
        );
    }

    fn add_output(&self, script: &mut String) {
        script.push_str("src.set_output()\n");
    }
}

impl WobblyProject {
    /// Script running the complete filter chain.
    pub fn generate_final_script(&self, for_preview: bool) -> ProjectResult<String> {
        ScriptBuilder::new(self).final_script(for_preview)
    }

    /// Script for scrubbing through field-matched frames.
    pub fn generate_main_display_script(&self, show_crop: bool) -> String {
        ScriptBuilder::new(self).main_display_script(show_crop)
    }

    /// Final script for the preview window, as configured in `[script]`.
    pub fn generate_preview_script(&self, settings: &ScriptSettings) -> ProjectResult<String> {
        ScriptBuilder::new(self).final_script(settings.preview_rgb)
    }

    /// Main display script, as configured in `[script]`.
    pub fn generate_configured_display_script(&self, settings: &ScriptSettings) -> String {
        ScriptBuilder::new(self).main_display_script(settings.show_crop)
    }
}
