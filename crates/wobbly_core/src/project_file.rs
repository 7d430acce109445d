//! Project file reading and writing.
//!
//! Projects are stored as pretty-printed JSON. Reading always builds a
//! fresh [`WobblyProject`] through the validating operations, so a file
//! that fails half way never leaks into an existing session.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ProjectError, ProjectResult};
use crate::project::{
    CustomList, FilterChainPosition, FrameRange, FreezeFrame, Match, Mics, Preset, Section,
    WobblyProject,
};

/// Format version written to every project file.
pub const PROJECT_FORMAT_VERSION: i32 = 42;

/// On-disk layout. Field order is the order keys are written in.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ProjectFile {
    #[serde(rename = "wibbly wobbly version")]
    version: i32,
    #[serde(rename = "input file")]
    input_file: String,
    #[serde(rename = "input frame rate")]
    input_frame_rate: [i64; 2],
    #[serde(rename = "input resolution")]
    input_resolution: [i32; 2],
    trim: Vec<FrameRange>,
    #[serde(rename = "vfm parameters")]
    vfm_parameters: BTreeMap<String, f64>,
    #[serde(rename = "vdecimate parameters")]
    vdecimate_parameters: BTreeMap<String, f64>,
    mics: Vec<Mics>,
    matches: Vec<Match>,
    #[serde(rename = "original matches")]
    original_matches: Vec<Match>,
    #[serde(rename = "combed frames")]
    combed_frames: Vec<i32>,
    #[serde(rename = "decimated frames")]
    decimated_frames: Vec<i32>,
    #[serde(rename = "decimate metrics")]
    decimate_metrics: Vec<i32>,
    sections: Vec<Section>,
    presets: Vec<Preset>,
    #[serde(rename = "frozen frames")]
    frozen_frames: Vec<FreezeFrame>,
    #[serde(rename = "custom lists")]
    custom_lists: Vec<CustomListFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resize: Option<ResizeFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    crop: Option<CropFile>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CustomListFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    preset: String,
    #[serde(default)]
    position: i32,
    #[serde(default)]
    frames: Vec<FrameRange>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ResizeFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<i32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct CropFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    right: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bottom: Option<i32>,
}

impl ResizeFile {
    fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

impl CropFile {
    fn is_empty(&self) -> bool {
        self.left.is_none() && self.top.is_none() && self.right.is_none() && self.bottom.is_none()
    }
}

/// Pad or cut per-frame data to the frame count.
fn fit_to_frames<T: Clone>(mut values: Vec<T>, frames: i32, fill: T) -> Vec<T> {
    values.resize(frames.max(0) as usize, fill);
    values
}

impl ProjectFile {
    fn from_project(project: &WobblyProject) -> Self {
        Self {
            version: PROJECT_FORMAT_VERSION,
            input_file: project.input_file.clone(),
            input_frame_rate: [project.fps_num, project.fps_den],
            input_resolution: [project.width, project.height],
            trim: project.trims.iter().copied().collect(),
            vfm_parameters: project.vfm_parameters.clone(),
            vdecimate_parameters: project.vdecimate_parameters.clone(),
            mics: project.mics.clone(),
            matches: project.matches.clone(),
            original_matches: project.original_matches.clone(),
            combed_frames: project.combed_frames.iter().copied().collect(),
            decimated_frames: project.decimation.frames().collect(),
            decimate_metrics: project.decimate_metrics.clone(),
            sections: project.sections.values().cloned().collect(),
            presets: project.presets.values().cloned().collect(),
            frozen_frames: project.frozen_frames.iter().copied().collect(),
            custom_lists: project
                .custom_lists
                .iter()
                .map(|list| CustomListFile {
                    name: list.name.clone(),
                    preset: list.preset.clone(),
                    position: list.position.as_i32(),
                    frames: list.frames.iter().copied().collect(),
                })
                .collect(),
            resize: project.resize.enabled.then(|| ResizeFile {
                width: Some(project.resize.width),
                height: Some(project.resize.height),
            }),
            crop: project.crop.enabled.then(|| CropFile {
                left: Some(project.crop.left),
                top: Some(project.crop.top),
                right: Some(project.crop.right),
                bottom: Some(project.crop.bottom),
            }),
        }
    }

    fn into_project(self) -> ProjectResult<WobblyProject> {
        let [fps_num, fps_den] = self.input_frame_rate;
        let [width, height] = self.input_resolution;
        let mut project = WobblyProject::new(self.input_file, (fps_num, fps_den), (width, height));

        for trim in self.trim {
            project.add_trim(trim.first, trim.last)?;
        }
        let frames = project.source_frames();

        project.vfm_parameters = self.vfm_parameters;
        project.vdecimate_parameters = self.vdecimate_parameters;

        project.set_mics(fit_to_frames(self.mics, frames, [0; 5]))?;

        let had_matches = !self.matches.is_empty();
        project.set_original_matches(fit_to_frames(self.original_matches, frames, Match::C))?;
        if had_matches {
            project.matches = fit_to_frames(self.matches, frames, Match::C);
        }

        for frame in self.combed_frames {
            project.add_combed_frame(frame)?;
        }
        for frame in self.decimated_frames {
            project.add_decimated_frame(frame)?;
        }
        project.set_decimate_metrics(fit_to_frames(self.decimate_metrics, frames, 0))?;

        for preset in self.presets {
            project.add_preset_with_contents(&preset.name, &preset.contents)?;
        }
        for ff in self.frozen_frames {
            project.add_freeze_frame(ff.first, ff.last, ff.replacement)?;
        }
        for section in self.sections {
            project.add_section_with(section)?;
        }

        for list in self.custom_lists {
            let position = FilterChainPosition::try_from(list.position)?;
            let name = list.name.clone();
            project.add_custom_list(CustomList::new(list.name, position).with_preset(list.preset))?;
            for range in list.frames {
                project.add_custom_list_range(&name, range.first, range.last)?;
            }
        }

        // An empty object leaves the stage disabled.
        if let Some(resize) = self.resize.filter(|resize| !resize.is_empty()) {
            project.resize.enabled = true;
            project.resize.width = resize.width.unwrap_or(width);
            project.resize.height = resize.height.unwrap_or(height);
        }
        if let Some(crop) = self.crop.filter(|crop| !crop.is_empty()) {
            project.set_crop(
                crop.left.unwrap_or(0),
                crop.top.unwrap_or(0),
                crop.right.unwrap_or(0),
                crop.bottom.unwrap_or(0),
            )?;
            project.crop.enabled = true;
        }

        Ok(project)
    }
}

impl WobblyProject {
    /// Serialize the project to pretty-printed JSON.
    pub fn to_json_string(&self) -> ProjectResult<String> {
        serde_json::to_string_pretty(&ProjectFile::from_project(self))
            .map_err(|e| ProjectError::malformed(format!("Can't serialize project: {}", e)))
    }

    /// Build a project from JSON text.
    ///
    /// Missing fields take empty defaults. Every value goes through the
    /// same checks as interactive edits.
    pub fn from_json_str(json: &str) -> ProjectResult<Self> {
        let file: ProjectFile = serde_json::from_str(json)
            .map_err(|e| ProjectError::malformed(format!("Can't parse project: {}", e)))?;

        tracing::debug!("Project format version {}", file.version);
        file.into_project()
    }

    /// Read a project file into a new project.
    pub fn read_project(path: &Path) -> ProjectResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
        let mut project = Self::from_json_str(&content).map_err(|e| match e {
            ProjectError::Malformed(message) => {
                ProjectError::malformed(format!("{} ({})", message, path.display()))
            }
            other => other,
        })?;
        project.project_path = Some(path.to_path_buf());

        tracing::info!(
            "Loaded project {} ({} frames)",
            path.display(),
            project.source_frames()
        );
        Ok(project)
    }

    /// Write the project to `path` and remember it as the project path.
    pub fn write_project(&mut self, path: &Path) -> ProjectResult<()> {
        let json = self.to_json_string()?;

        // Write atomically
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, &json).map_err(|e| ProjectError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ProjectError::io(path, e))?;

        self.project_path = Some(path.to_path_buf());
        tracing::info!("Saved project to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::project::tests::project_with_frames;
    use tempfile::TempDir;

    fn populated_project() -> WobblyProject {
        let mut project = project_with_frames(20);
        project.set_vfm_parameter("order", 1.0);
        project.set_vdecimate_parameter("dupthresh", 1.1);

        let mut mics = vec![[0i16; 5]; 20];
        mics[3] = [1, 2, 3, 4, 5];
        project.set_mics(mics).unwrap();
        project
            .set_original_matches(
                "ncccnnccccncccnncccc"
                    .chars()
                    .filter_map(Match::from_char)
                    .collect(),
            )
            .unwrap();
        project.set_match(2, Match::P).unwrap();
        project.add_combed_frame(7).unwrap();
        project.add_decimated_frame(4).unwrap();
        project.add_decimated_frame(9).unwrap();
        project.set_decimate_metrics((0..20).collect()).unwrap();

        project.add_preset_with_contents("deint", "clip = c.std.Median(clip)").unwrap();
        project.add_section(10).unwrap();
        project.assign_preset_to_section("deint", 10).unwrap();
        project.add_freeze_frame(5, 6, 4).unwrap();
        project
            .add_custom_list(
                CustomList::new("fix", FilterChainPosition::PostDecimate).with_preset("deint"),
            )
            .unwrap();
        project.add_custom_list_range("fix", 0, 3).unwrap();

        project.set_resize(640, 360).unwrap();
        project.set_resize_enabled(true);
        project.set_crop(8, 0, 8, 2).unwrap();
        project.set_crop_enabled(true);
        project
    }

    #[test]
    fn write_then_read_reproduces_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("episode.json");

        let mut project = populated_project();
        project.write_project(&path).unwrap();
        assert_eq!(project.project_path(), Some(path.as_path()));
        assert!(!temp_dir.path().join("episode.json.tmp").exists());

        let loaded = WobblyProject::read_project(&path).unwrap();
        assert_eq!(loaded.input_file(), project.input_file());
        assert_eq!(loaded.fps(), (30000, 1001));
        assert_eq!(loaded.resolution(), (720, 480));
        assert_eq!(loaded.trims(), project.trims());
        assert_eq!(loaded.vfm_parameters(), project.vfm_parameters());
        assert_eq!(loaded.vdecimate_parameters(), project.vdecimate_parameters());
        assert_eq!(loaded.mics(), project.mics());
        assert_eq!(loaded.matches(), project.matches());
        assert_eq!(loaded.original_matches(), project.original_matches());
        assert_eq!(loaded.combed_frames(), project.combed_frames());
        assert_eq!(loaded.decimation(), project.decimation());
        assert_eq!(loaded.decimate_metrics(), project.decimate_metrics());
        assert!(loaded.sections().eq(project.sections()));
        assert!(loaded.presets().eq(project.presets()));
        assert_eq!(loaded.frozen_frames(), project.frozen_frames());
        assert_eq!(loaded.custom_lists(), project.custom_lists());
        assert_eq!(loaded.resize(), project.resize());
        assert_eq!(loaded.crop(), project.crop());
    }

    #[test]
    fn writer_is_deterministic_and_versioned() {
        let project = populated_project();
        let first = project.to_json_string().unwrap();
        assert_eq!(first, project.to_json_string().unwrap());

        let version = first.find("\"wibbly wobbly version\": 42").unwrap();
        let input = first.find("\"input file\"").unwrap();
        let crop = first.find("\"crop\"").unwrap();
        assert!(version < input && input < crop);
        assert!(first.find("\"trim\"").unwrap() < first.find("\"mics\"").unwrap());
        assert!(first.find("\"sections\"").unwrap() < first.find("\"custom lists\"").unwrap());
    }

    #[test]
    fn disabled_resize_and_crop_are_omitted() {
        let project = project_with_frames(5);
        let json = project.to_json_string().unwrap();
        assert!(!json.contains("\"resize\""));
        assert!(!json.contains("\"crop\""));

        let loaded = WobblyProject::from_json_str(&json).unwrap();
        assert!(!loaded.resize().enabled);
        assert_eq!((loaded.resize().width, loaded.resize().height), (720, 480));
        assert!(!loaded.crop().enabled);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{
            "input file": "a.d2v",
            "input frame rate": [24000, 1001],
            "input resolution": [640, 480],
            "trim": [[0, 9]],
            "original matches": ["n", "c", "c", "c", "n"],
            "resize": {"width": 320}
        }"#;

        let project = WobblyProject::from_json_str(json).unwrap();
        assert_eq!(project.source_frames(), 10);
        assert_eq!(project.mics().len(), 10);
        assert_eq!(project.original_matches()[4], Match::N);
        assert_eq!(project.original_matches()[9], Match::C);
        assert_eq!(project.matches(), project.original_matches());
        assert_eq!(project.sections().map(|s| s.start).collect::<Vec<_>>(), vec![0]);
        assert!(project.resize().enabled);
        assert_eq!((project.resize().width, project.resize().height), (320, 480));
        assert!(!project.crop().enabled);
        assert!(project.project_path().is_none());
    }

    #[test]
    fn empty_resize_and_crop_objects_stay_disabled() {
        let json = r#"{"trim": [[0, 4]], "resize": {}, "crop": {}}"#;
        let project = WobblyProject::from_json_str(json).unwrap();
        assert!(!project.resize().enabled);
        assert!(!project.crop().enabled);

        let json = r#"{"trim": [[0, 4]], "crop": {"left": 4}}"#;
        let project = WobblyProject::from_json_str(json).unwrap();
        assert!(project.crop().enabled);
        assert_eq!(project.crop().left, 4);
        assert_eq!(project.crop().bottom, 0);
    }

    #[test]
    fn entries_missing_keys_take_defaults() {
        let json = r#"{
            "trim": [[0, 9]],
            "presets": [{"name": "deint", "contents": ""}],
            "sections": [{"presets": ["deint"]}, {"start": 5}]
        }"#;
        let project = WobblyProject::from_json_str(json).unwrap();
        assert_eq!(project.section(0).unwrap().presets, vec!["deint".to_string()]);
        assert!(project.section(5).is_some());

        // A list without a name reaches validation instead of failing to parse
        let json = r#"{"trim": [[0, 9]], "custom lists": [{"frames": [[1, 2]]}]}"#;
        let err = WobblyProject::from_json_str(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn invalid_content_is_rejected() {
        let err = WobblyProject::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let overlapping = r#"{"trim": [[0, 9]], "frozen frames": [[1, 3, 0], [2, 4, 0]]}"#;
        let err = WobblyProject::from_json_str(overlapping).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Overlap);

        let bad_position = r#"{"trim": [[0, 9]], "custom lists": [{"name": "a", "position": 3}]}"#;
        let err = WobblyProject::from_json_str(bad_position).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn failed_read_leaves_current_project_alone() {
        let temp_dir = TempDir::new().unwrap();
        let bad = temp_dir.path().join("bad.json");
        fs::write(&bad, r#"{"trim": [[0, 4]], "combed frames": [12]}"#).unwrap();

        let mut current = populated_project();
        let before = current.to_json_string().unwrap();

        match WobblyProject::read_project(&bad) {
            Ok(project) => current = project,
            Err(e) => assert_eq!(e.kind(), ErrorKind::OutOfRange),
        }
        assert_eq!(current.to_json_string().unwrap(), before);

        let err = WobblyProject::read_project(&temp_dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
    }
}
