//! Wobbly Core - editing-session logic for inverse telecine projects
//!
//! This crate owns everything about a Wobbly project that is not UI:
//! the per-frame annotations and range registries, the decimation
//! bookkeeping, the pattern guesser, project file I/O and the
//! VapourSynth scripts handed to the frame server.
//!
//! # Example
//!
//! ```
//! use wobbly_core::guess::GuessOptions;
//! use wobbly_core::WobblyProject;
//!
//! let mut project = WobblyProject::new("episode.d2v", (30000, 1001), (720, 480));
//! project.add_trim(0, 299).unwrap();
//!
//! let report = project
//!     .guess_project_patterns_from_matches(10, &GuessOptions::default())
//!     .unwrap();
//! assert_eq!(report.sections.len(), 1);
//!
//! let script = project.generate_final_script(false).unwrap();
//! assert!(script.ends_with("src.set_output()\n"));
//! ```

pub mod config;
pub mod error;
pub mod guess;
pub mod logging;
pub mod project;
pub mod project_file;
pub mod script;

pub use error::{ErrorKind, ProjectError, ProjectResult};
pub use project::WobblyProject;
pub use script::ScriptBuilder;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
