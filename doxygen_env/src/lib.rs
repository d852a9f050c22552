#![deny(unsafe_code, missing_docs)]

//! # doxygen_env
//!
//! This crate describes the configuration that the Dripline-Cpp `Doxyfile`
//! expects to find in its environment. The `Doxyfile` itself is shared with
//! other projects, so everything project specific (name, version, input
//! directories and so on) is passed to `doxygen` through environment variables.
//!
//! ## Examples
//!
//! ```rust
//! use doxygen_env::{DocsConfig, EnvVar};
//!
//! let config = DocsConfig::dripline_cpp("v2.4.0");
//! for (var, value) in config.env_vars() {
//!     println!("{}={:?}", var, value);
//! }
//!
//! assert_eq!(config.get(EnvVar::ProjectNumber), "v2.4.0");
//! assert_eq!(config.get(EnvVar::DoxygenExclude), "");
//! ```
//!
//! The `doxygen_env_run` crate resolves the version from `git` and launches
//! `doxygen` with these variables set on the child process.
//!
//! ## Features
//!
//! * `serde`: Implements the [`Serialize`] and [`Deserialize`] traits on [`DocsConfig`].
//!   This feature is disabled by default.
//!
//! [`Serialize`]: https://docs.rs/serde/latest/serde/trait.Serialize.html
//! [`Deserialize`]: https://docs.rs/serde/latest/serde/trait.Deserialize.html

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::fmt;

/// The version used when no tag can be found in the repository.
pub const PLACEHOLDER_VERSION: &str = "v?.?.?";

/// The `Doxyfile` used when none is given, relative to the repository root.
pub const DEFAULT_DOXYFILE: &str = "./scarab/documentation/cpp/Doxyfile";

/// The name of the documentation tool executable.
pub const DEFAULT_DOXYGEN: &str = "doxygen";

/// One of the environment variables read by the `Doxyfile`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub enum EnvVar {
    /// Display name of the project.
    ProjectName,
    /// The project version, usually the most recent tag.
    ProjectNumber,
    /// One line description shown under the project name.
    ProjectBriefDesc,
    /// Path to the logo image, relative to the repository root.
    ProjectLogo,
    /// Space separated list of directories to scan for sources.
    DoxygenInput,
    /// Space separated list of directories within the inputs to skip.
    DoxygenExclude,
    /// Space separated list of directories outside the inputs that the
    /// preprocessor should search for macro definitions.
    PreprocIncludePath,
}

impl EnvVar {
    /// Every variable, in the order they are passed to `doxygen`.
    pub const ALL: [EnvVar; 7] = [
        Self::ProjectName,
        Self::ProjectNumber,
        Self::ProjectBriefDesc,
        Self::ProjectLogo,
        Self::DoxygenInput,
        Self::DoxygenExclude,
        Self::PreprocIncludePath,
    ];

    /// Returns the exact name of the environment variable.
    ///
    /// ```rust
    /// assert_eq!(doxygen_env::EnvVar::ProjectNumber.name(), "PROJECT_NUMBER");
    /// ```
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ProjectName => "PROJECT_NAME",
            Self::ProjectNumber => "PROJECT_NUMBER",
            Self::ProjectBriefDesc => "PROJECT_BRIEF_DESC",
            Self::ProjectLogo => "PROJECT_LOGO",
            Self::DoxygenInput => "DOXYGEN_INPUT",
            Self::DoxygenExclude => "DOXYGEN_EXCLUDE",
            Self::PreprocIncludePath => "PREPROC_INCLUDE_PATH",
        }
    }
}

impl fmt::Display for EnvVar {
    #[inline]
    fn fmt(&self, fmtr: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmtr.write_str(self.name())
    }
}

/// The full set of values handed to `doxygen`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DocsConfig {
    /// See [`EnvVar::ProjectName`].
    pub project_name: String,
    /// See [`EnvVar::ProjectNumber`].
    pub project_number: String,
    /// See [`EnvVar::ProjectBriefDesc`].
    pub project_brief_desc: String,
    /// See [`EnvVar::ProjectLogo`].
    pub project_logo: String,
    /// See [`EnvVar::DoxygenInput`].
    pub doxygen_input: String,
    /// See [`EnvVar::DoxygenExclude`].
    pub doxygen_exclude: String,
    /// See [`EnvVar::PreprocIncludePath`].
    pub preproc_include_path: String,
}

impl DocsConfig {
    /// The Dripline-Cpp configuration for the given version.
    #[must_use]
    pub fn dripline_cpp<S: Into<String>>(project_number: S) -> Self {
        Self {
            project_name: "Dripline-Cpp".into(),
            project_number: project_number.into(),
            project_brief_desc: "Dripline Implementation in C++".into(),
            project_logo: "./documentation/images/DL3Logog_55x55.png".into(),
            doxygen_input: "./documentation/doxfiles ./library ./executables ./examples".into(),
            doxygen_exclude: String::new(),
            preproc_include_path: "./scarab/library/utility ./scarab/library/logger".into(),
        }
    }

    /// Returns the value for a single variable.
    #[inline]
    #[must_use]
    pub fn get(&self, var: EnvVar) -> &str {
        match var {
            EnvVar::ProjectName => &self.project_name,
            EnvVar::ProjectNumber => &self.project_number,
            EnvVar::ProjectBriefDesc => &self.project_brief_desc,
            EnvVar::ProjectLogo => &self.project_logo,
            EnvVar::DoxygenInput => &self.doxygen_input,
            EnvVar::DoxygenExclude => &self.doxygen_exclude,
            EnvVar::PreprocIncludePath => &self.preproc_include_path,
        }
    }

    /// Returns a mutable reference to the value for a single variable.
    #[inline]
    pub fn get_mut(&mut self, var: EnvVar) -> &mut String {
        match var {
            EnvVar::ProjectName => &mut self.project_name,
            EnvVar::ProjectNumber => &mut self.project_number,
            EnvVar::ProjectBriefDesc => &mut self.project_brief_desc,
            EnvVar::ProjectLogo => &mut self.project_logo,
            EnvVar::DoxygenInput => &mut self.doxygen_input,
            EnvVar::DoxygenExclude => &mut self.doxygen_exclude,
            EnvVar::PreprocIncludePath => &mut self.preproc_include_path,
        }
    }

    /// Returns every variable paired with its value, in [`EnvVar::ALL`] order.
    ///
    /// Empty values are included, `doxygen` treats a missing variable
    /// differently from an empty one.
    #[must_use]
    pub fn env_vars(&self) -> [(EnvVar, &str); 7] {
        EnvVar::ALL.map(|var| (var, self.get(var)))
    }
}

impl Default for DocsConfig {
    #[inline]
    fn default() -> Self {
        Self::dripline_cpp(PLACEHOLDER_VERSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dripline_cpp_values() {
        let config = DocsConfig::dripline_cpp("v1.2.3");
        let vars = config.env_vars();

        assert_eq!(
            vars,
            [
                (EnvVar::ProjectName, "Dripline-Cpp"),
                (EnvVar::ProjectNumber, "v1.2.3"),
                (EnvVar::ProjectBriefDesc, "Dripline Implementation in C++"),
                (EnvVar::ProjectLogo, "./documentation/images/DL3Logog_55x55.png"),
                (
                    EnvVar::DoxygenInput,
                    "./documentation/doxfiles ./library ./executables ./examples"
                ),
                (EnvVar::DoxygenExclude, ""),
                (
                    EnvVar::PreprocIncludePath,
                    "./scarab/library/utility ./scarab/library/logger"
                ),
            ]
        );
    }

    #[test]
    fn default_uses_placeholder() {
        assert_eq!(DocsConfig::default().project_number, "v?.?.?");
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = EnvVar::ALL.iter().map(|var| var.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EnvVar::ALL.len());
    }

    #[test]
    fn get_mut_writes_through() {
        let mut config = DocsConfig::default();
        config.get_mut(EnvVar::DoxygenExclude).push_str("./scarab");
        assert_eq!(config.get(EnvVar::DoxygenExclude), "./scarab");
        assert_eq!(EnvVar::DoxygenExclude.to_string(), "DOXYGEN_EXCLUDE");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_field_names() {
        let json = serde_json::to_value(DocsConfig::default()).unwrap();
        assert_eq!(json["project_name"], "Dripline-Cpp");
        assert_eq!(json["doxygen_exclude"], "");
    }
}
