use crate::Error;
use doxygen_env::{DocsConfig, EnvVar};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

/// Values that replace the Dripline-Cpp defaults.
///
/// Example file
///
/// ```json
/// {
///   "project_name": "Dripline-Cpp",
///   "doxygen_exclude": "./scarab"
/// }
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DocsConfigOverrides {
    /// Replaces the project display name.
    #[serde(default)]
    pub project_name: Option<String>,
    /// Replaces the version, including one read from git.
    #[serde(default)]
    pub project_number: Option<String>,
    /// Replaces the one line description.
    #[serde(default)]
    pub project_brief_desc: Option<String>,
    /// Replaces the logo path.
    #[serde(default)]
    pub project_logo: Option<String>,
    /// Replaces the directories scanned for sources.
    #[serde(default)]
    pub doxygen_input: Option<String>,
    /// Replaces the directories skipped during the scan.
    #[serde(default)]
    pub doxygen_exclude: Option<String>,
    /// Replaces the extra preprocessor include paths.
    #[serde(default)]
    pub preproc_include_path: Option<String>,
}

impl DocsConfigOverrides {
    /// Reads overrides from a JSON file.
    #[inline]
    pub fn load<P: ?Sized + AsRef<Path>>(path: &P) -> Result<Self, Error> {
        #[inline(never)]
        fn inner(path: &Path) -> Result<DocsConfigOverrides, Error> {
            let file = fs::File::open(path)
                .map(io::BufReader::new)
                .map_err(|source| Error::Inaccessible {
                    path: path.to_owned(),
                    source,
                })?;
            serde_json::from_reader(file).map_err(|source| Error::Config {
                path: path.to_owned(),
                source,
            })
        }

        inner(path.as_ref())
    }

    fn get(&self, var: EnvVar) -> Option<&String> {
        match var {
            EnvVar::ProjectName => self.project_name.as_ref(),
            EnvVar::ProjectNumber => self.project_number.as_ref(),
            EnvVar::ProjectBriefDesc => self.project_brief_desc.as_ref(),
            EnvVar::ProjectLogo => self.project_logo.as_ref(),
            EnvVar::DoxygenInput => self.doxygen_input.as_ref(),
            EnvVar::DoxygenExclude => self.doxygen_exclude.as_ref(),
            EnvVar::PreprocIncludePath => self.preproc_include_path.as_ref(),
        }
    }

    /// Replaces every value in `config` that has an override.
    pub fn apply(&self, config: &mut DocsConfig) {
        for var in EnvVar::ALL {
            if let Some(value) = self.get(var) {
                tracing::debug!(%var, %value, "overriding");
                value.clone_into(config.get_mut(var));
            }
        }
    }
}
