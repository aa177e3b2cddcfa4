use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use healthdata_access::AccessConfig;
use healthdata_session::SessionConfig;
use std::path::{Path, PathBuf};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "snake_case")]
/// The configuration of the `healthdata` CLI.
///
/// # Hierarchy
///
/// The configuration sources are:
///
/// 1. The default values.
/// 2. The YAML file passed via `--config`, if any.
/// 3. Environment variables.
///
/// The last source in the list overrides any previous source.
///
/// # Environment variables
///
/// All config-related environment variables must be prefixed with `HEALTHDATA_`.
/// After the prefix, concatenate the names of the fields that must be traversed
/// to reach the value you want to override, using `__` as a separator.
///
/// E.g. `HEALTHDATA_ACCESS__UNMATCHED_ROUTES=deny` for [`AccessConfig::unmatched_routes`].
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub access: AccessConfig,
    /// The directory where the session is persisted.
    ///
    /// `--profile-dir` takes precedence over this value.
    #[serde(default)]
    pub profile_dir: Option<PathBuf>,
}

impl Config {
    /// Merge all configuration sources into a [`Figment`].
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, anyhow::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = config_file {
            if !path.is_file() {
                anyhow::bail!("The configuration file `{}` does not exist", path.display());
            }
            figment = figment.merge(Yaml::file_exact(path));
        }
        Ok(figment.merge(Env::prefixed("HEALTHDATA_").split("__")))
    }

    /// Retrieve the configuration by merging multiple configuration sources.
    ///
    /// See [`Config`] for the hierarchy.
    pub fn load(config_file: Option<&Path>) -> Result<Config, anyhow::Error> {
        let configuration: Config = Self::figment(config_file)?
            .extract()
            .context("Failed to load hierarchical configuration")?;
        Ok(configuration)
    }
}
