//! Atlas configuration loaded from a TOML file and `ATLAS__*` environment variables.
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | data_dir | ATLAS__DATA_DIR | ./data/universal | Directory holding the reference table JSON files. |
//! | default_profile_id | ATLAS__DEFAULT_PROFILE_ID | default-profile | Namespace used when a profile carries no id. |
//! | strict_references | ATLAS__STRICT_REFERENCES | false | Audit fails when broken references are found. |
//! | log_lookup_misses | ATLAS__LOG_LOOKUP_MISSES | false | Debug-log every profile lookup miss. |
//! | search_limit | ATLAS__SEARCH_LIMIT | 25 | Result cap applied when a search passes no limit. |
//! | profile_path | ATLAS__PROFILE_PATH | (unset) | Optional profile JSON the audit loads into the registry. |

use crate::error::AtlasResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config/atlas";

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data/universal")
}

fn default_profile_id() -> String {
    "default-profile".to_string()
}

fn default_search_limit() -> usize {
    25
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_profile_id")]
    pub default_profile_id: String,
    #[serde(default)]
    pub strict_references: bool,
    #[serde(default)]
    pub log_lookup_misses: bool,
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
    #[serde(default)]
    pub profile_path: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_profile_id: default_profile_id(),
            strict_references: false,
            log_lookup_misses: false,
            search_limit: default_search_limit(),
            profile_path: None,
        }
    }
}

impl AtlasConfig {
    /// Load config from file and environment. Precedence: env > `ATLAS_CONFIG` path (or
    /// `config/atlas.toml`) > defaults.
    pub fn load() -> AtlasResult<Self> {
        let config_path =
            std::env::var("ATLAS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load from an explicit file path (extension optional). A missing file is not an error.
    pub fn load_from(path: &Path) -> AtlasResult<Self> {
        let builder = config::Config::builder()
            .set_default("data_dir", "./data/universal")?
            .set_default("default_profile_id", "default-profile")?
            .set_default("strict_references", false)?
            .set_default("log_lookup_misses", false)?
            .set_default("search_limit", 25_i64)?;

        let with_toml = path.with_extension("toml");
        let builder = if path.is_file() {
            builder.add_source(config::File::from(path))
        } else if with_toml.is_file() {
            builder.add_source(config::File::from(with_toml.as_path()))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("ATLAS").separator("__"))
            .build()?;

        Ok(built.try_deserialize()?)
    }
}
