use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// How command output is rendered.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Board filters applied when the command line does not set them.
#[derive(Debug, Deserialize, Clone)]
pub struct RankConfig {
    /// Group to rank. Default: "all".
    #[serde(default = "default_group")]
    pub group: String,
    /// Share of the contest to replay in hundredths of a percent. Default: 10000.
    #[serde(default = "default_width")]
    pub width: u32,
}

fn default_group() -> String {
    common::ALL_GROUP.into()
}
fn default_width() -> u32 {
    10_000
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            group: default_group(),
            width: default_width(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// CLI configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct BoardConfig {
    /// Directory holding `config.json`, `team.json` and `run.json`. Default: "data".
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

impl BoardConfig {
    /// Defaults, then the config file, then `BOARD__*` environment variables.
    /// Without an explicit path the file is `config/board` with any supported
    /// extension, and a missing file is not an error.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config_path = path.unwrap_or("config/board");

        let s = Config::builder()
            .set_default("data_dir", "data")?
            .set_default("rank.group", common::ALL_GROUP)?
            .set_default("rank.width", 10_000_i64)?
            .set_default("output.format", "table")?
            .add_source(File::with_name(config_path).required(path.is_some()))
            .add_source(Environment::with_prefix("BOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
