use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use task_scheduler_core::SchedulerConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub scheduler: SchedulerConfig,
    pub log_level: String,
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            scheduler: SchedulerConfig::default(),
            log_level: "info".to_string(),
            format: OutputFormat::Table,
        }
    }
}

impl CliConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: CliConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
