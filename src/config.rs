//! Configuration management for the kinship analyzer

use crate::error::{KinshipError, Result};
use crate::lineage::algebra;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub output: OutputSettings,
    /// Affinity links: person ID -> spouse ID. Injected into the
    /// analyzer; the algebra only ever reads it.
    #[serde(default)]
    pub spouse_links: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub format: String,
    pub file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputSettings {
                format: "text".to_string(),
                file: None,
            },
            spouse_links: HashMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(format) = std::env::var("KINSHIP_OUTPUT_FORMAT") {
            config.output.format = format;
        }

        if let Ok(file) = std::env::var("KINSHIP_OUTPUT_FILE") {
            config.output.file = Some(PathBuf::from(file));
        }

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        const FORMATS: [&str; 3] = ["text", "markdown", "json"];
        if !FORMATS.contains(&self.output.format.as_str()) {
            return Err(KinshipError::config(format!(
                "output format must be one of {:?}, got '{}'",
                FORMATS, self.output.format
            )));
        }

        // every side of a spouse link must itself be a parseable ID
        for (person, spouse) in &self.spouse_links {
            algebra::parse_id(person)?;
            algebra::parse_id(spouse)?;
        }

        Ok(())
    }
}
