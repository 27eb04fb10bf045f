// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

/// The name of the optional configuration file in the data directory.
pub const CONFIG_FILE: &str = "studyos.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File name of the course collection, relative to the data directory.
    pub courses_file: String,
    /// File name of the project collection, relative to the data directory.
    pub projects_file: String,
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Upper bound on questions added per `generate questions` run.
    pub max_questions: usize,
    /// Upper bound on blocks added per `generate plan` run.
    pub max_blocks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            courses_file: "courses_data.json".to_string(),
            projects_file: "projects_data.json".to_string(),
            generate: GenerateConfig::default(),
        }
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            max_questions: 6,
            max_blocks: 6,
        }
    }
}

impl Config {
    /// Load the configuration from `directory`, or the defaults if there is
    /// no configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        log::debug!("Loaded configuration from {}.", path.display());
        Ok(config)
    }
}
