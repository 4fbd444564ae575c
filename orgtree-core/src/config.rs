#![forbid(unsafe_code)]

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_INPUT_FILENAME: &str = "user_hierarchy.json";
pub const DEFAULT_OUTPUT_FILENAME: &str = "subordinates.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub input_filename: String,
    pub output_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: data_dir_or_current(platform_data_dir()),
            input_filename: DEFAULT_INPUT_FILENAME.to_string(),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
        }
    }
}

impl Config {
    pub fn input_path(&self) -> PathBuf {
        self.data_dir.join(&self.input_filename)
    }

    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join(&self.output_filename)
    }

    pub fn with_data_dir(mut self, path: PathBuf) -> Self {
        self.data_dir = path;
        self
    }

    pub fn ensure_data_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}

fn platform_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("io", "orgtree", "orgtree").map(|dirs| dirs.data_dir().to_path_buf())
}

fn data_dir_or_current(platform: Option<PathBuf>) -> PathBuf {
    platform.unwrap_or_else(|| {
        let fallback = PathBuf::from(".");
        tracing::warn!(
            path = %fallback.display(),
            "Could not determine platform data directory; using current directory"
        );
        fallback
    })
}
