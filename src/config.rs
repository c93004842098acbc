//! User configuration options.
//!
//! The configuration is read from `<config dir>/hello-triangle/config.json` when the user has
//! created one. A missing file means defaults; a broken one is reported and ignored. Nothing is
//! ever written back and nothing here is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::lesson::Lesson;

const BASE_DIR: &str = "hello-triangle";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL core profile version, `[major, minor]`.
    pub gl_version: [u8; 2],
    pub vsync: bool,
    pub lesson: Lesson,
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello OpenGL!".to_string(),
            width: 800,
            height: 600,
            gl_version: [3, 3],
            vsync: true,
            lesson: Lesson::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

fn config_file() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(BASE_DIR);
    path.push(CONFIG_FILE);
    Some(path)
}

impl Config {
    /// Loads the user config, falling back to defaults on any problem.
    pub fn load() -> Self {
        match config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("No user config directory, using default config");
                Self::default()
            }
        }
    }

    /// Loads the config at `path`, or the defaults if there is no such file.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(data) => match Self::from_json(&data) {
                Ok(config) => {
                    log::info!("Loaded config from {path:?}");
                    config
                }
                Err(e) => {
                    log::warn!("Could not parse {path:?}, using default config: {e}");
                    Self::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {path:?}, using default config");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read {path:?}, using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn from_json(data: &str) -> Result<Self, String> {
        serde_json::from_str(data).map_err(|e| e.to_string())
    }

    pub fn clear_color(&self) -> Vec4 {
        Vec4::from_array(self.clear_color)
    }
}
