//! Optional user configuration (`config.toml`).

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

pub const DEFAULT_COL_WIDTH: usize = 12;
pub const MIN_COL_WIDTH: usize = 4;
pub const MAX_COL_WIDTH: usize = 40;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Built-in keymap name ("vim" or "emacs").
    pub keymap: Option<String>,
    /// Display width of every grid column.
    pub col_width: Option<usize>,
    /// Where tracing output goes. No file, no logging.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn col_width(&self) -> usize {
        self.col_width
            .unwrap_or(DEFAULT_COL_WIDTH)
            .clamp(MIN_COL_WIDTH, MAX_COL_WIDTH)
    }
}

/// Load the config from `path`, or from the user config dir.
///
/// Problems never abort startup: they are returned as warnings and the
/// defaults are used instead.
pub fn load_config(path: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let explicit = path.is_some();
    let Some(path) = path.map(Path::to_path_buf).or_else(user_config_path) else {
        return (Config::default(), warnings);
    };

    if !path.exists() {
        if explicit {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => parse_config(&content)
                .map_err(|err| warnings.push(format!("Failed to parse {}: {}", path.display(), err)))
                .ok(),
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    };

    (config.unwrap_or_default(), warnings)
}

pub fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(content)
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "cellsheet")?;
    Some(proj.config_dir().join("config.toml"))
}
