//! `formdoc.toml` loading.
//!
//! ```toml
//! [store]
//! dir = "formdoc-data"
//!
//! [layout]
//! page_width_mm = 210.0
//! page_height_mm = 297.0
//! margin_mm = 15.0
//! break_threshold_mm = 25.0
//! date_format = "%d %b %Y"
//! ```
//!
//! Every key is optional. Command-line flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use formdoc_layout::{LayoutOptions, PageGeometry};

pub const DEFAULT_CONFIG_FILE: &str = "formdoc.toml";
pub const DEFAULT_STORE_DIR: &str = "formdoc-data";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreSection,
    pub layout: LayoutSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreSection {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSection {
    pub page_width_mm: Option<f64>,
    pub page_height_mm: Option<f64>,
    pub margin_mm: Option<f64>,
    pub break_threshold_mm: Option<f64>,
    pub date_format: Option<String>,
}

impl Config {
    /// Loads `explicit`, or `./formdoc.toml` when it exists, or defaults.
    ///
    /// # Errors
    ///
    /// Fails when an explicitly named file is missing or any file does not
    /// parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    debug!("no config file; using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Store directory: the flag, then the file, then `./formdoc-data`.
    pub fn store_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.store.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR))
    }

    pub fn layout_options(&self) -> LayoutOptions {
        let defaults = LayoutOptions::default();
        let layout = &self.layout;
        let page = PageGeometry {
            width_mm: layout.page_width_mm.unwrap_or(defaults.page.width_mm),
            height_mm: layout.page_height_mm.unwrap_or(defaults.page.height_mm),
            margin_mm: layout.margin_mm.unwrap_or(defaults.page.margin_mm),
        };
        LayoutOptions {
            page,
            break_threshold_mm: layout
                .break_threshold_mm
                .unwrap_or(defaults.break_threshold_mm),
            date_format: layout
                .date_format
                .clone()
                .unwrap_or(defaults.date_format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout_options(), LayoutOptions::default());
        assert_eq!(config.store_dir(None), PathBuf::from(DEFAULT_STORE_DIR));
    }

    #[test]
    fn partial_layout_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [store]
            dir = "/srv/forms"

            [layout]
            margin_mm = 10.0
            date_format = "%Y-%m-%d"
            "#,
        )
        .unwrap();
        let options = config.layout_options();
        assert_eq!(options.page.margin_mm, 10.0);
        assert_eq!(options.page.width_mm, 210.0);
        assert_eq!(options.break_threshold_mm, 25.0);
        assert_eq!(options.date_format, "%Y-%m-%d");
        assert_eq!(config.store_dir(None), PathBuf::from("/srv/forms"));
        assert_eq!(
            config.store_dir(Some(Path::new("override"))),
            PathBuf::from("override")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("[layout]\nmargins = 3").is_err());
    }
}
