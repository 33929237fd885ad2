//! Layered settings: defaults, then the JSON config file, then `BGATE_*`
//! environment variables, then command-line flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

const DEFAULT_TRANSLATION: &str = "ESV";
const DEFAULT_WIDTH: usize = 80;
const DEFAULT_DELAY_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub translation: String,
    pub padding: usize,
    pub wrap: bool,
    pub width: usize,
    /// Where downloaded translations are cached.
    pub data_dir: PathBuf,
    #[serde(rename = "delay")]
    pub delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            translation: DEFAULT_TRANSLATION.to_string(),
            padding: 0,
            wrap: false,
            width: terminal_width(),
            data_dir: home().join(".bgate"),
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub translation: Option<String>,
    pub padding: Option<usize>,
    pub wrap: Option<bool>,
    pub width: Option<usize>,
    pub delay_ms: Option<u64>,
}

/// The terminal's own width, then `$COLUMNS`, then 80.
fn terminal_width() -> usize {
    ratatui::crossterm::terminal::size()
        .ok()
        .map(|(columns, _)| usize::from(columns))
        .or_else(|| std::env::var("COLUMNS").ok().and_then(|w| w.trim().parse().ok()))
        .filter(|w| *w > 0)
        .unwrap_or(DEFAULT_WIDTH)
}

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    home().join(".config").join("bgate").join("config.json")
}

impl Settings {
    pub fn load(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let path = config.map(Path::to_path_buf).unwrap_or_else(default_config_path);

        let mut settings = Self::from_file(&path)?;
        settings.apply_env(|key| std::env::var(key).ok())?;
        settings.apply_overrides(overrides);
        Ok(settings)
    }

    /// Reads a config file on top of the defaults. A missing file is not an
    /// error; a file that is not valid JSON is.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read config {}", path.display()))
            }
        };

        serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(translation) = var("BGATE_TRANSLATION") {
            self.translation = translation;
        }
        if let Some(padding) = var("BGATE_PADDING") {
            self.padding = parse_var("BGATE_PADDING", &padding)?;
        }
        if let Some(wrap) = var("BGATE_WRAP") {
            self.wrap = parse_flag("BGATE_WRAP", &wrap)?;
        }
        if let Some(dir) = var("BGATE_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(width) = var("BGATE_WIDTH") {
            self.width = parse_var("BGATE_WIDTH", &width)?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(translation) = &overrides.translation {
            self.translation = translation.clone();
        }
        if let Some(padding) = overrides.padding {
            self.padding = padding;
        }
        if let Some(wrap) = overrides.wrap {
            self.wrap = wrap;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.delay_ms = delay_ms;
        }
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {name}: {value:?}"))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => anyhow::bail!("invalid value for {name}: {value:?}"),
    }
}
