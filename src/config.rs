//! Console configuration.
//!
//! Loaded from TOML or built in code, then adjusted by the conventional
//! environment variables before a [`Console`](crate::render::Console) is
//! created from it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::color::ColorSystem;

/// Which color system to emit, as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Truecolor on terminals, no color elsewhere.
    #[default]
    Auto,
    None,
    Truecolor,
    #[serde(rename = "256")]
    EightBit,
    Standard,
    Windows,
}

impl ColorChoice {
    /// The color system to use for a sink, `None` meaning no ANSI styling.
    pub fn resolve(self, is_terminal: bool) -> Option<ColorSystem> {
        match self {
            Self::Auto => is_terminal.then_some(ColorSystem::TrueColor),
            Self::None => None,
            Self::Truecolor => Some(ColorSystem::TrueColor),
            Self::EightBit => Some(ColorSystem::EightBit),
            Self::Standard => Some(ColorSystem::Standard),
            Self::Windows => Some(ColorSystem::Windows),
        }
    }
}

/// Console settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Fixed width in cells; detected from the terminal when unset
    pub width: Option<usize>,
    /// Fixed height in lines; detected from the terminal when unset
    pub height: Option<usize>,
    pub color_system: ColorChoice,
    /// Treat the sink as a terminal (or not) regardless of detection
    pub force_terminal: Option<bool>,
    /// Drop colors but keep other attributes
    pub no_color: bool,
    /// Interpret printed strings as markup
    pub markup: bool,
    pub tab_size: usize,
    pub encoding: String,
}

impl ConsoleConfig {
    pub const DEFAULT_WIDTH: usize = 80;
    pub const DEFAULT_HEIGHT: usize = 25;
    const DEFAULT_TAB_SIZE: usize = 8;

    /// Parse configuration from a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse console config")
    }

    /// Load configuration from a file.
    ///
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read console config from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse console config from {}", path.display()))
    }

    /// Apply `NO_COLOR`, `COLUMNS` and `LINES` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply environment overrides read through `lookup`.
    ///
    /// `NO_COLOR` set to any non-empty value turns colors off. `COLUMNS` and
    /// `LINES` replace the width and height when they parse as numbers.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            self.no_color = true;
        }
        if let Some(width) = lookup("COLUMNS").and_then(|v| v.trim().parse().ok()) {
            self.width = Some(width);
        }
        if let Some(height) = lookup("LINES").and_then(|v| v.trim().parse().ok()) {
            self.height = Some(height);
        }
    }

    /// Width and height, filling unset values from the terminal.
    pub fn resolve_size(&self) -> (usize, usize) {
        let detected = terminal_size::terminal_size()
            .map(|(w, h)| (usize::from(w.0), usize::from(h.0)))
            .filter(|&(w, h)| w > 0 && h > 0);
        let width = self
            .width
            .or(detected.map(|(w, _)| w))
            .unwrap_or(Self::DEFAULT_WIDTH);
        let height = self
            .height
            .or(detected.map(|(_, h)| h))
            .unwrap_or(Self::DEFAULT_HEIGHT);
        (width, height)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            color_system: ColorChoice::Auto,
            force_terminal: None,
            no_color: false,
            markup: true,
            tab_size: Self::DEFAULT_TAB_SIZE,
            encoding: "utf-8".to_string(),
        }
    }
}
