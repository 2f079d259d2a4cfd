use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::generator::{self, Concept, Language, MAX_BLOCKS, MIN_BLOCKS};
use crate::session::layout::WindowConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_language")]
    pub language: Language,
    #[serde(default = "default_concept")]
    pub concept: Concept,
    #[serde(default = "default_block_count")]
    pub block_count: usize,
    #[serde(default = "default_true")]
    pub auto_indent: bool,
    #[serde(default)]
    pub repeat_same_test: bool,
    /// Column limit for generated snippets; 0 leaves lines as generated.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
    #[serde(default = "default_window_lines")]
    pub window_lines: usize,
    #[serde(default = "default_lines_before_cursor")]
    pub lines_before_cursor: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub record_history: bool,
}

fn default_language() -> Language {
    Language::Python
}
fn default_concept() -> Concept {
    Concept::Loops
}
fn default_block_count() -> usize {
    3
}
fn default_true() -> bool {
    true
}
fn default_wrap_width() -> usize {
    80
}
fn default_window_lines() -> usize {
    10
}
fn default_lines_before_cursor() -> usize {
    2
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            concept: default_concept(),
            block_count: default_block_count(),
            auto_indent: true,
            repeat_same_test: false,
            wrap_width: default_wrap_width(),
            window_lines: default_window_lines(),
            lines_before_cursor: default_lines_before_cursor(),
            theme: default_theme(),
            record_history: true,
        }
    }
}

impl Config {
    /// Reads the config file, falling back to defaults when it is missing or
    /// unreadable. The result is always normalized.
    pub fn load() -> Self {
        let path = Self::config_path();
        let mut config = match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default config: {e:#}");
                Config::default()
            }
        };
        config.normalize();
        config
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("codedrill")
            .join("config.toml")
    }

    /// Clamp numeric settings and make sure the concept exists for the
    /// language. Call after deserializing or after any CLI override.
    pub fn normalize(&mut self) {
        self.block_count = self.block_count.clamp(MIN_BLOCKS, MAX_BLOCKS);
        self.window_lines = self.window_lines.max(1);
        self.lines_before_cursor = self.lines_before_cursor.min(self.window_lines - 1);
        self.normalize_concept();
    }

    fn normalize_concept(&mut self) {
        if generator::is_supported(self.language, self.concept) {
            return;
        }
        let fallback = generator::supported_concepts(self.language)
            .first()
            .copied()
            .unwrap_or_else(default_concept);
        log::info!(
            "{} has no {} snippets, switching to {}",
            self.language.key(),
            self.concept.key(),
            fallback.key()
        );
        self.concept = fallback;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.normalize_concept();
    }

    pub fn snippet_config(&self) -> generator::SnippetConfig {
        generator::SnippetConfig::new(self.language, self.concept, self.block_count).clamped()
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig {
            size: self.window_lines.max(1),
            lines_before: self.lines_before_cursor,
        }
    }
}
