use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = [".liqhlrc", ".liqhlrc.toml", ".config/liqhlrc"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored terminal output
    #[default]
    Ansi,
    /// HTML spans with highlight.js class names
    Markup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub colored: bool,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,
}

fn default_true() -> bool {
    true
}

fn default_class_prefix() -> String {
    "hljs-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colored: true,
            verbose: false,
            format: OutputFormat::default(),
            class_prefix: default_class_prefix(),
        }
    }
}

impl Config {
    /// Load config from the first `.liqhlrc` variant found in `dir`.
    /// Returns the defaults and no path when none exists.
    pub fn load_in(dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        for name in CONFIG_FILES {
            let path = dir.join(name);
            if path.is_file() {
                let config = Self::load_from_file(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((Config::default(), None))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Write a commented default config file.
    pub fn create_default(path: &Path) -> Result<()> {
        let default_config = r#"# liqhl configuration file

# Enable colored output in terminal
colored = true

# Log scanner and config details to stderr
verbose = false

# Output of `liqhl highlight`: "ansi" or "markup"
format = "ansi"

# Prefix for class names in markup output
class_prefix = "hljs-"
"#;

        fs::write(path, default_config)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Command-line flags win over file values.
    pub fn merge_cli_args(
        &mut self,
        colored: Option<bool>,
        verbose: bool,
        format: Option<OutputFormat>,
        class_prefix: Option<String>,
    ) {
        if let Some(colored) = colored {
            self.colored = colored;
        }

        if verbose {
            self.verbose = true;
        }

        if let Some(format) = format {
            self.format = format;
        }

        if let Some(prefix) = class_prefix {
            self.class_prefix = prefix;
        }
    }
}
