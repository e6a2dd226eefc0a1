use anyhow::{Context, Result};
use life_core::Rules;
use life_rendering::{Color, Palette};
use serde::Deserialize;
use std::{fs, path::Path};

/// Settings read from a TOML configuration file.
///
/// Every field is optional; command-line flags take precedence over the
/// values found here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LifeConfig {
    /// Birth and survival counts, `[rules] birth = [3] survival = [2, 3]`.
    pub(crate) rules: Option<Rules>,
    /// Output appearance.
    pub(crate) render: RenderConfig,
    /// Characters used by text input and output.
    pub(crate) input: InputConfig,
}

/// `[render]` section of the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RenderConfig {
    pub(crate) scale: Option<u32>,
    pub(crate) colored: Option<bool>,
    pub(crate) palette: Option<Palette>,
    pub(crate) background: Option<Color>,
}

/// `[input]` section of the configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct InputConfig {
    pub(crate) live: Option<char>,
    pub(crate) dead: Option<char>,
}

impl LifeConfig {
    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse configuration toml contents")
    }
}
