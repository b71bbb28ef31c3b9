//! Layered settings: built-in defaults, then an optional `pandaquery.toml`,
//! then `PANDAQUERY_*` environment variables.

use config::{Config, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::localize::Language;
use crate::operators::{Dictionary, Tags};

const DEFAULTS: &str = include_str!("defaults.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Display language, used when normalizing names.
    #[serde(default)]
    pub language: Language,
    /// Refuse ambiguous keyword dictionaries instead of warning about them.
    #[serde(default)]
    pub strict_keywords: bool,
    /// Dataset export the command line tool searches.
    #[serde(default)]
    pub graph: Option<PathBuf>,
    #[serde(default)]
    pub operators: Dictionary,
    #[serde(default)]
    pub tags: Tags,
}

impl Settings {
    /// The built-in settings alone.
    pub fn defaults() -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Layers `path` (or `pandaquery.toml` in the working directory, if
    /// present) and the environment over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path),
            None => File::with_name("pandaquery").required(false),
        };
        let settings = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(file)
            .add_source(config::Environment::with_prefix("PANDAQUERY"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
