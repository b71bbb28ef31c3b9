//! Language handling for search input.
//!
//! Names in the lineage dataset are stored with their conventional casing
//! ("Harumaki", "Aka-Chan"), while people type whatever they like into the
//! search box. A [`Localizer`] rewrites free text into the stored casing for a
//! given display [`Language`].

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Jp,
}
impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Jp => "jp",
        }
    }
}
impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

pub trait Localizer: Send + Sync {
    /// Normalizes whitespace-separated words into the casing used by entity names.
    fn capitalize_names(&self, words: &[&str], language: Language) -> String;
}

/// Capitalizes each word (and each hyphenated part) for latin scripts.
/// Japanese text has no case and passes through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Capitalizer;

impl Localizer for Capitalizer {
    fn capitalize_names(&self, words: &[&str], language: Language) -> String {
        match language {
            Language::Jp => words.join(" "),
            Language::En => words
                .iter()
                .map(|word| {
                    word.split('-')
                        .map(capitalize_first)
                        .collect::<Vec<_>>()
                        .join("-")
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn capitalize_first(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
