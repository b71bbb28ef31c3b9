//! Keyword patterns.
//!
//! A [`Pattern`] is built from a list of equivalent synonyms and compiled once.
//! Synonyms are escaped before they go into the alternation, and longer
//! synonyms are tried first so that "born" never shadows "born before".

use regex::{Regex, RegexBuilder};
use std::cmp::Reverse;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// A synonym leads the input and more input follows it.
    Portion,
    /// A synonym is the whole input.
    Single,
    /// No synonym occurs anywhere in the input.
    None,
}

/// Where a pattern matched: the synonym as written in the input, and how many
/// bytes of input the match consumed (synonym plus trailing whitespace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'i> {
    pub keyword: &'i str,
    pub consumed: usize,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    kind: PatternKind,
    // None when built from an empty synonym list
    regex: Option<Regex>,
}

impl Pattern {
    pub fn portion<I, S>(synonyms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(PatternKind::Portion, synonyms)
    }
    pub fn single<I, S>(synonyms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(PatternKind::Single, synonyms)
    }
    pub fn none<I, S>(synonyms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(PatternKind::None, synonyms)
    }

    fn build<I, S>(kind: PatternKind, synonyms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut safe: Vec<String> = synonyms
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .map(|s| regex::escape(s.as_ref()))
            .collect();
        if safe.is_empty() {
            return Ok(Self { kind, regex: None });
        }
        safe.sort_by_key(|s| Reverse(s.chars().count()));
        let alternation = safe.join("|");
        let source = match kind {
            PatternKind::Portion => format!(r"^({alternation})(\s*)\S"),
            PatternKind::Single => format!(r"^({alternation})$"),
            PatternKind::None => format!(r"({alternation})"),
        };
        let regex = RegexBuilder::new(&source).case_insensitive(true).build()?;
        Ok(Self { kind, regex: Some(regex) })
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn is_match(&self, input: &str) -> bool {
        match (&self.kind, &self.regex) {
            (PatternKind::None, Some(regex)) => !regex.is_match(input),
            (PatternKind::None, None) => true,
            (_, Some(regex)) => regex.is_match(input),
            (_, None) => false,
        }
    }

    /// Matches the pattern against the start of `input`. A `None` pattern
    /// yields an empty match that consumes nothing.
    pub fn find<'i>(&self, input: &'i str) -> Option<PatternMatch<'i>> {
        if self.kind == PatternKind::None {
            return self.is_match(input).then_some(PatternMatch { keyword: "", consumed: 0 });
        }
        let captures = self.regex.as_ref()?.captures(input)?;
        let keyword = captures.get(1)?.as_str();
        let consumed = match self.kind {
            PatternKind::Portion => captures.get(2)?.end(),
            _ => input.len(),
        };
        Some(PatternMatch { keyword, consumed })
    }
}
