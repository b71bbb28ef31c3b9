//! The rules of the search language and the typed values they produce.
//!
//! ```text
//! expression        ::= zeroaryExpression | typeExpression | tagExpression | subjectTerm
//! zeroaryExpression ::= zeroaryTerm
//! typeExpression    ::= typeTerm space? subjectTerm
//! tagExpression     ::= tagTerm space? subjectTerm
//! subjectTerm       ::= idAtom | nameAtom
//! idAtom            ::= digit{1,5}
//! nameAtom          ::= word (space word)*
//! yearAtom          ::= digit{4}
//! ```
//!
//! Expressions are tried in the order above and the first match wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::OtherHasher;
use crate::error::Result;
use crate::operators::{OperatorRegistry, Tags};
use crate::pattern::Pattern;

lazy_static! {
    static ref ID_ATOM: Regex = Regex::new(r"^[0-9]{1,5}$").unwrap();
    static ref NAME_ATOM: Regex = Regex::new(r"^\S+(\s+\S+)*$").unwrap();
    static ref YEAR_ATOM: Regex = Regex::new(r"^[0-9]{4}$").unwrap();
}

pub fn is_id_atom(input: &str) -> bool {
    ID_ATOM.is_match(input)
}
pub fn is_name_atom(input: &str) -> bool {
    NAME_ATOM.is_match(input)
}
pub fn year_atom(input: &str) -> Option<i32> {
    if YEAR_ATOM.is_match(input) { input.parse().ok() } else { None }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    IdAtom,
    NameAtom,
    YearAtom,
    SubjectTerm,
    TagTerm,
    TypeTerm,
    ZeroaryTerm,
    ZeroaryExpression,
    TypeExpression,
    TagExpression,
}
impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Rule::IdAtom => "idAtom",
            Rule::NameAtom => "nameAtom",
            Rule::YearAtom => "yearAtom",
            Rule::SubjectTerm => "subjectTerm",
            Rule::TagTerm => "tagTerm",
            Rule::TypeTerm => "typeTerm",
            Rule::ZeroaryTerm => "zeroaryTerm",
            Rule::ZeroaryExpression => "zeroaryExpression",
            Rule::TypeExpression => "typeExpression",
            Rule::TagExpression => "tagExpression",
        }
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Alternatives of the root expression rule, highest priority first.
pub const EXPRESSION_PRIORITY: [Rule; 4] = [
    Rule::ZeroaryExpression,
    Rule::TypeExpression,
    Rule::TagExpression,
    Rule::SubjectTerm,
];

/// Which alternative of the root rule produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionKind {
    ZeroaryExpression,
    TypeExpression,
    TagExpression,
    SubjectTerm,
}

// ------------- Parse tree -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom<'q> {
    Id(&'q str),
    Name(&'q str),
}
impl<'q> Atom<'q> {
    pub fn text(&self) -> &'q str {
        match self {
            Atom::Id(text) | Atom::Name(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term<'q> {
    Subject(Atom<'q>),
    Tag(&'q str),
    Type(&'q str),
    Zeroary(&'q str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expression<'q> {
    Zeroary(&'q str),
    Type { keyword: &'q str, subject: Atom<'q> },
    Tag { tag: &'q str, subject: Atom<'q> },
    Subject(Atom<'q>),
}
impl Expression<'_> {
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Expression::Zeroary(_) => ExpressionKind::ZeroaryExpression,
            Expression::Type { .. } => ExpressionKind::TypeExpression,
            Expression::Tag { .. } => ExpressionKind::TagExpression,
            Expression::Subject(_) => ExpressionKind::SubjectTerm,
        }
    }
}

// ------------- Grammar -------------
/// Keyword patterns compiled once from the operator registry and tags.
#[derive(Debug)]
pub struct Grammar {
    tag_term: Pattern,
    type_term: Pattern,
    zeroary_term: Pattern,
    // input containing none of the keywords can only be a bare subject
    plain: Pattern,
    tag_index: HashMap<String, String, OtherHasher>,
}

impl Grammar {
    pub fn new(registry: &OperatorRegistry, tags: &Tags) -> Result<Self> {
        let tag_keywords = tags.keywords();
        let lexable: Vec<&String> = tag_keywords
            .iter()
            .chain(registry.types())
            .chain(registry.zeroary())
            .collect();
        let mut tag_index = HashMap::<String, String, OtherHasher>::default();
        for (name, synonyms) in tags.groups() {
            for synonym in synonyms {
                tag_index.entry(synonym.trim().to_lowercase()).or_insert_with(|| name.clone());
            }
        }
        Ok(Self {
            tag_term: Pattern::portion(&tag_keywords)?,
            type_term: Pattern::portion(registry.types())?,
            zeroary_term: Pattern::single(registry.zeroary())?,
            plain: Pattern::none(lexable)?,
            tag_index,
        })
    }
    pub fn tag_term(&self) -> &Pattern {
        &self.tag_term
    }
    pub fn type_term(&self) -> &Pattern {
        &self.type_term
    }
    pub fn zeroary_term(&self) -> &Pattern {
        &self.zeroary_term
    }
    pub fn plain(&self) -> &Pattern {
        &self.plain
    }
    /// The tag name a surface form stands for; unknown forms map to themselves.
    pub fn canonical_tag(&self, tag: &str) -> String {
        let key = tag.trim().to_lowercase();
        self.tag_index.get(&key).cloned().unwrap_or(key)
    }
}
