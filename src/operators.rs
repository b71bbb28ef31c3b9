//! Operator keywords and their classification.
//!
//! Operators are organized into categories (`type`, `subtype`, `glob`,
//! `logical`, `family`), then by operator name, and then by the surface forms
//! in the languages we search in. The registry flattens these dictionaries
//! once into the category-level groups the grammar and the resolver work with.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::OtherHasher;
use crate::error::{QueryError, Result};

// ------------- Keywords -------------
/// A keyword value as found in a dictionary: one word, a list, or a named
/// map of further keyword values. Lists may nest to any depth, and named maps
/// keep the order their entries were declared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Word(String),
    List(Vec<Keywords>),
    Group(IndexMap<String, Keywords>),
}
impl Keywords {
    pub fn words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Keywords::List(words.into_iter().map(|w| Keywords::Word(w.into())).collect())
    }
}

/// Flattens a keyword value into a single ordered list of words.
/// Append order is kept and duplicates are not removed.
pub fn flatten(keywords: &Keywords) -> Vec<String> {
    let mut flat = Vec::new();
    flatten_into(keywords, &mut flat);
    flat
}

fn flatten_into(keywords: &Keywords, flat: &mut Vec<String>) {
    match keywords {
        Keywords::Word(word) => flat.push(word.clone()),
        Keywords::List(list) => {
            for keyword in list {
                flatten_into(keyword, flat);
            }
        }
        Keywords::Group(group) => {
            for keyword in group.values() {
                flatten_into(keyword, flat);
            }
        }
    }
}

fn index_key(word: &str) -> String {
    word.trim().to_lowercase()
}

// ------------- TypeKeyword -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKeyword {
    Baby,
    Credit,
    Dead,
    Panda,
    Zoo,
}
impl TypeKeyword {
    pub const ALL: [TypeKeyword; 5] = [
        TypeKeyword::Baby,
        TypeKeyword::Credit,
        TypeKeyword::Dead,
        TypeKeyword::Panda,
        TypeKeyword::Zoo,
    ];
    pub fn name(&self) -> &'static str {
        match self {
            TypeKeyword::Baby => "baby",
            TypeKeyword::Credit => "credit",
            TypeKeyword::Dead => "dead",
            TypeKeyword::Panda => "panda",
            TypeKeyword::Zoo => "zoo",
        }
    }
}
impl FromStr for TypeKeyword {
    type Err = QueryError;
    fn from_str(s: &str) -> Result<Self> {
        TypeKeyword::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| QueryError::Config(format!("Unknown type operator '{s}'")))
    }
}
impl fmt::Display for TypeKeyword {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Dictionary -------------
/// The operator dictionaries, keyed by category and then by operator name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    #[serde(rename = "type", default)]
    pub types: IndexMap<String, Keywords>,
    #[serde(default)]
    pub subtype: IndexMap<String, Keywords>,
    #[serde(default)]
    pub glob: IndexMap<String, Keywords>,
    #[serde(default)]
    pub logical: IndexMap<String, Keywords>,
    #[serde(default)]
    pub family: IndexMap<String, Keywords>,
}

/// A synonym that occurs inside a synonym of an unrelated group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub group: String,
    pub synonym: String,
    pub other_group: String,
    pub other_synonym: String,
}
impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "'{}' ({}) occurs in '{}' ({})",
            self.synonym, self.group, self.other_synonym, self.other_group
        )
    }
}

impl Dictionary {
    /// Every operator group as ("category.name", synonyms), in category order.
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        let categories = [
            ("type", &self.types),
            ("subtype", &self.subtype),
            ("glob", &self.glob),
            ("logical", &self.logical),
            ("family", &self.family),
        ];
        let mut groups = Vec::new();
        for (category, operators) in categories {
            for (name, keywords) in operators {
                groups.push((format!("{category}.{name}"), flatten(keywords)));
            }
        }
        groups
    }

    /// Synonyms that are substrings of synonyms in unrelated groups. Groups are
    /// related when they share an operator name or one name prefixes the other.
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let groups: Vec<(String, String, Vec<String>)> = self
            .groups()
            .into_iter()
            .map(|(group, synonyms)| {
                let name = group.split_once('.').map(|(_, n)| n).unwrap_or(group.as_str()).to_lowercase();
                let mut seen = HashSet::<String, OtherHasher>::default();
                let synonyms = synonyms
                    .iter()
                    .map(|s| index_key(s))
                    .filter(|s| !s.is_empty() && seen.insert(s.clone()))
                    .collect();
                (group, name, synonyms)
            })
            .collect();
        let mut found = Vec::new();
        for (group, name, synonyms) in &groups {
            for (other_group, other_name, other_synonyms) in &groups {
                if group == other_group || name.starts_with(other_name.as_str()) || other_name.starts_with(name.as_str()) {
                    continue;
                }
                for synonym in synonyms {
                    for other_synonym in other_synonyms {
                        if other_synonym.contains(synonym.as_str()) {
                            found.push(Ambiguity {
                                group: group.clone(),
                                synonym: synonym.clone(),
                                other_group: other_group.clone(),
                                other_synonym: other_synonym.clone(),
                            });
                        }
                    }
                }
            }
        }
        found
    }
}

// ------------- Tags -------------
/// Photo tags keyed by tag name, each with its surface forms per language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(IndexMap<String, Keywords>);

impl Tags {
    pub fn new(tags: IndexMap<String, Keywords>) -> Self {
        Self(tags)
    }
    /// All surface forms of all tags.
    pub fn keywords(&self) -> Vec<String> {
        flatten(&Keywords::Group(self.0.clone()))
    }
    pub fn groups(&self) -> Vec<(String, Vec<String>)> {
        self.0.iter().map(|(name, keywords)| (name.clone(), flatten(keywords))).collect()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ------------- OperatorRegistry -------------
/// Derived operator groups, computed once and read-only afterwards.
#[derive(Debug)]
pub struct OperatorRegistry {
    types: Vec<String>,
    zeroary: Vec<String>,
    unary: Vec<String>,
    binary: Vec<String>,
    type_synonyms: BTreeMap<TypeKeyword, Vec<String>>,
    type_index: HashMap<String, TypeKeyword, OtherHasher>,
    zeroary_index: HashSet<String, OtherHasher>,
    unary_index: HashSet<String, OtherHasher>,
    binary_index: HashSet<String, OtherHasher>,
}

impl OperatorRegistry {
    pub fn new(dictionary: &Dictionary, strict: bool) -> Result<Self> {
        let ambiguities = dictionary.ambiguities();
        if !ambiguities.is_empty() {
            if strict {
                return Err(QueryError::Ambiguous(
                    ambiguities.iter().map(|a| a.to_string()).collect(),
                ));
            }
            for ambiguity in &ambiguities {
                debug!(%ambiguity, "ambiguous keyword");
            }
            debug!(count = ambiguities.len(), "operator dictionary contains ambiguous keywords");
        }

        let mut type_synonyms = BTreeMap::new();
        let mut type_index = HashMap::<String, TypeKeyword, OtherHasher>::default();
        for (name, keywords) in &dictionary.types {
            let kind: TypeKeyword = name.parse()?;
            let synonyms = flatten(keywords);
            for synonym in &synonyms {
                // first declared type wins for a repeated synonym
                type_index.entry(index_key(synonym)).or_insert(kind);
            }
            type_synonyms.insert(kind, synonyms);
        }

        let category = |operators: &IndexMap<String, Keywords>| Keywords::Group(operators.clone());
        let types = flatten(&category(&dictionary.types));
        let zeroary = flatten(&Keywords::List(
            ["baby", "dead"]
                .iter()
                .filter_map(|name| dictionary.types.get(*name).cloned())
                .collect(),
        ));
        let unary = flatten(&Keywords::List(vec![
            category(&dictionary.types),
            category(&dictionary.subtype),
            category(&dictionary.family),
        ]));
        let binary = flatten(&Keywords::List(vec![
            category(&dictionary.logical),
            category(&dictionary.family),
        ]));

        let index = |words: &[String]| words.iter().map(|w| index_key(w)).collect::<HashSet<_, OtherHasher>>();
        Ok(Self {
            zeroary_index: index(&zeroary),
            unary_index: index(&unary),
            binary_index: index(&binary),
            types,
            zeroary,
            unary,
            binary,
            type_synonyms,
            type_index,
        })
    }
    pub fn types(&self) -> &[String] {
        &self.types
    }
    pub fn zeroary(&self) -> &[String] {
        &self.zeroary
    }
    pub fn unary(&self) -> &[String] {
        &self.unary
    }
    pub fn binary(&self) -> &[String] {
        &self.binary
    }
    pub fn synonyms(&self, kind: TypeKeyword) -> &[String] {
        self.type_synonyms.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }
    /// The type operator a surface form denotes, ignoring case.
    pub fn type_keyword(&self, word: &str) -> Option<TypeKeyword> {
        self.type_index.get(&index_key(word)).copied()
    }
    pub fn is_zeroary(&self, word: &str) -> bool {
        self.zeroary_index.contains(&index_key(word))
    }
    pub fn is_unary(&self, word: &str) -> bool {
        self.unary_index.contains(&index_key(word))
    }
    pub fn is_binary(&self, word: &str) -> bool {
        self.binary_index.contains(&index_key(word))
    }
}
