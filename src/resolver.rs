//! Resolvers turn a parsed value into nodes of the entity graph.
//!
//! Resolution never fails: values that denote nothing (an unknown id, an
//! operator without a resolution) simply produce an empty [`HitSet`].

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::grammar::year_atom;
use crate::graph::{EntityGraph, EntityId, HitSet};
use crate::localize::{Language, Localizer};
use crate::operators::{OperatorRegistry, TypeKeyword};

/// A reduced subject: its text, and the entity id it denotes when the text
/// was an id atom naming an existing entity (`None` is the "no id" sentinel).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub text: String,
    pub id: Option<EntityId>,
}
impl Subject {
    pub fn name(text: impl Into<String>) -> Self {
        Self { text: text.into(), id: None }
    }
    pub fn id(text: impl Into<String>, id: Option<EntityId>) -> Self {
        Self { text: text.into(), id }
    }
}

pub struct Resolver<'g> {
    graph: &'g dyn EntityGraph,
    registry: Arc<OperatorRegistry>,
    localizer: Arc<dyn Localizer>,
}

impl<'g> Resolver<'g> {
    pub fn new(graph: &'g dyn EntityGraph, registry: Arc<OperatorRegistry>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            graph,
            registry,
            localizer,
        }
    }
    pub fn graph(&self) -> &'g dyn EntityGraph {
        self.graph
    }
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }
    pub fn localizer(&self) -> &dyn Localizer {
        self.localizer.as_ref()
    }

    /// Re-capitalizes free text to match the names in the dataset.
    pub fn name(&self, input: &str, language: Language) -> String {
        let words: Vec<&str> = input.split_whitespace().collect();
        self.localizer.capitalize_names(&words, language)
    }

    /// Searches that are just a single keyword, like "babies".
    pub fn resolve_singleton(&self, keyword: &str) -> HitSet {
        match self.registry.type_keyword(keyword) {
            Some(TypeKeyword::Baby) => self.graph.babies(None),
            Some(TypeKeyword::Dead) => self.graph.deceased(None),
            _ => {
                warn!(keyword, "operator has no singleton resolution");
                HitSet::new()
            }
        }
    }

    /// Resolves a subject typed by an operator keyword, or untyped when
    /// `keyword` is `None`. A keyword that is not a type operator resolves to
    /// nothing.
    pub fn resolve_subject(&self, subject: &Subject, keyword: Option<&str>, language: Language) -> HitSet {
        match keyword {
            None => self.resolve(subject, None, language),
            Some(keyword) => match self.registry.type_keyword(keyword) {
                Some(kind) => self.resolve(subject, Some(kind), language),
                None => {
                    debug!(keyword, "not a type operator");
                    HitSet::new()
                }
            },
        }
    }

    /// Resolves a subject for an already classified type. The first matching
    /// arm wins.
    pub fn resolve(&self, subject: &Subject, kind: Option<TypeKeyword>, language: Language) -> HitSet {
        let hits = match (subject.id, kind) {
            // explicitly search by id
            (Some(id), Some(TypeKeyword::Panda)) => self.graph.panda_by_id(id),
            (Some(id), Some(TypeKeyword::Zoo)) => self.graph.zoo_by_id(id),
            // births and deaths, by year when one is given
            (_, Some(TypeKeyword::Baby)) => self.graph.babies(year_atom(&subject.text)),
            (_, Some(TypeKeyword::Dead)) => self.graph.deceased(year_atom(&subject.text)),
            (_, Some(TypeKeyword::Credit)) => self.graph.photos_by_credit(&subject.text),
            // raw ids are assumed to be panda ids
            (Some(id), None) => self.graph.panda_by_id(id),
            // otherwise search by name
            (None, Some(TypeKeyword::Panda)) => self.graph.pandas_by_name(&self.name(&subject.text, language)),
            (None, Some(TypeKeyword::Zoo)) => self.graph.zoos_by_name(&self.name(&subject.text, language)),
            (None, None) => HitSet::new(),
        };
        debug!(subject = %subject.text, kind = ?kind, %language, hits = hits.len(), "subject resolved");
        hits
    }
}
