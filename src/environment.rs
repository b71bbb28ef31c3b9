//! Per-search state shared by the reduction actions of a single parse.
//!
//! Actions read what earlier actions wrote (a `credit` type term switches the
//! output to photos before the subject is reduced), so nothing is cleared
//! automatically. Call [`Environment::reset`] before every new search.

use serde::Serialize;

use crate::graph::EntityId;

/// When displaying results, normally we just display zoos and pandas
/// ("entities"). Credit and tag searches show a spread of photos instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Entities,
    Photos,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Environment {
    pub output: OutputMode,
    /// Author the shown photos are filtered on.
    pub credit: Option<String>,
    pub preserve_case: bool,
    /// Set by the host when a link points at one specific entity.
    pub specific: Option<EntityId>,
    /// Text of every term reduced so far in this parse.
    pub terms: Vec<String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        self.output = OutputMode::Entities;
        self.credit = None;
        self.preserve_case = false;
        self.specific = None;
        self.terms.clear();
    }
}
