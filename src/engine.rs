//! The query engine: lexes a search string and reduces the parse tree into a
//! [`ResultBundle`].
//!
//! Reduction runs left to right and innermost first. Term actions run before
//! the subject they precede is reduced, so a `credit` type term has already
//! switched the environment to photo output (and turned off name
//! capitalization) by the time the subject's atom is reduced. Each action's
//! return value is what the enclosing rule's action receives.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::environment::{Environment, OutputMode};
use crate::error::Result;
use crate::grammar::{Atom, Expression, ExpressionKind, Grammar};
use crate::graph::{EntityGraph, HitSet, TagFallback, TagMode};
use crate::lexer::Lexer;
use crate::localize::{Capitalizer, Language, Localizer};
use crate::operators::{OperatorRegistry, TypeKeyword};
use crate::resolver::{Resolver, Subject};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Candidate {
    Panda,
    Zoo,
    Credit,
}

/// The outcome of one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub query: String,
    pub parsed: ExpressionKind,
    pub hits: HitSet,
    /// The operator or tag keyword, as typed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<TypeKeyword>,
    /// Hits per candidate type, for subjects given without an operator.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub candidates: BTreeMap<Candidate, HitSet>,
}

/// A reduced subject term: the subject and what it resolves to as a panda,
/// as a zoo, and as a photo credit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectHits {
    pub subject: Subject,
    pub panda_hits: HitSet,
    pub zoo_hits: HitSet,
    pub credit_hits: HitSet,
}

pub struct Engine<'g> {
    grammar: Arc<Grammar>,
    resolver: Resolver<'g>,
    language: Language,
}

impl<'g> Engine<'g> {
    pub fn new(graph: &'g dyn EntityGraph, settings: &Settings) -> Result<Self> {
        let registry = Arc::new(OperatorRegistry::new(&settings.operators, settings.strict_keywords)?);
        let grammar = Arc::new(Grammar::new(&registry, &settings.tags)?);
        Ok(Self::from_parts(graph, registry, grammar, Arc::new(Capitalizer), settings.language))
    }
    /// Builds an engine around an already compiled registry and grammar, which
    /// may be shared with other engines.
    pub fn from_parts(
        graph: &'g dyn EntityGraph,
        registry: Arc<OperatorRegistry>,
        grammar: Arc<Grammar>,
        localizer: Arc<dyn Localizer>,
        language: Language,
    ) -> Self {
        Self {
            grammar,
            resolver: Resolver::new(graph, registry, localizer),
            language,
        }
    }
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
    pub fn resolver(&self) -> &Resolver<'g> {
        &self.resolver
    }
    pub fn language(&self) -> Language {
        self.language
    }

    /// Parses one search string. The environment is read and written by the
    /// reduction actions; reset it before each new search.
    pub fn parse(&self, input: &str, env: &mut Environment) -> Result<ResultBundle> {
        let expression = Lexer::new(&self.grammar).lex(input)?;
        let bundle = match expression {
            Expression::Zeroary(keyword) => {
                let keyword = self.zeroary_term(keyword, env);
                self.zeroary_expression(keyword)
            }
            Expression::Type { keyword, subject } => {
                let keyword = self.type_term(keyword, env);
                let subject = self.subject_term(subject, env);
                self.type_expression(keyword, subject)
            }
            Expression::Tag { tag, subject } => {
                let tag = self.tag_term(tag, env);
                let subject = self.subject_term(subject, env);
                self.tag_expression(tag, subject)
            }
            Expression::Subject(subject) => {
                let subject = self.subject_term(subject, env);
                self.bare_subject(subject)
            }
        };
        debug!(query = %bundle.query, parsed = ?bundle.parsed, hits = bundle.hits.len(), output = ?env.output, "query reduced");
        Ok(bundle)
    }

    /// Parses one search string in a fresh environment.
    pub fn search(&self, input: &str) -> Result<(ResultBundle, Environment)> {
        let mut env = Environment::new();
        let bundle = self.parse(input, &mut env)?;
        Ok((bundle, env))
    }

    // ------------- Atom actions -------------
    // Unknown ids become the "no id" sentinel; the digits are kept as text.
    fn id_atom(&self, digits: &str) -> Subject {
        Subject::id(digits, self.resolver.graph().check_id(digits))
    }
    // Latin partials have to match the capitalized names in the dataset,
    // unless this search asked for case to be kept.
    fn name_atom(&self, words: &str, env: &Environment) -> Subject {
        if env.preserve_case {
            Subject::name(words.split_whitespace().collect::<Vec<_>>().join(" "))
        } else {
            Subject::name(self.resolver.name(words, self.language))
        }
    }

    // ------------- Term actions -------------
    fn subject_term(&self, atom: Atom, env: &mut Environment) -> SubjectHits {
        let subject = match atom {
            Atom::Id(digits) => self.id_atom(digits),
            Atom::Name(words) => self.name_atom(words, env),
        };
        env.terms.push(subject.text.clone());
        if env.output == OutputMode::Photos {
            // photo results get filtered on this name afterwards
            env.credit = Some(subject.text.clone());
        }
        SubjectHits {
            panda_hits: self.resolver.resolve(&subject, Some(TypeKeyword::Panda), self.language),
            zoo_hits: self.resolver.resolve(&subject, Some(TypeKeyword::Zoo), self.language),
            credit_hits: self.resolver.resolve(&subject, Some(TypeKeyword::Credit), self.language),
            subject,
        }
    }
    fn tag_term(&self, tag: &str, env: &mut Environment) -> String {
        let tag = tag.trim().to_string();
        env.output = OutputMode::Photos;
        env.terms.push(tag.clone());
        tag
    }
    fn type_term(&self, keyword: &str, env: &mut Environment) -> String {
        let keyword = keyword.trim().to_string();
        if self.resolver.registry().type_keyword(&keyword) == Some(TypeKeyword::Credit) {
            env.preserve_case = true;
            env.output = OutputMode::Photos;
        } else {
            env.preserve_case = false;
            env.output = OutputMode::Entities;
        }
        env.terms.push(keyword.clone());
        keyword
    }
    fn zeroary_term(&self, keyword: &str, env: &mut Environment) -> String {
        let keyword = keyword.trim().to_string();
        env.terms.push(keyword.clone());
        keyword
    }

    // ------------- Expression actions -------------
    fn zeroary_expression(&self, keyword: String) -> ResultBundle {
        ResultBundle {
            query: keyword.clone(),
            parsed: ExpressionKind::ZeroaryExpression,
            hits: self.resolver.resolve_singleton(&keyword),
            resolved: self.resolver.registry().type_keyword(&keyword),
            keyword: Some(keyword),
            candidates: BTreeMap::new(),
        }
    }
    fn type_expression(&self, keyword: String, subject: SubjectHits) -> ResultBundle {
        let kind = self.resolver.registry().type_keyword(&keyword);
        let hits = match kind {
            Some(TypeKeyword::Panda) => subject.panda_hits,
            Some(TypeKeyword::Zoo) => subject.zoo_hits,
            Some(TypeKeyword::Credit) => subject.credit_hits,
            Some(kind @ (TypeKeyword::Baby | TypeKeyword::Dead)) => {
                self.resolver.resolve(&subject.subject, Some(kind), self.language)
            }
            None => HitSet::new(),
        };
        ResultBundle {
            query: format!("{} {}", keyword, subject.subject.text),
            parsed: ExpressionKind::TypeExpression,
            hits,
            keyword: Some(keyword),
            resolved: kind,
            candidates: BTreeMap::new(),
        }
    }
    fn tag_expression(&self, tag: String, subject: SubjectHits) -> ResultBundle {
        let (resolved, scope) = if !subject.panda_hits.is_empty() {
            (Some(TypeKeyword::Panda), &subject.panda_hits)
        } else if !subject.zoo_hits.is_empty() {
            (Some(TypeKeyword::Zoo), &subject.zoo_hits)
        } else {
            (None, &subject.panda_hits)
        };
        let tags = [self.grammar.canonical_tag(&tag)];
        let hits = self
            .resolver
            .graph()
            .photos_by_tag(scope, &tags, TagMode::Photos, TagFallback::None);
        ResultBundle {
            query: format!("{} {}", tag, subject.subject.text),
            parsed: ExpressionKind::TagExpression,
            hits,
            keyword: Some(tag),
            resolved,
            candidates: BTreeMap::new(),
        }
    }
    // Decides between panda and zoo for a subject given without an operator.
    fn bare_subject(&self, subject: SubjectHits) -> ResultBundle {
        let untyped = match subject.subject.id {
            Some(_) => self.resolver.resolve(&subject.subject, None, self.language),
            None => HitSet::new(),
        };
        let (resolved, hits) = if !untyped.is_empty() {
            (Some(TypeKeyword::Panda), untyped)
        } else if !subject.panda_hits.is_empty() {
            (Some(TypeKeyword::Panda), subject.panda_hits.clone())
        } else if !subject.zoo_hits.is_empty() {
            (Some(TypeKeyword::Zoo), subject.zoo_hits.clone())
        } else {
            (None, HitSet::new())
        };
        let candidates = BTreeMap::from([
            (Candidate::Panda, subject.panda_hits),
            (Candidate::Zoo, subject.zoo_hits),
            (Candidate::Credit, subject.credit_hits),
        ]);
        ResultBundle {
            query: subject.subject.text,
            parsed: ExpressionKind::SubjectTerm,
            hits,
            keyword: None,
            resolved,
            candidates,
        }
    }
}
