//! Pandaquery – the search-box query language of the red panda lineage.
//!
//! Free text typed into the search box ("panda gin", "babies 2019",
//! "credit alice") is lexed against a small grammar of operator keywords and
//! subjects, and then reduced into searches against a graph of pandas, zoos
//! and their photos. Keywords are recognized in English and Japanese.
//!
//! ## Modules
//! * [`operators`] – Operator dictionaries and the registry of derived keyword groups.
//! * [`pattern`] – Keyword patterns (leading portion, whole input, excluded).
//! * [`grammar`] – The rules of the language and the typed parse tree.
//! * [`lexer`] – Recursive-descent lexing of a search string into an [`grammar::Expression`].
//! * [`resolver`] – Turning subjects and keywords into graph searches.
//! * [`environment`] – Per-search state shared by the reduction actions.
//! * [`engine`] – Reduction of a parse tree into a [`engine::ResultBundle`].
//! * [`graph`] – The [`graph::EntityGraph`] search primitives and an in-memory graph.
//! * [`localize`] – Languages and name capitalization.
//! * [`settings`] – Layered configuration, including the keyword dictionaries.
//! * [`cli`] – Arguments of the command line search tool.
//!
//! ## Searching
//! The registry and the compiled grammar are built once and can be shared by
//! any number of engines. An [`environment::Environment`] belongs to exactly
//! one search at a time and must be reset before the next one.
//!
//! ```
//! use pandaquery::{Engine, Environment, MemoryGraph, Settings};
//! let graph = MemoryGraph::from_json(r#"{"pandas": [{"id": 1, "names": {"en": "Harumaki"}}]}"#).unwrap();
//! let settings = Settings::defaults().unwrap();
//! let engine = Engine::new(&graph, &settings).unwrap();
//! let mut env = Environment::new();
//! let bundle = engine.parse("panda harumaki", &mut env).unwrap();
//! assert_eq!(bundle.hits.len(), 1);
//! env.reset();
//! ```
//!
//! ## Operators
//! Only type operators (`panda`, `zoo`, `credit`, `baby`, `dead`) and photo
//! tags take part in expressions today. Subtype, logical and family operators
//! are classified by the registry but not yet parsed.

pub mod cli;
pub mod engine;
pub mod environment;
pub mod error;
pub mod grammar;
pub mod graph;
pub mod lexer;
pub mod localize;
pub mod operators;
pub mod pattern;
pub mod resolver;
pub mod settings;

use core::hash::BuildHasherDefault;
use seahash::SeaHasher;

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

pub use engine::{Engine, ResultBundle};
pub use environment::{Environment, OutputMode};
pub use error::{QueryError, Result};
pub use graph::{EntityGraph, Hit, HitSet, MemoryGraph};
pub use settings::Settings;
