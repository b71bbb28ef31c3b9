mod common;

use std::sync::Arc;

use common::setup;
use pandaquery::engine::Candidate;
use pandaquery::grammar::{ExpressionKind, Grammar};
use pandaquery::graph::{Entity, EntityGraph, Hit};
use pandaquery::localize::{Capitalizer, Language};
use pandaquery::operators::{OperatorRegistry, TypeKeyword};
use pandaquery::{Engine, Environment, OutputMode, QueryError};

#[test]
fn zeroary_search() {
    let engine = setup();
    let mut env = Environment::new();
    let bundle = engine.parse("babies", &mut env).unwrap();
    assert_eq!(bundle.parsed, ExpressionKind::ZeroaryExpression);
    assert_eq!(bundle.hits, engine.resolver().resolve_singleton("baby"));
    assert_eq!(bundle.keyword.as_deref(), Some("babies"));
    assert_eq!(bundle.resolved, Some(TypeKeyword::Baby));
    assert_eq!(env.output, OutputMode::Entities);
    assert_eq!(env.terms, ["babies"]);
}

#[test]
fn panda_by_id() {
    let engine = setup();
    let mut env = Environment::new();
    let bundle = engine.parse("panda 123", &mut env).unwrap();
    assert_eq!(bundle.parsed, ExpressionKind::TypeExpression);
    assert_eq!(bundle.hits, engine.resolver().graph().panda_by_id(123));
    assert_eq!(bundle.hits.hits(), [Hit::Panda(123)]);
    assert_eq!(bundle.query, "panda 123");
}

#[test]
fn zoo_by_id_and_name() {
    let engine = setup();
    let (bundle, _) = engine.search("zoo 1").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Zoo(1)]);
    assert_eq!(bundle.resolved, Some(TypeKeyword::Zoo));
    let (bundle, _) = engine.search("zoo maruyama").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Zoo(2)]);
}

#[test]
fn credit_switches_to_photos() {
    let engine = setup();
    let mut env = Environment::new();
    let bundle = engine.parse("credit alice", &mut env).unwrap();
    assert_eq!(env.output, OutputMode::Photos);
    assert!(env.preserve_case);
    // case is kept for the credit filter
    assert_eq!(env.credit.as_deref(), Some("alice"));
    assert_eq!(bundle.resolved, Some(TypeKeyword::Credit));
    assert_eq!(bundle.hits, engine.resolver().graph().photos_by_credit("Alice"));
    assert_eq!(bundle.hits.len(), 2);
}

#[test]
fn births_and_deaths_by_year() {
    let engine = setup();
    let (bundle, _) = engine.search("babies 2019").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(2), Hit::Panda(3)]);
    let (bundle, _) = engine.search("dead 2018").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(4)]);
    let (bundle, _) = engine.search("died").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(4), Hit::Panda(5)]);
}

#[test]
fn tag_search() {
    let engine = setup();
    let mut env = Environment::new();
    let bundle = engine.parse("sleeping harumaki", &mut env).unwrap();
    assert_eq!(bundle.parsed, ExpressionKind::TagExpression);
    assert_eq!(
        bundle.hits.hits(),
        [Hit::Photo {
            owner: Entity::Panda(1),
            index: 0
        }]
    );
    assert_eq!(env.output, OutputMode::Photos);
    assert_eq!(env.credit.as_deref(), Some("Harumaki"));

    let (bundle, _) = engine.search("yawning gin").unwrap();
    assert_eq!(
        bundle.hits.hits(),
        [Hit::Photo {
            owner: Entity::Panda(2),
            index: 0
        }]
    );
    let (bundle, _) = engine.search("climbing nishiyama").unwrap();
    assert_eq!(bundle.resolved, Some(TypeKeyword::Zoo));
    assert_eq!(bundle.hits.len(), 1);
    let (bundle, _) = engine.search("asleep gin").unwrap();
    assert!(bundle.hits.is_empty());
}

#[test]
fn bare_subjects() {
    let engine = setup();
    let (bundle, env) = engine.search("gin").unwrap();
    assert_eq!(bundle.parsed, ExpressionKind::SubjectTerm);
    assert_eq!(bundle.resolved, Some(TypeKeyword::Panda));
    assert_eq!(bundle.hits.hits(), [Hit::Panda(2)]);
    assert_eq!(bundle.keyword, None);
    assert_eq!(bundle.candidates.len(), 3);
    assert!(bundle.candidates[&Candidate::Zoo].is_empty());
    assert_eq!(env.terms, ["Gin"]);

    let (bundle, _) = engine.search("nishiyama").unwrap();
    assert_eq!(bundle.resolved, Some(TypeKeyword::Zoo));
    assert_eq!(bundle.hits.hits(), [Hit::Zoo(1)]);

    // panda and zoo 1 both exist; raw ids prefer pandas
    let (bundle, _) = engine.search("1").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(1)]);
    assert_eq!(bundle.candidates[&Candidate::Zoo].hits(), [Hit::Zoo(1)]);

    let (bundle, _) = engine.search("99999").unwrap();
    assert!(bundle.hits.is_empty());
    assert_eq!(bundle.resolved, None);

    let (bundle, _) = engine.search("g").unwrap();
    assert_eq!(bundle.parsed, ExpressionKind::SubjectTerm);
    assert!(bundle.hits.is_empty());
}

#[test]
fn empty_queries_fail() {
    let engine = setup();
    let mut env = Environment::new();
    assert!(matches!(engine.parse("", &mut env), Err(QueryError::EmptyQuery)));
    assert!(matches!(engine.parse("   ", &mut env), Err(QueryError::EmptyQuery)));
    assert_eq!(env, Environment::new());
}

#[test]
fn terms_are_recorded() {
    let engine = setup();
    let (_, env) = engine.search("panda harumaki").unwrap();
    assert_eq!(env.terms, ["panda", "Harumaki"]);
}

#[test]
fn reset_between_searches() {
    let engine = setup();
    let mut env = Environment::new();
    engine.parse("credit alice", &mut env).unwrap();
    env.reset();
    engine.parse("gin", &mut env).unwrap();
    assert_eq!(env.output, OutputMode::Entities);
    assert_eq!(env.credit, None);
    assert!(!env.preserve_case);
    assert_eq!(env.terms, ["Gin"]);
}

#[test]
fn state_leaks_without_reset() {
    let engine = setup();
    let mut env = Environment::new();
    engine.parse("credit alice", &mut env).unwrap();
    engine.parse("gin", &mut env).unwrap();
    // the previous search left photo output and case preservation on
    assert_eq!(env.output, OutputMode::Photos);
    assert_eq!(env.credit.as_deref(), Some("gin"));
    assert_eq!(env.terms, ["credit", "alice", "gin"]);
}

#[test]
fn japanese_search() {
    let engine = setup().with_language(Language::Jp);
    let (bundle, _) = engine.search("パンダ春巻").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(1)]);
    let (bundle, _) = engine.search("赤ちゃん").unwrap();
    assert_eq!(bundle.hits.hits(), [Hit::Panda(2), Hit::Panda(3)]);
}

#[test]
fn engines_share_a_grammar() {
    let settings = common::settings();
    let graph = common::graph();
    let registry = Arc::new(OperatorRegistry::new(&settings.operators, false).unwrap());
    let grammar = Arc::new(Grammar::new(&registry, &settings.tags).unwrap());
    let english = Engine::from_parts(&graph, registry.clone(), grammar.clone(), Arc::new(Capitalizer), Language::En);
    let japanese = Engine::from_parts(&graph, registry, grammar, Arc::new(Capitalizer), Language::Jp);
    std::thread::scope(|scope| {
        let en = scope.spawn(|| english.search("panda harumaki").unwrap().0);
        let jp = scope.spawn(|| japanese.search("パンダ 春巻").unwrap().0);
        assert_eq!(en.join().unwrap().hits.hits(), [Hit::Panda(1)]);
        assert_eq!(jp.join().unwrap().hits.hits(), [Hit::Panda(1)]);
    });
}

#[test]
fn bundles_serialize() {
    let engine = setup();
    let (bundle, _) = engine.search("panda gin").unwrap();
    let json = serde_json::to_value(&bundle).unwrap();
    assert_eq!(json["parsed"], "typeExpression");
    assert_eq!(json["resolved"], "panda");
    assert_eq!(json["hits"][0]["panda"], 2);
    assert!(json.get("candidates").is_none());
}
