mod common;

use pandaquery::graph::{Entity, EntityGraph, Hit, HitSet, TagFallback, TagMode};

#[test]
fn entities_are_distinct_in_first_seen_order() {
    let hits: HitSet = [
        Hit::Photo {
            owner: Entity::Panda(2),
            index: 0,
        },
        Hit::Zoo(1),
        Hit::Photo {
            owner: Entity::Panda(2),
            index: 1,
        },
        Hit::Panda(1),
        Hit::Panda(2),
    ]
    .into_iter()
    .collect();
    assert_eq!(hits.entities(), [Entity::Panda(2), Entity::Zoo(1), Entity::Panda(1)]);
}

#[test]
fn entities_of_many_hits() {
    let hits: HitSet = (0..50_000).map(|i| Hit::Panda(i % 250)).collect();
    let entities = hits.entities();
    assert_eq!(entities.len(), 250);
    assert_eq!(entities[0], Entity::Panda(0));
    assert_eq!(entities[249], Entity::Panda(249));
}

#[test]
fn tagged_photos_and_their_owners() {
    let graph = common::graph();
    let subjects: HitSet = [Hit::Panda(1), Hit::Panda(2)].into_iter().collect();
    let tags = ["sleeping".to_string(), "yawn".to_string()];
    let photos = graph.photos_by_tag(&subjects, &tags, TagMode::Photos, TagFallback::None);
    assert_eq!(photos.len(), 2);
    let owners = graph.photos_by_tag(&subjects, &tags, TagMode::Entities, TagFallback::None);
    assert_eq!(owners.hits(), [Hit::Panda(1), Hit::Panda(2)]);
}

#[test]
fn untagged_fallback() {
    let graph = common::graph();
    let subjects = graph.panda_by_id(1);
    let tags = ["tongue".to_string()];
    assert!(
        graph
            .photos_by_tag(&subjects, &tags, TagMode::Photos, TagFallback::None)
            .is_empty()
    );
    let everything = graph.photos_by_tag(&subjects, &tags, TagMode::Photos, TagFallback::All);
    assert_eq!(everything.len(), 2);
}
