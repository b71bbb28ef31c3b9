//! The entity graph searched by queries.
//!
//! The query core only needs a handful of search primitives, described by the
//! [`EntityGraph`] trait. [`MemoryGraph`] implements them over the lineage
//! dataset export, keeping hashed lookups between names, credits and entities
//! (similar to database indexes) that are built once when the graph loads.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::{BuildHasher, Hash};
use std::path::Path;
use tracing::debug;

use crate::OtherHasher;
use crate::error::Result;
use crate::localize::Language;

// ------------- Hits -------------
pub type EntityId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Entity {
    Panda(EntityId),
    Zoo(EntityId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hit {
    Panda(EntityId),
    Zoo(EntityId),
    Photo { owner: Entity, index: usize },
}
impl Hit {
    pub fn entity(&self) -> Entity {
        match self {
            Hit::Panda(id) => Entity::Panda(*id),
            Hit::Zoo(id) => Entity::Zoo(*id),
            Hit::Photo { owner, .. } => *owner,
        }
    }
}
impl From<Entity> for Hit {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Panda(id) => Hit::Panda(id),
            Entity::Zoo(id) => Hit::Zoo(id),
        }
    }
}

/// An ordered list of hits. Searches that find nothing return an empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HitSet(Vec<Hit>);

impl HitSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }
    pub fn push(&mut self, hit: Hit) {
        self.0.push(hit);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn hits(&self) -> &[Hit] {
        &self.0
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.0.iter()
    }
    /// The distinct entities behind the hits, photos counting as their owner.
    pub fn entities(&self) -> Vec<Entity> {
        let mut seen = HashSet::<Entity, OtherHasher>::default();
        self.0.iter().map(Hit::entity).filter(|entity| seen.insert(*entity)).collect()
    }
}
impl FromIterator<Hit> for HitSet {
    fn from_iter<I: IntoIterator<Item = Hit>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl<'a> IntoIterator for &'a HitSet {
    type Item = &'a Hit;
    type IntoIter = std::slice::Iter<'a, Hit>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What a tag search returns: the tagged photos, or the entities owning them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagMode {
    #[default]
    Photos,
    Entities,
}

/// What a tag search returns when no photo carries the tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFallback {
    #[default]
    None,
    All,
}

pub trait EntityGraph: Send + Sync {
    /// The id the digits denote, if an entity with that id exists.
    fn check_id(&self, digits: &str) -> Option<EntityId>;
    fn panda_by_id(&self, id: EntityId) -> HitSet;
    fn zoo_by_id(&self, id: EntityId) -> HitSet;
    fn pandas_by_name(&self, name: &str) -> HitSet;
    fn zoos_by_name(&self, name: &str) -> HitSet;
    fn babies(&self, year: Option<i32>) -> HitSet;
    fn deceased(&self, year: Option<i32>) -> HitSet;
    fn photos_by_credit(&self, author: &str) -> HitSet;
    fn photos_by_tag(&self, subjects: &HitSet, tags: &[String], mode: TagMode, fallback: TagFallback) -> HitSet;
}

// ------------- Records -------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panda {
    pub id: EntityId,
    #[serde(default)]
    pub names: BTreeMap<Language, String>,
    #[serde(default)]
    pub othernames: Vec<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub death: Option<NaiveDate>,
    #[serde(default)]
    pub zoo: Option<EntityId>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zoo {
    pub id: EntityId,
    #[serde(default)]
    pub names: BTreeMap<Language, String>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

/// The dataset export the graph is loaded from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Export {
    #[serde(default)]
    pub pandas: Vec<Panda>,
    #[serde(default)]
    pub zoos: Vec<Zoo>,
}

// ------------- Lookups -------------
#[derive(Debug)]
pub struct Lookup<K, V, H = OtherHasher> {
    index: HashMap<K, Vec<V>, H>,
}
impl<K: Eq + Hash, V: PartialEq, H: BuildHasher + Default> Lookup<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::<K, Vec<V>, H>::default(),
        }
    }
    pub fn insert(&mut self, key: K, value: V) {
        let values = self.index.entry(key).or_default();
        if !values.contains(&value) {
            values.push(value);
        }
    }
    pub fn lookup(&self, key: &K) -> &[V] {
        self.index.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ------------- MemoryGraph -------------
pub struct MemoryGraph {
    pandas: BTreeMap<EntityId, Panda>,
    zoos: BTreeMap<EntityId, Zoo>,
    panda_names: Lookup<String, EntityId>,
    zoo_names: Lookup<String, EntityId>,
    // keyed by lowercased author, so credit searches ignore case
    credits: Lookup<String, Hit>,
    last_born: Option<i32>,
}

impl MemoryGraph {
    pub fn new(export: Export) -> Self {
        let mut panda_names = Lookup::new();
        let mut zoo_names = Lookup::new();
        let mut credits = Lookup::new();
        let pandas: BTreeMap<EntityId, Panda> = export.pandas.into_iter().map(|p| (p.id, p)).collect();
        let zoos: BTreeMap<EntityId, Zoo> = export.zoos.into_iter().map(|z| (z.id, z)).collect();
        for panda in pandas.values() {
            for name in panda.names.values().chain(panda.othernames.iter()) {
                panda_names.insert(name.clone(), panda.id);
            }
            index_credits(&mut credits, Entity::Panda(panda.id), &panda.photos);
        }
        for zoo in zoos.values() {
            for name in zoo.names.values() {
                zoo_names.insert(name.clone(), zoo.id);
            }
            index_credits(&mut credits, Entity::Zoo(zoo.id), &zoo.photos);
        }
        let last_born = pandas.values().filter_map(|p| p.birthday).map(|d| d.year()).max();
        debug!(pandas = pandas.len(), zoos = zoos.len(), "graph loaded");
        Self {
            pandas,
            zoos,
            panda_names,
            zoo_names,
            credits,
            last_born,
        }
    }
    pub fn from_json(json: &str) -> Result<Self> {
        let export: Export = serde_json::from_str(json)?;
        Ok(Self::new(export))
    }
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
    pub fn panda(&self, id: EntityId) -> Option<&Panda> {
        self.pandas.get(&id)
    }
    pub fn zoo(&self, id: EntityId) -> Option<&Zoo> {
        self.zoos.get(&id)
    }
    fn photos(&self, entity: Entity) -> &[Photo] {
        let photos = match entity {
            Entity::Panda(id) => self.pandas.get(&id).map(|p| p.photos.as_slice()),
            Entity::Zoo(id) => self.zoos.get(&id).map(|z| z.photos.as_slice()),
        };
        photos.unwrap_or(&[])
    }
    fn pandas_where(&self, keep: impl Fn(&Panda) -> bool) -> HitSet {
        self.pandas.values().filter(|p| keep(p)).map(|p| Hit::Panda(p.id)).collect()
    }
}

fn index_credits(credits: &mut Lookup<String, Hit>, owner: Entity, photos: &[Photo]) {
    for (index, photo) in photos.iter().enumerate() {
        if let Some(author) = &photo.author {
            credits.insert(author.to_lowercase(), Hit::Photo { owner, index });
        }
    }
}

impl EntityGraph for MemoryGraph {
    fn check_id(&self, digits: &str) -> Option<EntityId> {
        let id = digits.parse::<EntityId>().ok()?;
        (self.pandas.contains_key(&id) || self.zoos.contains_key(&id)).then_some(id)
    }
    fn panda_by_id(&self, id: EntityId) -> HitSet {
        self.pandas.get(&id).map(|p| Hit::Panda(p.id)).into_iter().collect()
    }
    fn zoo_by_id(&self, id: EntityId) -> HitSet {
        self.zoos.get(&id).map(|z| Hit::Zoo(z.id)).into_iter().collect()
    }
    fn pandas_by_name(&self, name: &str) -> HitSet {
        self.panda_names.lookup(&name.to_string()).iter().map(|id| Hit::Panda(*id)).collect()
    }
    fn zoos_by_name(&self, name: &str) -> HitSet {
        self.zoo_names.lookup(&name.to_string()).iter().map(|id| Hit::Zoo(*id)).collect()
    }
    fn babies(&self, year: Option<i32>) -> HitSet {
        match year.or(self.last_born) {
            Some(year) => self.pandas_where(|p| p.birthday.is_some_and(|d| d.year() == year)),
            None => HitSet::new(),
        }
    }
    fn deceased(&self, year: Option<i32>) -> HitSet {
        self.pandas_where(|p| match (p.death, year) {
            (Some(death), Some(year)) => death.year() == year,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
    fn photos_by_credit(&self, author: &str) -> HitSet {
        self.credits.lookup(&author.to_lowercase()).iter().copied().collect()
    }
    fn photos_by_tag(&self, subjects: &HitSet, tags: &[String], mode: TagMode, fallback: TagFallback) -> HitSet {
        let mut found = HitSet::new();
        let mut everything = HitSet::new();
        for owner in subjects.entities() {
            for (index, photo) in self.photos(owner).iter().enumerate() {
                let photo_hit = Hit::Photo { owner, index };
                everything.push(photo_hit);
                let tagged = photo
                    .tags
                    .iter()
                    .any(|t| tags.iter().any(|wanted| wanted.eq_ignore_ascii_case(t)));
                if tagged {
                    found.push(photo_hit);
                }
            }
        }
        if found.is_empty() && fallback == TagFallback::All {
            found = everything;
        }
        match mode {
            TagMode::Photos => found,
            TagMode::Entities => found.entities().into_iter().map(Hit::from).collect(),
        }
    }
}
