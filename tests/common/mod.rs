#![allow(dead_code)]

use pandaquery::{Engine, MemoryGraph, Settings};

pub const FIXTURE: &str = r#"{
  "pandas": [
    { "id": 1, "names": { "en": "Harumaki", "jp": "春巻" }, "birthday": "2010-06-12", "zoo": 1,
      "photos": [
        { "url": "https://example.org/harumaki/1.jpg", "author": "alice", "tags": ["sleeping"] },
        { "url": "https://example.org/harumaki/2.jpg", "author": "bob", "tags": ["eating"] }
      ] },
    { "id": 2, "names": { "en": "Gin", "jp": "ギン" }, "birthday": "2019-05-01", "zoo": 2,
      "photos": [
        { "url": "https://example.org/gin/1.jpg", "author": "Alice", "tags": ["yawn"] }
      ] },
    { "id": 3, "names": { "en": "Koume" }, "birthday": "2019-07-20", "zoo": 2 },
    { "id": 4, "names": { "en": "Ichimaru" }, "birthday": "2008-03-03", "death": "2018-11-02", "zoo": 1 },
    { "id": 5, "names": { "en": "Marimo" }, "othernames": ["Mari-Chan"], "birthday": "2012-01-01", "death": "2020-02-02" },
    { "id": 123, "names": { "en": "Kotaro" }, "birthday": "2015-04-04" }
  ],
  "zoos": [
    { "id": 1, "names": { "en": "Nishiyama", "jp": "西山動物園" },
      "photos": [
        { "url": "https://example.org/nishiyama/1.jpg", "author": "carol", "tags": ["climb"] }
      ] },
    { "id": 2, "names": { "en": "Maruyama" } }
  ]
}"#;

pub fn graph() -> MemoryGraph {
    MemoryGraph::from_json(FIXTURE).expect("fixture graph loads")
}

pub fn settings() -> Settings {
    Settings::defaults().expect("default settings load")
}

pub fn setup() -> Engine<'static> {
    // The engine borrows its graph; leak it for the test's lifetime
    let graph: &'static MemoryGraph = Box::leak(Box::new(graph()));
    Engine::new(graph, &settings()).expect("engine builds")
}
