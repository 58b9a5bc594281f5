//! End-to-end flows: documents in, filtered and paginated page views out,
//! with fixtures shaped like real site configuration.

use std::collections::BTreeMap;

use pagez::{
    index_by_key, paginate, Document, DocumentSource, PaginationConfig, PaginationEngine,
};

struct YamlSite {
    collections: BTreeMap<String, Vec<Document>>,
}

impl YamlSite {
    fn from_yaml(yaml: &str) -> Self {
        let collections: BTreeMap<String, Vec<Document>> =
            serde_yaml::from_str(yaml).expect("fixture parses");
        Self { collections }
    }
}

impl DocumentSource for YamlSite {
    fn collection(&self, name: &str) -> Vec<Document> {
        self.collections.get(name).cloned().unwrap_or_default()
    }
}

fn demo_site() -> YamlSite {
    YamlSite::from_yaml(
        r#"
posts:
  - collection: posts
    data:
      title: Rust intro
      tags: "rust, beginners"
      weight: 1
  - collection: posts
    data:
      title: Rust async
      tags: [rust, async]
      weight: 8
  - collection: posts
    data:
      title: Go services
      tags: go
      weight: 5
  - collection: posts
    data:
      title: Untagged note
      weight: 3
"#,
    )
}

fn titles(docs: &[Document]) -> Vec<String> {
    docs.iter()
        .map(|d| d.get("title").unwrap().as_str().unwrap().to_string())
        .collect()
}

#[test]
fn index_then_paginate_a_bucket() {
    let site = demo_site();
    let index = index_by_key(&site.collection("posts"), "tags");

    // The untagged note is in no bucket; every tagged post is in each of
    // its buckets.
    assert_eq!(titles(&index["rust"]), ["Rust intro", "Rust async"]);
    assert_eq!(titles(&index["go"]), ["Go services"]);
    assert!(!index.contains_key("untagged"));

    let config = PaginationConfig {
        per_page: 1,
        ..Default::default()
    };
    let pages = paginate(&config, "/tags/rust/", &index["rust"]).unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].page_path, "/tags/rust/index.html");
    assert_eq!(pages[1].page_path, "/tags/rust/page2/index.html");
    assert_eq!(pages[0].next_page_path.as_deref(), Some("/tags/rust/page2/"));
    assert_eq!(pages[1].previous_page_path.as_deref(), Some("/tags/rust/"));
}

#[test]
fn engine_applies_yaml_config_filters() {
    let site = demo_site();
    let engine = PaginationEngine::new(site);

    let config: PaginationConfig = serde_yaml::from_str(
        r#"
per_page: 2
permalink: "/page:num/"
filters:
  tags: "rust; go"
"#,
    )
    .unwrap();

    let pages = engine.pages_for("posts", "/blog/", &config).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].total_documents, 3);
    assert_eq!(titles(&pages[0].documents), ["Rust intro", "Rust async"]);
    assert_eq!(titles(&pages[1].documents), ["Go services"]);
}

#[test]
fn range_filter_from_config() {
    let site = demo_site();
    let engine = PaginationEngine::new(site);

    let config: PaginationConfig = serde_yaml::from_str(
        r#"
per_page: 10
filters:
  weight: { min: 3, max: 6 }
"#,
    )
    .unwrap();

    let pages = engine.pages_for("posts", "/heavy/", &config).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(titles(&pages[0].documents), ["Go services", "Untagged note"]);
}

#[test]
fn invalid_filter_leaves_the_collection_alone() {
    let site = demo_site();
    let engine = PaginationEngine::new(site);

    let config: PaginationConfig = serde_yaml::from_str(
        r#"
per_page: 10
filters:
  tags: [true]
"#,
    )
    .unwrap();

    let pages = engine.pages_for("posts", "/blog/", &config).unwrap();
    assert_eq!(pages[0].total_documents, 4);
}

#[test]
fn empty_collection_still_produces_an_index_page() {
    let site = demo_site();
    let engine = PaginationEngine::new(site);
    let config = PaginationConfig::default();

    let pages = engine.pages_for("missing", "/nothing/", &config).unwrap();
    assert_eq!(pages.len(), 1);
    assert!(pages[0].documents.is_empty());
    assert_eq!(pages[0].page_path, "/nothing/index.html");
    assert_eq!(pages[0].previous_page, None);
    assert_eq!(pages[0].next_page, None);
}

#[test]
fn navigation_chain_is_consistent_across_pages() {
    let docs: Vec<Document> = (0..5)
        .map(|i| Document::new("posts").with("title", format!("d{}", i)))
        .collect();
    let config = PaginationConfig {
        per_page: 2,
        ..Default::default()
    };
    let pages = paginate(&config, "/blog/", &docs).unwrap();
    assert_eq!(pages.len(), 3);

    // Every document appears exactly once, in order.
    let all: Vec<String> = pages.iter().flat_map(|p| titles(&p.documents)).collect();
    assert_eq!(all, ["d0", "d1", "d2", "d3", "d4"]);

    // Adjacent pages point at each other.
    for pair in pages.windows(2) {
        assert_eq!(pair[0].next_page, Some(pair[1].page));
        assert_eq!(pair[1].previous_page, Some(pair[0].page));
    }
    // Shared endpoints.
    for page in &pages {
        assert_eq!(page.first_page, 1);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.first_page_path, "/blog/");
        assert_eq!(page.last_page_path, "/blog/page3/");
    }
}
