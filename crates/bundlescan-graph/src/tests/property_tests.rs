//! Property-based tests for bundlescan-graph using proptest.
//!
//! Run with: cargo test --features proptest --package bundlescan-graph property_tests

#![cfg(feature = "proptest")]

use crate::{
    AssetId, AssetRecord, BuildGraph, Diagnostics, StaticAssetDatabase,
    UnresolvedDependencyPolicy, unique_name,
};
use proptest::prelude::*;
use std::collections::HashSet;

fn graph_with(count: usize) -> BuildGraph {
    let mut graph = BuildGraph::new();
    for i in 0..count {
        graph.insert_asset(
            AssetRecord::builder(AssetId::new(format!("asset-{i}")).unwrap())
                .file_path(Some(format!("Assets/{i}.asset")))
                .address((i % 3 == 0).then(|| format!("addr-{i}")))
                .build(),
        );
    }
    graph
}

/// Strategy for edges between `n` assets, self-edges included.
fn edges(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..n, 0..n), 0..=40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: b ∈ a.depends_on ⟺ a ∈ b.depended_on_by, and never a ∈ a.depends_on
    #[test]
    fn prop_dependency_symmetry(pairs in edges(12)) {
        let mut graph = graph_with(12);
        let ids: Vec<_> = graph.assets().map(|(idx, _)| idx).collect();
        for (from, to) in &pairs {
            graph.depends_on(ids[*from], ids[*to]);
        }

        for &a in &ids {
            prop_assert!(!graph[a].depends_on().contains(&a));
            for &b in graph[a].depends_on() {
                prop_assert!(graph[b].depended_on_by().contains(&a));
            }
            for &b in graph[a].depended_on_by() {
                prop_assert!(graph[b].depends_on().contains(&a));
            }
        }
    }

    /// Property: duplicate ⟺ more than one distinct bundle
    #[test]
    fn prop_duplicate_matches_distinct_bundles(bundles in prop::collection::vec("[a-d]", 1..8)) {
        let mut graph = graph_with(1);
        let (asset, _) = graph.assets().next().unwrap();
        for bundle in &bundles {
            graph.pack(asset, bundle);
        }

        let distinct: HashSet<_> = bundles.iter().collect();
        prop_assert_eq!(graph.is_duplicate(asset), distinct.len() > 1);
    }

    /// Property: the resolved name is free unless the resolver says otherwise
    #[test]
    fn prop_unique_name_is_free_or_flagged(
        stem in "[a-z]{1,6}",
        taken_suffixes in prop::collection::hash_set(0u32..20, 0..20),
        max_attempts in 1u32..30,
    ) {
        let proposed = format!("{stem}.bundle");
        let mut taken: HashSet<String> = taken_suffixes
            .iter()
            .map(|n| format!("{stem}{n}.bundle"))
            .collect();
        taken.insert(proposed.clone());

        let resolved = unique_name(&proposed, &taken, 1, max_attempts);
        prop_assert_eq!(resolved.exhausted, taken.contains(&resolved.name));
        prop_assert!(resolved.name.ends_with(".bundle"));

        let free = unique_name(&resolved.name, &HashSet::<String>::new(), 1, max_attempts);
        prop_assert_eq!(free.name, resolved.name);
    }

    /// Property: populating dependencies twice adds no edges the second time
    #[test]
    fn prop_dependency_population_is_idempotent(pairs in edges(8)) {
        let mut database = StaticAssetDatabase::new();
        for i in 0..8 {
            let deps: Vec<String> = pairs
                .iter()
                .filter(|(from, _)| *from == i)
                .map(|(_, to)| format!("Assets/{to}.asset"))
                .collect();
            database = database.with_dependencies(format!("Assets/{i}.asset"), deps);
        }

        let mut graph = graph_with(8);
        let mut diagnostics = Diagnostics::default();
        graph
            .populate_dependencies(&database, UnresolvedDependencyPolicy::Fail, &mut diagnostics)
            .unwrap();
        let edge_count = graph.dependency_edge_count();

        let added = graph
            .populate_dependencies(&database, UnresolvedDependencyPolicy::Fail, &mut diagnostics)
            .unwrap();
        prop_assert_eq!(added, 0);
        prop_assert_eq!(graph.dependency_edge_count(), edge_count);
    }
}
