//! End-to-end scenarios through the analysis pipeline.

use crate::{
    Analysis, AnalysisConfig, AnalysisOutcome, AssetEntry, AssetId, BuildGraph, BuildTables,
    Diagnostic, Diagnostics, Error, FxIndexMap, GroupCatalog, GroupConfig, GroupId,
    ObjectIdentifier, PackingPlan, PackingSchema, RecordedBuild, StaticAssetDatabase,
    UnresolvedDependencyPolicy,
};

fn aid(id: &str) -> AssetId {
    AssetId::new(id).unwrap()
}

fn gid(id: &str) -> GroupId {
    GroupId::new(id).unwrap()
}

/// Group A packs X (addressable) and Y into shared.dat; group B's
/// other.dat pulls Y in again.
fn catalog() -> GroupCatalog {
    GroupCatalog::new(vec![
        GroupConfig::new(gid("group-a"), "Group A")
            .with_schema(PackingSchema::default())
            .with_entry(AssetEntry::new(aid("X"), "Assets/X.prefab").with_address("x")),
        GroupConfig::new(gid("group-b"), "Group B")
            .with_schema(PackingSchema::default())
            .with_entry(AssetEntry::new(aid("Z"), "Assets/Z.prefab").with_address("z")),
    ])
}

fn files() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    vec![
        ("CAB-1", "shared.dat", vec!["X", "Y"]),
        ("CAB-2", "other.dat", vec!["Z", "Y"]),
    ]
}

fn tables_from(files: &[(&str, &str, Vec<&str>)]) -> BuildTables {
    let file_to_bundle = files
        .iter()
        .map(|(file, bundle, _)| (file.to_string(), bundle.to_string()));
    let file_to_objects = files.iter().map(|(file, _, objects)| {
        (
            file.to_string(),
            objects.iter().map(|id| ObjectIdentifier::new(aid(id), 1)).collect(),
        )
    });
    let asset_to_files: FxIndexMap<_, _> = [
        (aid("X"), vec!["CAB-1".to_string()]),
        (aid("Z"), vec!["CAB-2".to_string()]),
    ]
    .into_iter()
    .collect();
    let group_to_bundles: FxIndexMap<_, _> = [
        (gid("group-a"), vec!["shared.dat".to_string()]),
        (gid("group-b"), vec!["other.dat".to_string()]),
    ]
    .into_iter()
    .collect();

    BuildTables::from_parallel(file_to_bundle, file_to_objects, asset_to_files, group_to_bundles)
        .unwrap()
}

fn database(x_depends_on_y: bool) -> StaticAssetDatabase {
    let database = StaticAssetDatabase::new()
        .with_asset(aid("X"), "Assets/X.prefab")
        .with_asset(aid("Y"), "Assets/Textures/Y.png")
        .with_asset(aid("Z"), "Assets/Z.prefab");
    if x_depends_on_y {
        database.with_dependencies("Assets/X.prefab", ["Assets/Textures/Y.png"])
    } else {
        database
    }
}

fn run(database: &StaticAssetDatabase, config: &AnalysisConfig) -> crate::Result<AnalysisOutcome> {
    Analysis::run(&catalog(), &RecordedBuild::new(tables_from(&files())), database, config)
}

fn completed(outcome: AnalysisOutcome) -> Analysis {
    match outcome {
        AnalysisOutcome::Completed(analysis) => *analysis,
        AnalysisOutcome::NothingToAnalyze => panic!("expected a completed analysis"),
    }
}

#[test]
fn test_two_group_scenario() {
    let analysis = completed(run(&database(true), &AnalysisConfig::default()).unwrap());
    let graph = &analysis.graph;

    let x = graph.asset_index("X").unwrap();
    let y = graph.asset_index("Y").unwrap();

    assert!(!graph.is_duplicate(x));
    assert!(graph.is_duplicate(y));
    assert!(!graph[y].is_addressable());
    assert!(graph.is_implicit_root(y));

    let shared = graph.bundle_index("shared.dat").unwrap();
    let other = graph.bundle_index("other.dat").unwrap();
    assert_eq!(graph.group_of_bundle(shared).unwrap().name, "Group A");
    assert_eq!(graph.group_of_bundle(other).unwrap().name, "Group B");

    let report = &analysis.report;
    assert_eq!(report.len(), 1);
    assert_eq!(report.duplicates[0].path, "Assets/Textures/Y.png");
    assert!(report.duplicates[0].is_implicit_root);
    assert_eq!(
        report.issues_by_group()["Group B"]["other.dat"],
        vec!["Assets/Textures/Y.png"]
    );
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_implicit_root_requires_direct_addressable_referrer() {
    let analysis = completed(run(&database(false), &AnalysisConfig::default()).unwrap());
    let y = analysis.graph.asset_index("Y").unwrap();

    assert!(analysis.graph.is_duplicate(y));
    assert!(!analysis.graph.is_implicit_root(y));
}

#[test]
fn test_construction_is_order_independent() {
    let forward = tables_from(&files());
    let mut reversed_files = files();
    reversed_files.reverse();
    for (_, _, objects) in &mut reversed_files {
        objects.reverse();
    }
    let reversed = tables_from(&reversed_files);

    let catalog = catalog();
    let a = BuildGraph::construct(&catalog, &forward, &mut Diagnostics::default()).unwrap();
    let b = BuildGraph::construct(&catalog, &reversed, &mut Diagnostics::default()).unwrap();

    let keys = |graph: &BuildGraph| {
        let mut assets: Vec<(String, Vec<String>)> = graph
            .assets()
            .map(|(idx, record)| {
                let mut bundles: Vec<String> =
                    graph.bundles_of_asset(idx).map(|b| b.name().to_string()).collect();
                bundles.sort();
                (record.id().to_string(), bundles)
            })
            .collect();
        assets.sort();
        let mut groups: Vec<(String, Option<String>)> = graph
            .bundles()
            .map(|(idx, bundle)| {
                (
                    bundle.name().to_string(),
                    graph.group_of_bundle(idx).map(|g| g.id().to_string()),
                )
            })
            .collect();
        groups.sort();
        (assets, groups)
    };

    assert_eq!(keys(&a), keys(&b));
    assert_eq!(a.statistics(), b.statistics());
}

#[test]
fn test_empty_catalog_is_nothing_to_analyze() {
    let catalog = GroupCatalog::new(vec![GroupConfig::new(gid("g"), "No schema")
        .with_entry(AssetEntry::new(aid("X"), "Assets/X.prefab"))]);
    let engine = |_: &PackingPlan| -> crate::Result<BuildTables> {
        panic!("engine must not run without packing inputs")
    };

    let outcome = Analysis::run(
        &catalog,
        &engine,
        &StaticAssetDatabase::new(),
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert!(matches!(outcome, AnalysisOutcome::NothingToAnalyze));
    assert!(outcome.analysis().is_none());
}

#[test]
fn test_structural_mismatch_aborts_the_run() {
    // tables from a build where W was explicit, catalog that never heard of it
    let engine = |_: &PackingPlan| -> crate::Result<BuildTables> {
        let mut tables = tables_from(&[("CAB-9", "stale.dat", vec!["W"])]);
        tables.asset_to_files.insert(aid("W"), vec!["CAB-9".to_string()]);
        Ok(tables)
    };

    let err = Analysis::run(
        &catalog(),
        &engine,
        &StaticAssetDatabase::new(),
        &AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ExplicitAssetNotConfigured { id } if id.as_str() == "W"));
}

#[test]
fn test_unresolved_dependency_policies() {
    let database = database(true).with_dependencies("Assets/Z.prefab", ["Assets/Missing.png"]);

    let analysis = completed(run(&database, &AnalysisConfig::default()).unwrap());
    assert_eq!(
        analysis.diagnostics.into_vec(),
        vec![Diagnostic::UnresolvedDependency {
            asset: aid("Z"),
            path: "Assets/Missing.png".into(),
        }]
    );

    let mut config = AnalysisConfig::default();
    config.policies.unresolved_dependency = UnresolvedDependencyPolicy::Fail;
    assert!(matches!(run(&database, &config), Err(Error::UnresolvedDependency { .. })));
}

#[test]
fn test_engine_errors_propagate() {
    let engine = |_: &PackingPlan| -> crate::Result<BuildTables> {
        Err(Error::Engine("out of disk".into()))
    };
    let err = Analysis::run(
        &catalog(),
        &engine,
        &StaticAssetDatabase::new(),
        &AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Engine(message) if message == "out of disk"));
}
