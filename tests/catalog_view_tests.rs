// Integration tests for the catalog view pipeline
//
// Tests cover:
// - Filter idempotence and monotonicity
// - Sort permutation, reversal and stability
// - Grouping multi-membership by tag
// - Tree count consistency and cross-bucket drops
// - Memoized recomputation through the view engine

use std::sync::Arc;

use model_catalog::models::{
    FilterSpec, GroupKey, LicenseStatus, ModelRecord, SortOrder, TreeNode, TreeNodeKind,
    ViewMode, ViewRequest,
};
use model_catalog::observability::AppMetrics;
use model_catalog::services::{
    ALL_MODELS_LABEL, ViewEngine, ViewOutput, build_tree, build_tree_with_report, filter_records,
    group_records, sort_records, total_memberships,
};

fn names(records: &[ModelRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

fn scenario() -> Vec<ModelRecord> {
    vec![
        ModelRecord::new("M1", "Acme", LicenseStatus::Open)
            .with_tags(&["chat", "code"])
            .with_context_window(128),
        ModelRecord::new("M2", "Acme", LicenseStatus::Closed)
            .with_context_window(256)
            .with_parent("M1"),
        ModelRecord::new("M3", "Zeta", LicenseStatus::Open)
            .with_tags(&["chat"])
            .with_context_window(64),
    ]
}

fn catalog() -> Vec<ModelRecord> {
    vec![
        ModelRecord::new("Orion", "Nimbus", LicenseStatus::Closed)
            .with_tags(&["chat", "vision"])
            .with_release_date("2024-03-01")
            .with_context_window(200_000)
            .with_description("Flagship multimodal assistant"),
        ModelRecord::new("orion-mini", "Nimbus", LicenseStatus::Closed)
            .with_tags(&["chat"])
            .with_release_date("2024-06-12")
            .with_context_window(32_000)
            .with_parent("Orion"),
        ModelRecord::new("Lumen", "Atlas", LicenseStatus::Open)
            .with_tags(&["code"])
            .with_release_date("2023-11-20")
            .with_context_window(16_000),
        ModelRecord::new("Lumen-Instruct", "Atlas", LicenseStatus::Open)
            .with_tags(&["code", "chat"])
            .with_release_date("2024-01-05")
            .with_context_window(16_000)
            .with_parent("Lumen"),
        ModelRecord::new("Lumen-Pro", "Atlas", LicenseStatus::Closed)
            .with_release_date("2024-09-30")
            .with_context_window(64_000)
            .with_parent("Lumen"),
        ModelRecord::new("Drift", "Kestrel", LicenseStatus::Open)
            .with_tags(&["audio"])
            .with_release_date("2022-08-08")
            .with_context_window(4_096),
    ]
}

// ============ Filter Tests ============

#[test]
fn test_filter_is_idempotent() {
    let records = catalog();
    let spec = FilterSpec::new()
        .with_search("lumen")
        .with_license_status(LicenseStatus::Open);

    let once = filter_records(&records, &spec);
    let twice = filter_records(&once, &spec);

    assert_eq!(once, twice);
    assert_eq!(names(&once), vec!["Lumen", "Lumen-Instruct"]);
}

#[test]
fn test_filter_adding_constraint_narrows_result() {
    let records = catalog();
    let broad = FilterSpec::new().with_tag("chat");
    let narrow = broad.clone().with_company("Nimbus");

    let broad_result = filter_records(&records, &broad);
    let narrow_result = filter_records(&records, &narrow);

    assert!(narrow_result.iter().all(|r| broad_result.contains(r)));
    assert_eq!(names(&broad_result), vec!["Orion", "orion-mini", "Lumen-Instruct"]);
    assert_eq!(names(&narrow_result), vec!["Orion", "orion-mini"]);
}

#[test]
fn test_filter_never_grows_the_collection() {
    let records = catalog();
    let specs = vec![
        FilterSpec::default(),
        FilterSpec::new().with_search("o"),
        FilterSpec::new().with_company("Atlas").with_company("Kestrel"),
        FilterSpec::new().with_tag("chat").with_tag("audio"),
        FilterSpec::new().with_license_status(LicenseStatus::Closed),
        FilterSpec::new().with_context_range(Some(-5), None),
        FilterSpec::new().with_context_range(Some(100_000), Some(10)),
        FilterSpec::new().with_search("no such model"),
    ];

    for spec in &specs {
        let result = filter_records(&records, spec);
        assert!(result.len() <= records.len(), "{spec:?}");
        assert!(result.iter().all(|r| records.contains(r)), "{spec:?}");
    }
    assert_eq!(filter_records(&records, &specs[5]).len(), records.len());
    assert!(filter_records(&records, &specs[6]).is_empty());
    assert!(filter_records(&records, &specs[7]).is_empty());
}

#[test]
fn test_empty_filter_keeps_everything_in_order() {
    let records = catalog();
    let result = filter_records(&records, &FilterSpec::default());
    assert_eq!(result, records);
}

#[test]
fn test_filter_context_range_is_inclusive() {
    let records = catalog();
    let spec = FilterSpec::new().with_context_range(Some(16_000), Some(64_000));
    let result = filter_records(&records, &spec);
    assert_eq!(
        names(&result),
        vec!["orion-mini", "Lumen", "Lumen-Instruct", "Lumen-Pro"]
    );
}

// ============ Sort Tests ============

#[test]
fn test_sort_is_permutation() {
    let records = catalog();
    for order in SortOrder::ALL {
        let sorted = sort_records(&records, order);
        assert_eq!(sorted.len(), records.len());
        assert!(records.iter().all(|r| sorted.contains(r)), "{order}");
    }
}

#[test]
fn test_descending_reverses_ascending_for_distinct_keys() {
    let records = catalog();
    let mut ascending = sort_records(&records, SortOrder::ReleaseDateAsc);
    let descending = sort_records(&records, SortOrder::ReleaseDateDesc);

    ascending.reverse();
    assert_eq!(ascending, descending);
    assert_eq!(descending[0].name, "Lumen-Pro");
}

#[test]
fn test_context_window_desc_reverses_asc() {
    // pairwise-distinct context windows
    let records: Vec<ModelRecord> = catalog()
        .into_iter()
        .filter(|r| r.name != "Lumen-Instruct")
        .collect();
    let mut ascending = sort_records(&records, SortOrder::ContextWindowAsc);
    let descending = sort_records(&records, SortOrder::ContextWindowDesc);

    assert_eq!(
        names(&ascending),
        vec!["Drift", "Lumen", "orion-mini", "Lumen-Pro", "Orion"]
    );
    ascending.reverse();
    assert_eq!(ascending, descending);

    let scenario_desc = sort_records(&scenario(), SortOrder::ContextWindowDesc);
    let mut scenario_asc = sort_records(&scenario(), SortOrder::ContextWindowAsc);
    scenario_asc.reverse();
    assert_eq!(scenario_asc, scenario_desc);
}

#[test]
fn test_sort_is_stable_in_both_directions() {
    let records = catalog();

    // Lumen and Lumen-Instruct share a context window
    let ascending = sort_records(&records, SortOrder::ContextWindowAsc);
    let descending = sort_records(&records, SortOrder::ContextWindowDesc);

    let position = |sorted: &[ModelRecord], name: &str| {
        sorted.iter().position(|r| r.name == name).unwrap()
    };
    assert!(position(&ascending, "Lumen") < position(&ascending, "Lumen-Instruct"));
    assert!(position(&descending, "Lumen") < position(&descending, "Lumen-Instruct"));
}

// ============ Group Tests ============

#[test]
fn test_tag_grouping_counts_every_membership() {
    let records = catalog();
    let groups = group_records(&records, GroupKey::Tag);

    let tag_total: usize = records.iter().map(|r| r.tags.len()).sum();
    assert_eq!(total_memberships(&groups), tag_total);
    assert!(total_memberships(&groups) > records.len());

    let labels: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["chat", "vision", "code", "audio"]);
    assert_eq!(
        names(&groups["chat"]),
        vec!["Orion", "orion-mini", "Lumen-Instruct"]
    );
    // untagged records land in no bucket
    assert!(groups.values().flatten().all(|r| r.name != "Lumen-Pro"));
}

#[test]
fn test_single_tag_records_fill_buckets_exactly() {
    let records = vec![
        ModelRecord::new("A", "Acme", LicenseStatus::Open).with_tags(&["chat"]),
        ModelRecord::new("B", "Acme", LicenseStatus::Closed).with_tags(&["code"]),
        ModelRecord::new("C", "Zeta", LicenseStatus::Open).with_tags(&["chat"]),
        ModelRecord::new("D", "Zeta", LicenseStatus::Open).with_tags(&["vision"]),
    ];
    let groups = group_records(&records, GroupKey::Tag);

    assert_eq!(total_memberships(&groups), records.len());
    assert_eq!(names(&groups["chat"]), vec!["A", "C"]);

    // one extra tag makes the sum exceed the record count
    let mut widened = records.clone();
    widened[1].tags.push("chat".to_string());
    let widened_groups = group_records(&widened, GroupKey::Tag);
    assert_eq!(total_memberships(&widened_groups), records.len() + 1);
}

#[test]
fn test_group_none_uses_single_bucket() {
    let records = catalog();
    let groups = group_records(&records, GroupKey::None);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[ALL_MODELS_LABEL], records);
}

#[test]
fn test_group_preserves_sorted_order_within_buckets() {
    let sorted = sort_records(&catalog(), SortOrder::NameAsc);
    let groups = group_records(&sorted, GroupKey::Company);

    let labels: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["Kestrel", "Atlas", "Nimbus"]);
    assert_eq!(
        names(&groups["Atlas"]),
        vec!["Lumen", "Lumen-Instruct", "Lumen-Pro"]
    );
}

// ============ Tree Tests ============

fn count_models(nodes: &[TreeNode]) -> usize {
    nodes.iter().map(TreeNode::model_count).sum()
}

#[test]
fn test_tree_counts_match_records_minus_dropped() {
    let records = catalog();
    let build = build_tree_with_report(&records);

    assert_eq!(count_models(&build.nodes) + build.dropped.len(), records.len());
    assert_eq!(build.dropped, vec!["Lumen-Pro"]);

    for node in &build.nodes {
        assert_eq!(node.count, node.children().len());
        assert!(matches!(node.kind, TreeNodeKind::Company));
    }
}

#[test]
fn test_tree_companies_sorted_and_children_attached() {
    let nodes = build_tree(&catalog());

    let companies: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(companies, vec!["Atlas", "Kestrel", "Nimbus"]);

    let nimbus_closed = &nodes[2].children()[0];
    assert!(matches!(nimbus_closed.kind, TreeNodeKind::Status(LicenseStatus::Closed)));
    let orion = &nimbus_closed.children()[0];
    assert_eq!(orion.id, "Nimbus/Closed/Orion");
    assert_eq!(orion.children()[0].name, "orion-mini");
    assert!(orion.children()[0].is_leaf());
}

#[test]
fn test_scenario_end_to_end() {
    let records = scenario();

    let filtered = filter_records(&records, &FilterSpec::new().with_company("Acme"));
    let sorted = sort_records(&filtered, SortOrder::ContextWindowDesc);
    assert_eq!(names(&sorted), vec!["M2", "M1"]);
    assert_eq!(
        names(&sort_records(&records, SortOrder::ContextWindowDesc)),
        vec!["M2", "M1", "M3"]
    );

    let groups = group_records(&records, GroupKey::Tag);
    assert_eq!(names(&groups["chat"]), vec!["M1", "M3"]);
    assert_eq!(names(&groups["code"]), vec!["M1"]);

    let build = build_tree_with_report(&records);
    let acme = &build.nodes[0];
    assert_eq!(acme.name, "Acme");
    let open = &acme.children()[0];
    assert_eq!(open.children()[0].name, "M1");
    assert!(open.children()[0].is_leaf());
    assert_eq!(build.dropped, vec!["M2"]);
}

// ============ View Engine Tests ============

#[test]
fn test_view_engine_reuses_results_for_same_inputs() {
    let metrics = Arc::new(AppMetrics::default());
    let engine = ViewEngine::new(metrics);
    let records: Arc<[ModelRecord]> = catalog().into();
    let request = ViewRequest {
        filter: FilterSpec::new().with_tag("chat"),
        sort: SortOrder::NameAsc,
        group_by: GroupKey::None,
        mode: ViewMode::List,
    };

    let first = engine.render(&records, &request);
    let second = engine.render(&records, &request);

    match (first, second) {
        (ViewOutput::List(a), ViewOutput::List(b)) => {
            assert!(Arc::ptr_eq(&a, &b));
            assert_eq!(names(&a), vec!["Lumen-Instruct", "Orion", "orion-mini"]);
        }
        other => panic!("expected list views, got {other:?}"),
    }
}

#[test]
fn test_view_engine_renders_each_mode() {
    let engine = ViewEngine::default();
    let records: Arc<[ModelRecord]> = scenario().into();
    let mut request = ViewRequest {
        filter: FilterSpec::default(),
        sort: SortOrder::NameAsc,
        group_by: GroupKey::LicenseStatus,
        mode: ViewMode::Grouped,
    };

    match engine.render(&records, &request) {
        ViewOutput::Grouped(groups) => {
            let labels: Vec<&str> = groups.keys().map(String::as_str).collect();
            assert_eq!(labels, vec!["Open", "Closed"]);
        }
        other => panic!("expected grouped view, got {other:?}"),
    }

    request.mode = ViewMode::Tree;
    match engine.render(&records, &request) {
        ViewOutput::Tree(build) => assert_eq!(build.dropped, vec!["M2"]),
        other => panic!("expected tree view, got {other:?}"),
    }
}
