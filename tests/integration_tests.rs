use survey_etl::EngineContext;
use survey_etl::EngineError;
use survey_etl::analyzers::tier::Tier;
use survey_etl::config::EngineConfig;
use survey_etl::dataset::bucket::UNCLASSIFIED;
use survey_etl::dataset::enrich::enrich;
use survey_etl::dataset::loader::load_raw;
use survey_etl::dataset::types::SatisfactionGroup;

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample_survey.csv");

fn context() -> EngineContext {
    let config = EngineConfig {
        data_path: FIXTURE.into(),
        ..Default::default()
    };
    EngineContext::load(config).expect("Failed to load fixture")
}

#[test]
fn test_full_pipeline() {
    let ctx = context();
    assert_eq!(ctx.dataset().len(), 40);

    for record in ctx.dataset().records() {
        assert!(!record.age_group.is_empty());
        assert!(!record.distance_group.is_empty());
        assert_ne!(record.age_group, UNCLASSIFIED);
        assert_ne!(record.distance_group, UNCLASSIFIED);
    }
}

#[test]
fn test_barchart_counts_by_class() {
    let ctx = context();
    let rows = ctx.barchart("Class").unwrap();

    assert_eq!(rows.len(), 9);
    let counts: Vec<_> = rows
        .iter()
        .map(|r| (r.value.as_str(), r.group, r.count))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Business", SatisfactionGroup::Dissatisfied, 7),
            ("Business", SatisfactionGroup::Neutral, 3),
            ("Business", SatisfactionGroup::Satisfied, 2),
            ("Eco", SatisfactionGroup::Dissatisfied, 5),
            ("Eco", SatisfactionGroup::Neutral, 5),
            ("Eco", SatisfactionGroup::Satisfied, 2),
            ("Eco Plus", SatisfactionGroup::Dissatisfied, 11),
            ("Eco Plus", SatisfactionGroup::Neutral, 2),
            ("Eco Plus", SatisfactionGroup::Satisfied, 3),
        ]
    );
}

#[test]
fn test_barchart_percentages_sum_to_hundred() {
    let ctx = context();
    for dimension in [
        "AgeGroup",
        "Class",
        "CustomerType",
        "FlightDistanceGroup",
        "Gender",
        "TypeOfTravel",
    ] {
        let rows = ctx.barchart(dimension).unwrap();
        assert_eq!(rows.len() % 3, 0);
        for chunk in rows.chunks(3) {
            let sum: f64 = chunk.iter().map(|r| r.percentage).sum();
            assert!((sum - 100.0).abs() < 0.05, "{dimension}/{}: {sum}", chunk[0].value);
        }
    }
}

#[test]
fn test_histogram_slice_sizes() {
    let ctx = context();

    assert_eq!(ctx.histogram("Gender", Some("All")).unwrap().len(), 40);
    assert_eq!(ctx.histogram("Gender", None).unwrap().len(), 40);

    let eco = ctx.histogram("Class", Some("Eco")).unwrap();
    assert_eq!(eco.len(), 12);
    assert!(eco.iter().all(|r| r.raw.travel_class == "Eco"));

    assert!(ctx.histogram("Class", Some("First")).unwrap().is_empty());
}

#[test]
fn test_filter_options_cover_dataset() {
    let ctx = context();
    let options = ctx.filter_options("Class").unwrap();
    assert_eq!(options, vec!["All", "Business", "Eco", "Eco Plus"]);
}

#[test]
fn test_service_scores_on_empty_subset() {
    let ctx = context();
    let summary = ctx.service_scores("Class", Some("First")).unwrap();

    assert_eq!(summary.rows.len(), 14);
    assert!(summary.rows.iter().all(|r| r.mean.is_none() && r.tier == Tier::Neutral));
    assert_eq!(summary.targets.general_target, 7.0);
    assert_eq!(summary.targets.max_target, 10.0);
}

#[test]
fn test_cards_match_barchart() {
    let ctx = context();
    let cards = ctx.summary_cards("Class", Some("Eco Plus")).unwrap();

    assert_eq!(cards.responses, 16);
    assert_eq!(cards.groups[0].group, SatisfactionGroup::Satisfied);
    assert_eq!(cards.groups[0].count, 3);
    assert_eq!(cards.groups[2].count, 11);
}

#[test]
fn test_feature_ranking() {
    let ctx = context();
    let ranked = ctx.feature_importance(10).unwrap();

    assert!(ranked.len() <= 10);
    for pair in ranked.windows(2) {
        assert!(pair[0].importance >= pair[1].importance);
    }
    let total: f64 = ctx
        .feature_importance(14)
        .unwrap()
        .iter()
        .map(|f| f.importance)
        .sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn test_unknown_dimension() {
    let ctx = context();
    assert_eq!(
        ctx.barchart("Foo").unwrap_err(),
        EngineError::UnknownDimension("Foo".into())
    );
}

#[test]
fn test_enrichment_is_deterministic() {
    let raw = load_raw(FIXTURE).unwrap();
    let rules = EngineConfig::default().enrichment_rules();
    assert_eq!(enrich(&raw, &rules).unwrap(), enrich(&raw, &rules).unwrap());
}

#[test]
fn test_missing_source() {
    let config = EngineConfig {
        data_path: "tests/fixtures/does_not_exist.csv".into(),
        ..Default::default()
    };
    assert!(matches!(
        EngineContext::load(config),
        Err(EngineError::DataUnavailable { .. })
    ));
}
