//! Integration tests for the field-mapping service.

use fireems_map::{
    MappingOptions, ScoringEngine, calculate_field_similarity, generate_field_mapping_report,
    normalize_field_name, suggest_field_mapping, validate_field_mapping,
};
use fireems_model::{CellValue, FieldDataType, FieldMapping, Record, TargetField};
use insta::assert_json_snapshot;
use proptest::prelude::*;

fn response_time_fields() -> Vec<TargetField> {
    vec![
        TargetField::new("Incident ID", FieldDataType::String).required(),
        TargetField::new("Incident Date", FieldDataType::Date).required(),
        TargetField::new("Incident Type", FieldDataType::String),
        TargetField::new("Latitude", FieldDataType::Number).with_alias("Lat"),
        TargetField::new("Longitude", FieldDataType::Number).with_alias("Lon"),
    ]
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[test]
fn identical_names_are_suggested_with_full_confidence() {
    assert_eq!(calculate_field_similarity("Incident Type", "Incident Type"), 100.0);

    let suggestions =
        suggest_field_mapping(&columns(&["Incident Type"]), &response_time_fields(), 0.0);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].target_field.as_deref(), Some("Incident Type"));
    assert_eq!(suggestions[0].confidence, 100.0);
}

#[test]
fn one_suggestion_per_source_even_without_a_match() {
    let sources = columns(&["Lat", "Call Number", "zzz"]);
    let suggestions = suggest_field_mapping(&sources, &response_time_fields(), 0.0);

    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0].target_field.as_deref(), Some("Latitude"));
    assert_eq!(suggestions[2].target_field, None);
    assert_eq!(suggestions[2].confidence, 0.0);
}

#[test]
fn engine_drafts_mappings_that_pass_validation() {
    let fields = response_time_fields();
    let engine =
        ScoringEngine::new(fields.clone()).with_options(MappingOptions::default().with_min_confidence(60.0));
    let sources = columns(&["Incident_ID", "Incident Date", "LAT", "LON", "Narrative"]);

    let mappings = engine.draft_mappings(&sources);
    let validation = validate_field_mapping(&mappings, &fields);

    assert_eq!(mappings.len(), 4);
    assert!(validation.is_valid, "{:?}", validation.errors);
    assert!(!validation.has_duplicates());
}

#[test]
fn validation_result_serializes_for_the_ui() {
    let mappings = vec![
        FieldMapping::new("Lat", "Latitude"),
        FieldMapping::new("Y", "Latitude"),
    ];
    let validation = validate_field_mapping(&mappings, &response_time_fields());

    assert_json_snapshot!(validation, @r#"
    {
      "isValid": false,
      "errors": [
        {
          "type": "duplicateTarget",
          "targetField": "Latitude",
          "sourceFields": [
            "Lat",
            "Y"
          ]
        },
        {
          "type": "requiredFieldUnmapped",
          "field": "Incident ID"
        },
        {
          "type": "requiredFieldUnmapped",
          "field": "Incident Date"
        }
      ],
      "warnings": [
        {
          "type": "lowConfidence",
          "sourceField": "Y",
          "targetField": "Latitude",
          "confidence": 0.0
        }
      ]
    }
    "#);
}

#[test]
fn report_recommends_unmapped_required_fields() {
    let rows = vec![Record::from([(
        "ID".to_string(),
        CellValue::text("24-0001"),
    )])];
    let mappings = vec![FieldMapping::new("ID", "Incident ID")];

    let report = generate_field_mapping_report(&mappings, &response_time_fields(), &rows);

    assert_eq!(report.required_fields_mapped, 1);
    assert!(!report.recommendations.is_empty());
    assert!(report.data_quality_score < 100);
}

proptest! {
    /// Any name with at least one letter or digit is identical to itself.
    #[test]
    fn prop_self_similarity_is_full(name in "[A-Za-z0-9 _.#-]{0,24}") {
        prop_assume!(!normalize_field_name(&name).is_empty());
        prop_assert_eq!(calculate_field_similarity(&name, &name), 100.0);
    }

    /// Empty input never matches.
    #[test]
    fn prop_empty_scores_zero(name in "[A-Za-z0-9 ]{0,24}") {
        prop_assert_eq!(calculate_field_similarity("", &name), 0.0);
        prop_assert_eq!(calculate_field_similarity(&name, ""), 0.0);
    }

    /// Scores stay on the 0-100 scale and are symmetric.
    #[test]
    fn prop_score_bounds(a in "[A-Za-z ]{0,16}", b in "[A-Za-z ]{0,16}") {
        let forward = calculate_field_similarity(&a, &b);
        prop_assert!((0.0..=100.0).contains(&forward));
        prop_assert_eq!(forward, calculate_field_similarity(&b, &a));
    }

    /// A word-superset of a name scores strictly between 30 and 100.
    #[test]
    fn prop_superset_is_partial_match(base in "[a-z]{2,8}", extra in "[a-z]{2,8}") {
        prop_assume!(base != extra);
        let superset = format!("{base} {extra}");
        let score = calculate_field_similarity(&base, &superset);
        prop_assert!(score > 30.0 && score < 100.0, "{} vs {}: {}", base, superset, score);
    }
}
