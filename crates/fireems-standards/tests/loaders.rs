use std::fs;

use fireems_model::{
    FieldDataType, FieldMapping, FieldTransformation, MappingProfile, ValidationRule,
};
use fireems_standards::{
    StandardsError, load_mapping_profile, load_schema_file, load_tool_schema, save_mapping_profile,
};
use insta::assert_json_snapshot;
use tempfile::tempdir;

#[test]
fn response_time_analyzer_shape() {
    let schema = load_tool_schema("response-time-analyzer").expect("built-in schema");
    let incident_id = schema.field("Incident ID").expect("Incident ID");
    assert!(incident_id.is_required);
    assert!(incident_id.presence_only);

    let latitude = schema.field("Latitude").expect("Latitude");
    assert_eq!(latitude.data_type, FieldDataType::Number);
    assert_eq!(latitude.validation_rules, vec![ValidationRule::custom("latitude")]);
    assert!(latitude.aliases.iter().any(|alias| alias == "Lat"));
}

#[test]
fn station_coverage_rules_snapshot() {
    let schema = load_tool_schema("station-coverage-optimizer").expect("built-in schema");
    let field = schema.field("Apparatus Count").expect("Apparatus Count");
    assert_json_snapshot!(field, @r#"
    {
      "name": "Apparatus Count",
      "dataType": "number",
      "isRequired": false,
      "presenceOnly": false,
      "validationRules": [
        {
          "type": "min",
          "params": {
            "value": 0.0
          }
        },
        {
          "type": "max",
          "params": {
            "value": 50.0,
            "message": "Apparatus Count looks too large for one station"
          }
        }
      ],
      "category": "Resources",
      "aliases": [
        "Units",
        "Apparatus",
        "Unit Count"
      ]
    }
    "#);
}

#[test]
fn bare_field_array_takes_file_stem() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("county-export.json");
    fs::write(
        &path,
        r#"[
            {"name": "Call Number", "dataType": "string", "isRequired": true},
            {"name": "Units", "dataType": "number"}
        ]"#,
    )
    .expect("write schema");

    let schema = load_schema_file(&path).expect("load schema");
    assert_eq!(schema.id, "county-export");
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.required_fields().count(), 1);
}

#[test]
fn schema_file_errors_name_the_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write");

    let error = load_schema_file(&path).unwrap_err();
    assert!(matches!(error, StandardsError::Json { .. }));
    assert!(error.to_string().contains("broken.json"));

    let missing = load_schema_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, StandardsError::Io { .. }));
}

#[test]
fn profile_save_then_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("profiles").join("county.json");
    let profile = MappingProfile::new(
        Some("response-time-analyzer".to_string()),
        vec![
            FieldMapping::new("Inc No", "Incident ID"),
            FieldMapping::new("Call Date", "Incident Date")
                .with_transformation(FieldTransformation::format_date("YYYY-MM-DD")),
            FieldMapping::constant("Priority", "3", "string"),
        ],
    );

    save_mapping_profile(&path, &profile).expect("save");
    let loaded = load_mapping_profile(&path).expect("load");
    assert_eq!(loaded, profile);
}

#[test]
fn bare_mapping_array_loads_without_tool() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("mapping.json");
    fs::write(&path, r#"[{"sourceField": "Lat", "targetField": "Latitude"}]"#).expect("write");

    let profile = load_mapping_profile(&path).expect("load");
    assert_eq!(profile.tool, None);
    assert_eq!(profile.mappings, vec![FieldMapping::new("Lat", "Latitude")]);
}
