use fireems_model::{
    CellValue, DefaultValueRegistry, FieldDataType, FieldMapping, FieldTransformation,
    MappingProfile, TargetField, TransformKind, ValidationError, ValidationErrorKind,
    ValidationRule,
};

#[test]
fn mapping_profile_serializes_in_the_saved_shape() {
    let profile = MappingProfile::new(
        Some("response-time-analyzer".to_string()),
        vec![
            FieldMapping::new("Inc #", "Incident ID"),
            FieldMapping::new("Call Rcvd", "Incident Date")
                .with_transformation(FieldTransformation::format_date("YYYY-MM-DD")),
            FieldMapping::constant("Priority", "Medium", "string"),
        ],
    );

    insta::assert_json_snapshot!(profile, @r#"
    {
      "tool": "response-time-analyzer",
      "mappings": [
        {
          "sourceField": "Inc #",
          "targetField": "Incident ID",
          "transformations": []
        },
        {
          "sourceField": "Call Rcvd",
          "targetField": "Incident Date",
          "transformations": [
            {
              "type": "format",
              "params": {
                "formatType": "date",
                "format": "YYYY-MM-DD"
              }
            }
          ]
        },
        {
          "sourceField": "__default__",
          "targetField": "Priority",
          "transformations": [
            {
              "type": "convert",
              "params": {
                "targetType": "string",
                "defaultValue": "Medium"
              }
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn unknown_transformation_type_survives_a_round_trip() {
    let json = r#"{"type":"geocode","params":{"provider":"x"}}"#;
    let transformation: FieldTransformation = serde_json::from_str(json).unwrap();

    assert_eq!(
        transformation.kind,
        TransformKind::Unknown("geocode".to_string())
    );
    assert_eq!(serde_json::to_string(&transformation).unwrap(), json);
}

#[test]
fn transformation_without_params_loads() {
    let transformation: FieldTransformation =
        serde_json::from_str(r#"{"type":"join"}"#).unwrap();
    assert_eq!(transformation.kind, TransformKind::Join);
    assert!(transformation.params.is_empty());
}

#[test]
fn target_field_loads_from_camel_case_json() {
    let json = r#"{
        "name": "Latitude",
        "dataType": "number",
        "isRequired": true,
        "validationRules": [
            {"type": "min", "params": {"value": -90}},
            {"type": "max", "params": {"value": 90, "message": "too far north"}}
        ]
    }"#;
    let field: TargetField = serde_json::from_str(json).unwrap();

    let expected = TargetField::new("Latitude", FieldDataType::Number)
        .required()
        .with_rule(ValidationRule::min(-90.0))
        .with_rule(ValidationRule::max(90.0).with_message("too far north"));
    assert_eq!(field, expected);
    assert_eq!(field.validation_rules[1].message(), Some("too far north"));
    assert_eq!(field.validation_rules[0].kind(), ValidationErrorKind::Min);
}

#[test]
fn data_type_accepts_common_aliases() {
    assert_eq!("Numeric".parse::<FieldDataType>().unwrap(), FieldDataType::Number);
    assert_eq!("datetime".parse::<FieldDataType>().unwrap(), FieldDataType::Date);
    assert!("geometry".parse::<FieldDataType>().is_err());
}

#[test]
fn declared_default_comes_from_first_convert_step() {
    let mapping = FieldMapping::new(fireems_model::DEFAULT_SOURCE_FIELD, "Units")
        .with_transformation(FieldTransformation::replace("a", "b", false))
        .with_transformation(FieldTransformation::convert_with_default("number", 2))
        .with_transformation(FieldTransformation::convert_with_default("number", 9));

    assert!(mapping.is_default_source());
    assert_eq!(mapping.declared_default(), Some(CellValue::Number(2.0)));
}

#[test]
fn registry_is_rebuilt_from_each_mapping_set() {
    let first = [FieldMapping::constant("Priority", "High", "string")];
    let second = [FieldMapping::constant("Agency", "FD", "string")];

    let mut registry = DefaultValueRegistry::from_mappings(&first);
    assert!(registry.has_default_value("Priority"));

    registry.register_mappings(&second);
    assert!(!registry.has_default_value("Priority"));
    assert_eq!(
        registry.get_default_value("Agency"),
        Some(&CellValue::text("FD"))
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn validation_error_serializes_kind_as_type() {
    let error = ValidationError::new(3, "Priority", ValidationErrorKind::OneOf, "bad value");
    let json = serde_json::to_value(&error).unwrap();

    assert_eq!(json["rowIndex"], 3);
    assert_eq!(json["type"], "oneOf");
    assert_eq!(error.to_string(), "row 3 [oneOf] Priority: bad value");
}
