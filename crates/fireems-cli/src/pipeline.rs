//! Pipeline stages behind the CLI commands.
//!
//! Each function returns a plain result struct; printing lives in the binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use fireems_ingest::{DEFAULT_SAMPLE_LIMIT, FileType, ParseOptions, parse_file};
use fireems_map::{
    DetectedType, FieldMappingReport, FieldSuggestion, MappingOptions, MappingValidation,
    ScoringEngine, detect_field_types, generate_field_mapping_report, validate_field_mapping,
};
use fireems_model::MappingProfile;
use fireems_standards::{ToolSchema, load_mapping_profile, load_schema_file, load_tool_schema};
use fireems_validate::{ValidatedData, ValidationSummary, transform_and_validate};
use serde::Serialize;
use tracing::{info, info_span, trace, warn};

use crate::logging::redact_value;

/// Where the destination schema comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A built-in tool id.
    Tool(String),
    /// A JSON schema file.
    File(PathBuf),
}

impl SchemaSource {
    pub fn load(&self) -> Result<ToolSchema> {
        match self {
            Self::Tool(id) => load_tool_schema(id).context("load tool schema"),
            Self::File(path) => load_schema_file(path).context("load schema file"),
        }
    }
}

/// One source column as seen in the sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    pub detected_type: DetectedType,
    /// Sample rows with a non-empty value.
    pub filled: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectResult {
    pub path: PathBuf,
    pub file_type: FileType,
    pub columns: Vec<ColumnProfile>,
    pub total_rows: usize,
    pub sampled_rows: usize,
    pub truncated: bool,
}

/// Parse a file and profile its columns.
pub fn inspect(path: &Path, options: &ParseOptions) -> Result<InspectResult> {
    let parsed = parse_file(path, options).with_context(|| format!("parse {}", path.display()))?;
    let types = detect_field_types(&parsed.data);
    let columns = parsed
        .columns
        .iter()
        .map(|name| ColumnProfile {
            name: name.clone(),
            detected_type: types.get(name).copied().unwrap_or(DetectedType::String),
            filled: parsed
                .data
                .iter()
                .filter(|row| row.get(name).is_some_and(|value| !value.is_empty()))
                .count(),
        })
        .collect();
    info!(
        path = %path.display(),
        file_type = %parsed.file_type,
        total_rows = parsed.total_rows,
        "inspected file"
    );
    Ok(InspectResult {
        path: path.to_path_buf(),
        file_type: parsed.file_type,
        columns,
        total_rows: parsed.total_rows,
        sampled_rows: parsed.row_count(),
        truncated: parsed.truncated,
    })
}

#[derive(Debug, Clone)]
pub struct SuggestResult {
    pub schema: ToolSchema,
    /// One entry per source column, in column order.
    pub suggestions: Vec<FieldSuggestion>,
    /// Draft profile holding the matched suggestions.
    pub profile: MappingProfile,
    pub validation: MappingValidation,
}

/// Suggest a one-to-one mapping from the file's columns to the schema.
pub fn suggest(path: &Path, source: &SchemaSource, min_confidence: f64) -> Result<SuggestResult> {
    let schema = source.load()?;
    let parsed = parse_file(path, &ParseOptions::default())
        .with_context(|| format!("parse {}", path.display()))?;

    let engine = ScoringEngine::new(schema.fields.clone())
        .with_options(MappingOptions::default().with_min_confidence(min_confidence));
    let suggestions = engine.suggest_all(&parsed.columns);
    let mappings = engine.draft_mappings(&parsed.columns);
    let validation = validate_field_mapping(&mappings, &schema.fields);
    info!(
        schema = %schema.id,
        columns = parsed.columns.len(),
        mapped = mappings.len(),
        valid = validation.is_valid,
        "drafted mapping"
    );

    let profile = MappingProfile::new(Some(schema.id.clone()), mappings);
    Ok(SuggestResult {
        schema,
        suggestions,
        profile,
        validation,
    })
}

#[derive(Debug, Clone)]
pub struct RunResult {
    pub schema: ToolSchema,
    pub total_rows: usize,
    pub mapping_validation: MappingValidation,
    /// Coverage over the first rows of the file.
    pub report: FieldMappingReport,
    pub summary: ValidationSummary,
    pub output: ValidatedData,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        !self.summary.is_clean()
    }
}

/// Parse, transform and validate a whole file with a saved mapping.
///
/// An incomplete mapping is reported but does not stop the run; its effect
/// shows up as validation errors.
pub fn run(path: &Path, source: &SchemaSource, mapping_path: &Path) -> Result<RunResult> {
    let span = info_span!("run", file = %path.display());
    let _guard = span.enter();
    let start = Instant::now();

    let schema = source.load()?;
    let profile = load_mapping_profile(mapping_path).context("load mapping profile")?;
    if let Some(tool) = profile.tool.as_deref().filter(|tool| *tool != schema.id) {
        warn!(
            profile_tool = %tool,
            schema = %schema.id,
            "mapping profile was built for a different tool"
        );
    }

    let mapping_validation = validate_field_mapping(&profile.mappings, &schema.fields);
    for error in &mapping_validation.errors {
        warn!(%error, "mapping problem");
    }

    let parsed = parse_file(path, &ParseOptions::unlimited())
        .with_context(|| format!("parse {}", path.display()))?;
    let sample = &parsed.data[..parsed.data.len().min(DEFAULT_SAMPLE_LIMIT)];
    let report = generate_field_mapping_report(&profile.mappings, &schema.fields, sample);

    let output = transform_and_validate(&parsed.data, &schema.fields, &profile.mappings);
    for error in &output.errors {
        let value = output
            .data
            .get(error.row_index)
            .and_then(|row| row.get(&error.field))
            .map(ToString::to_string)
            .unwrap_or_default();
        trace!(
            row = error.row_index,
            field = %error.field,
            kind = %error.kind,
            value = %redact_value(&value),
            "validation error"
        );
    }

    let summary = ValidationSummary::from_errors(&output.errors, output.data.len());
    info!(
        schema = %schema.id,
        rows = parsed.total_rows,
        errors = summary.total_errors,
        quality_score = report.data_quality_score,
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );

    Ok(RunResult {
        schema,
        total_rows: parsed.total_rows,
        mapping_validation,
        report,
        summary,
        output,
    })
}

/// Write `{data, errors, diagnostics}` as pretty JSON.
pub fn write_output(path: &Path, output: &ValidatedData) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(output).context("serialize output")?;
    fs::write(path, json + "\n").with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), rows = output.data.len(), "wrote output");
    Ok(())
}
