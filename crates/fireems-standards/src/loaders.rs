//! Schema and mapping profile loaders.

use std::fs;
use std::path::Path;

use fireems_model::{FieldMapping, MappingProfile, TargetField};
use serde::Deserialize;
use tracing::{debug, info};

use crate::embedded::TOOL_SCHEMAS;
use crate::error::{Result, StandardsError};
use crate::schema::ToolSchema;

/// Schema files hold either a full [`ToolSchema`] or a bare field array.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaFile {
    Fields(Vec<TargetField>),
    Schema(ToolSchema),
}

/// Profile files hold either a [`MappingProfile`] or a bare mapping array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProfileFile {
    Mappings(Vec<FieldMapping>),
    Profile(MappingProfile),
}

/// Every built-in tool schema, in display order.
pub fn list_tools() -> Result<Vec<ToolSchema>> {
    TOOL_SCHEMAS
        .iter()
        .map(|(id, source)| parse_embedded(id, source))
        .collect()
}

/// Load a built-in tool schema by id (case-insensitive).
pub fn load_tool_schema(id: &str) -> Result<ToolSchema> {
    let wanted = id.trim().to_lowercase();
    let (id, source) = TOOL_SCHEMAS
        .iter()
        .find(|(tool, _)| *tool == wanted)
        .ok_or_else(|| StandardsError::UnknownTool { id: id.to_string() })?;
    parse_embedded(id, source)
}

/// Load a schema from a JSON file.
///
/// A bare array of fields takes its id and name from the file stem.
pub fn load_schema_file(path: &Path) -> Result<ToolSchema> {
    let contents = fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let parsed: SchemaFile =
        serde_json::from_str(&contents).map_err(|e| StandardsError::json(path, e))?;
    let schema = match parsed {
        SchemaFile::Schema(schema) => schema,
        SchemaFile::Fields(fields) => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("custom")
                .to_string();
            ToolSchema::new(stem.clone(), stem, fields)
        }
    };
    schema.check()?;
    info!(
        path = %path.display(),
        schema = %schema.id,
        field_count = schema.fields.len(),
        "loaded schema file"
    );
    Ok(schema)
}

/// Load a saved mapping profile.
pub fn load_mapping_profile(path: &Path) -> Result<MappingProfile> {
    let contents = fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let parsed: ProfileFile =
        serde_json::from_str(&contents).map_err(|e| StandardsError::json(path, e))?;
    let profile = match parsed {
        ProfileFile::Profile(profile) => profile,
        ProfileFile::Mappings(mappings) => MappingProfile::new(None, mappings),
    };
    debug!(
        path = %path.display(),
        mapping_count = profile.mappings.len(),
        "loaded mapping profile"
    );
    Ok(profile)
}

/// Write a mapping profile as pretty JSON, creating parent directories.
pub fn save_mapping_profile(path: &Path, profile: &MappingProfile) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StandardsError::io(parent, e))?;
    }
    let mut json =
        serde_json::to_string_pretty(profile).map_err(|e| StandardsError::json(path, e))?;
    json.push('\n');
    fs::write(path, json).map_err(|e| StandardsError::io(path, e))?;
    info!(
        path = %path.display(),
        mapping_count = profile.mappings.len(),
        "saved mapping profile"
    );
    Ok(())
}

fn parse_embedded(id: &str, source: &str) -> Result<ToolSchema> {
    let schema: ToolSchema =
        serde_json::from_str(source).map_err(|source| StandardsError::Embedded {
            id: id.to_string(),
            source,
        })?;
    schema.check()?;
    Ok(schema)
}
