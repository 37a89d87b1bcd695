//! Built-in destination tool schemas and JSON file loaders.
//!
//! - [`list_tools`] / [`load_tool_schema`]: schemas compiled into the binary
//! - [`load_schema_file`]: a user-supplied schema (object or bare field array)
//! - [`load_mapping_profile`] / [`save_mapping_profile`]: saved mappings

pub mod embedded;
pub mod error;
mod loaders;
mod schema;

pub use error::{Result, StandardsError};
pub use loaders::{
    list_tools, load_mapping_profile, load_schema_file, load_tool_schema, save_mapping_profile,
};
pub use schema::ToolSchema;
