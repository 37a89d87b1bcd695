//! CLI library components for the FireEMS CAD importer.

pub mod logging;
pub mod pipeline;
