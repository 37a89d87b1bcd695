//! Embedded tool schemas.
//!
//! Every built-in destination tool is compiled in with `include_str!()` so the
//! CLI needs no data directory at runtime.

/// Response Time Analyzer
pub const RESPONSE_TIME_ANALYZER: &str = include_str!("../data/response-time-analyzer.json");

/// Call Density Heatmap
pub const CALL_DENSITY_HEATMAP: &str = include_str!("../data/call-density-heatmap.json");

/// Station Coverage Optimizer
pub const STATION_COVERAGE_OPTIMIZER: &str =
    include_str!("../data/station-coverage-optimizer.json");

/// Incident Dashboard
pub const INCIDENT_DASHBOARD: &str = include_str!("../data/incident-dashboard.json");

/// Tool id and schema source, in display order.
pub const TOOL_SCHEMAS: [(&str, &str); 4] = [
    ("response-time-analyzer", RESPONSE_TIME_ANALYZER),
    ("call-density-heatmap", CALL_DENSITY_HEATMAP),
    ("station-coverage-optimizer", STATION_COVERAGE_OPTIMIZER),
    ("incident-dashboard", INCIDENT_DASHBOARD),
];
