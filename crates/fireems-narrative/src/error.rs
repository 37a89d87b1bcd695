use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error(
        "unknown narrative field '{0}' (expected incident_type, response_time, location, date_time or units_resources)"
    )]
    UnknownField(String),
}
