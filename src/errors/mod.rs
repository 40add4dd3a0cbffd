use thiserror::Error;

/// Failures that abort an aggregation run before anything is written
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("Two events share the date {0}")]
    DuplicateEventDate(String),

    #[error("Invalid ISO date '{value}' in {source_name}")]
    InvalidDate { value: String, source_name: String },

    #[error("Malformed event in {path}: {reason}")]
    MalformedEvent { path: String, reason: String },

    #[error("No events available")]
    NoEvents,
}

/// Add context to read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str, path: &str) -> String {
    format!("Failed to parse {} from {}", data_type, path)
}

/// Add context to write errors
pub fn write_context(key: &str) -> String {
    format!("Failed to write output record {}", key)
}
