use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("Config error: {0}")]
    Config(String),
    #[error("Pattern error: {0}")]
    Pattern(String),
    #[error("Graph error: {0}")]
    Graph(String),
    #[error("Ambiguous keywords: {}", .0.join("; "))]
    Ambiguous(Vec<String>),
}

pub type Result<T> = std::result::Result<T, QueryError>;

// Helper conversions
impl From<regex::Error> for QueryError {
    fn from(e: regex::Error) -> Self { Self::Pattern(e.to_string()) }
}
impl From<config::ConfigError> for QueryError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self { Self::Graph(e.to_string()) }
}
impl From<std::io::Error> for QueryError {
    fn from(e: std::io::Error) -> Self { Self::Graph(e.to_string()) }
}
