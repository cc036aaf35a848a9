use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A stats record whose `type` (and `kind`, where required) does not map
    /// to any category. Recovered per record by the normalizer.
    #[error("unclassifiable stats record: {reason}")]
    ErrUnclassifiableRecord { id: Option<String>, reason: String },
    /// A category that is not registered in the schema table in use.
    #[error("unknown stats category: {0}")]
    ErrUnknownCategory(String),
    #[error("stats record must be a JSON object, got {0}")]
    ErrInvalidRecord(String),
    #[error("stats snapshot must be a JSON array or object, got {0}")]
    ErrInvalidSnapshot(String),
    #[error("schema table has more than one entry for category {0}")]
    ErrDuplicateCategory(String),
    #[error("schema for category {category} lists field {field} more than once")]
    ErrDuplicateField { category: String, field: String },
    #[error("schema for category {0} has no fields")]
    ErrEmptySchema(String),
    #[error("schema table has no entry for category {0}")]
    ErrMissingCategory(String),

    #[error("{0}")]
    Json(#[from] JsonError),
}

impl Error {
    /// Returns true for errors that only affect a single record and are
    /// recovered by skipping it.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ErrUnclassifiableRecord { .. })
    }
}

#[derive(Debug, Error)]
#[error("json error: {0}")]
pub struct JsonError(#[from] pub serde_json::Error);

// Workaround for wanting PartialEq for serde_json::Error.
impl PartialEq for JsonError {
    fn eq(&self, other: &Self) -> bool {
        self.0.classify() == other.0.classify()
            && self.0.line() == other.0.line()
            && self.0.column() == other.0.column()
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(JsonError(e))
    }
}
