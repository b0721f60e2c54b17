use thiserror::Error;

/// Failure modes of theme resolution and layout.
///
/// Both kinds are deterministic for a given input; nothing here is worth
/// retrying and no partial model is ever produced alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeatmapError {
    /// Invalid display configuration or theme (caller-fixable).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed or inconsistent input data.
    #[error("data error in {record}: {message}")]
    Data {
        /// Which input record is at fault, e.g. `contributions[3]`.
        record: String,
        message: String,
    },
}

impl HeatmapError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn data(record: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Data {
            record: record.into(),
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }
}

pub type Result<T, E = HeatmapError> = std::result::Result<T, E>;
