use thiserror::Error;

/// Errors raised while moving models on and off the wire, or by opt-in validation.
///
/// Construction, accessors, mapping and equality never fail.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to decode {model}: {source}")]
    Decode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {model}: {source}")]
    Encode {
        model: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for `{field}` in {model}: {message}")]
    Validation {
        model: &'static str,
        field: &'static str,
        message: String,
    },
}

impl ModelError {
    pub fn validation(model: &'static str, field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            model,
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
