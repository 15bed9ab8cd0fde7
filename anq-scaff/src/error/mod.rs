//! Error types and error handling

use crate::response::{Envelope, Responses};
use crate::status::Status;
use thiserror::Error;

/// Errors raised while answering a unified action
///
/// Every variant folds into an [`Envelope`]; nothing escapes the handler.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required parameter is absent or empty
    #[error("missing {0} parameter")]
    MissingParam(&'static str),

    /// The `action` value is not one of the supported verbs
    #[error("unsupported action: {0}")]
    UnsupportedAction(String),

    /// Params could not be decoded into the expected shape
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// Params decoded but failed validation
    #[error("invalid parameters: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The referenced record does not exist
    #[error("record does not exist")]
    NotFound,

    /// Failure inside the service layer
    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

impl ActionError {
    /// Status reported for this error
    #[must_use]
    pub const fn status(&self) -> Status {
        match self {
            Self::MissingParam(_)
            | Self::UnsupportedAction(_)
            | Self::InvalidParams(_)
            | Self::Validation(_) => Status::ParamsError,
            Self::NotFound => Status::RecordNotExist,
            Self::Service(_) => Status::BusinessError,
        }
    }

    /// Fold into a failure envelope
    ///
    /// Service errors that wrap an `ActionError` report that error's own
    /// status; any other service error becomes a business error carrying the
    /// original text in `error`.
    #[must_use]
    pub fn into_envelope(self) -> Envelope {
        match self {
            Self::Service(err) => match err.downcast::<Self>() {
                Ok(inner) => inner.into_envelope(),
                Err(err) => {
                    let text = err.to_string();
                    tracing::warn!(error = %text, "service operation failed");
                    Responses::failure(
                        Status::BusinessError,
                        Some(format!("operation failed: {text}")),
                        Some(text),
                    )
                }
            },
            Self::NotFound => Responses::failure(Status::RecordNotExist, None, None),
            other => Responses::failure(other.status(), Some(other.to_string()), None),
        }
    }
}

impl From<ActionError> for Envelope {
    fn from(err: ActionError) -> Self {
        err.into_envelope()
    }
}
