/// Errors surfaced by the simulation core.
///
/// None of these abort a tick on their own; the caller decides whether to
/// log and continue or stop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
    #[error("no reward defined for collectible kind `{0}`")]
    UnknownKind(String),
    #[error("invalid tuning `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },
}

impl SimError {
    pub(crate) fn invalid_tuning(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidTuning {
            field,
            reason: reason.into(),
        }
    }
}
