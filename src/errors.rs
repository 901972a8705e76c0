use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    #[error("budget category not found: {id}")]
    CategoryNotFound {
        id: Uuid,
    },

    #[error("savings goal not found: {id}")]
    GoalNotFound {
        id: Uuid,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl PlannerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// true for the input validation kind
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PlannerError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
