//! Toast and modal text shown after an action.

use form_store::DispatchOutcome;
use serde::Serialize;
use shared::error::ErrorCode;

use crate::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, "Success", message)
    }

    /// Outcomes that the user never gets a toast for map to `None`.
    pub fn for_outcome(outcome: &DispatchOutcome) -> Option<Self> {
        let message = match outcome {
            DispatchOutcome::QuestionAdded(_) => "Question added successfully!",
            DispatchOutcome::QuestionUpdated(_) => "Question updated successfully!",
            DispatchOutcome::QuestionDeleted(_) => "Question deleted successfully!",
            DispatchOutcome::FormSaved { .. } => "Form saved successfully!",
            DispatchOutcome::ResponseSubmitted(_) => "Response submitted successfully!",
            DispatchOutcome::FormDeleted { .. } => "Form deleted successfully!",
            DispatchOutcome::TitleSet
            | DispatchOutcome::DraftLoaded
            | DispatchOutcome::DraftReset
            | DispatchOutcome::Unchanged => return None,
        };
        Some(Self::success(message))
    }
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::Validation(err) => {
                Self::new(NoticeLevel::Warning, "Validation Error", err.to_string())
            }
            ClientError::Api(err) if matches!(err.code, ErrorCode::NotFound) => Self::new(
                NoticeLevel::Danger,
                "Form Not Found",
                "The form you're looking for doesn't exist or has been removed.",
            ),
            other => Self::new(NoticeLevel::Danger, "Error", other.to_string()),
        }
    }
}
