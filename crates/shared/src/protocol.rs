use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Answers, Form, FormId, Question, QuestionId, QuestionKind},
    error::AddressError,
};

/// Path segment that prefixes every response-collection address.
pub const FORM_ADDRESS_PREFIX: &str = "userform";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub required: bool,
}

impl NewQuestion {
    pub fn new(kind: QuestionKind, text: impl Into<String>, required: bool) -> Self {
        Self {
            kind,
            text: text.into(),
            required,
        }
    }

    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            kind: self.kind,
            text: self.text,
            required: self.required,
        }
    }
}

/// Fields of a question to overwrite; `None` leaves the current value alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuestionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<QuestionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl QuestionPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.text.is_none() && self.required.is_none()
    }

    pub fn apply(self, question: &mut Question) {
        if let Some(kind) = self.kind {
            question.kind = kind;
        }
        if let Some(text) = self.text {
            question.text = text;
        }
        if let Some(required) = self.required {
            question.required = required;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Transition {
    SetDraftTitle {
        title: String,
    },
    AddQuestion {
        question: NewQuestion,
    },
    UpdateQuestion {
        question_id: QuestionId,
        patch: QuestionPatch,
    },
    DeleteQuestion {
        question_id: QuestionId,
    },
    SaveForm,
    LoadDraft {
        form: Form,
    },
    ResetDraft,
    SubmitResponse {
        form_id: FormId,
        email: String,
        answers: Answers,
    },
    DeleteForm {
        form_id: FormId,
    },
}

impl Transition {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetDraftTitle { .. } => "set_draft_title",
            Self::AddQuestion { .. } => "add_question",
            Self::UpdateQuestion { .. } => "update_question",
            Self::DeleteQuestion { .. } => "delete_question",
            Self::SaveForm => "save_form",
            Self::LoadDraft { .. } => "load_draft",
            Self::ResetDraft => "reset_draft",
            Self::SubmitResponse { .. } => "submit_response",
            Self::DeleteForm { .. } => "delete_form",
        }
    }
}

/// Path-like address of a form's response page, `userform/<form id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormAddress {
    pub form_id: FormId,
}

impl FormAddress {
    pub fn new(form_id: FormId) -> Self {
        Self { form_id }
    }

    pub fn path(&self) -> String {
        format!("{FORM_ADDRESS_PREFIX}/{}", self.form_id)
    }

    /// Accepts `userform/<id>` with or without a leading or trailing slash.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let trimmed = raw.trim().trim_matches('/');
        let Some((prefix, id)) = trimmed.split_once('/') else {
            return Err(AddressError::Malformed(raw.to_string()));
        };
        if prefix != FORM_ADDRESS_PREFIX || id.is_empty() || id.contains('/') {
            return Err(AddressError::Malformed(raw.to_string()));
        }
        let form_id = id.parse().map_err(|source| AddressError::InvalidFormId {
            raw: id.to_string(),
            source,
        })?;
        Ok(Self { form_id })
    }
}

impl fmt::Display for FormAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{FORM_ADDRESS_PREFIX}/{}", self.form_id)
    }
}
