//! Checks the UI runs before dispatching; the store trusts whatever it gets.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use shared::{
    domain::{Answers, Form, FormDraft, QuestionId, QuestionKind},
    protocol::{NewQuestion, QuestionPatch},
};
use thiserror::Error;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a form title")]
    MissingTitle,
    #[error("Please add at least one question")]
    NoQuestions,
    #[error("Please enter a question")]
    MissingQuestionText,
    #[error("Please add at least one option")]
    NoOptions,
    #[error("Please fill all option fields")]
    BlankOption,
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please confirm your email address")]
    MissingEmailConfirmation,
    #[error("Email addresses do not match")]
    EmailMismatch,
    #[error("Please answer the required question: {question}")]
    RequiredAnswerMissing { question: String },
    #[error("question {0} is not part of this form")]
    UnknownQuestion(QuestionId),
    #[error("'{answer}' does not fit question: {question}")]
    AnswerMismatch { question: String, answer: String },
}

/// What the question editor holds when the author presses save.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionInput {
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub text: String,
    #[serde(default)]
    pub required: bool,
}

impl QuestionInput {
    pub fn new(kind: QuestionKind, text: impl Into<String>, required: bool) -> Self {
        Self {
            kind,
            text: text.into(),
            required,
        }
    }

    pub fn validate(self) -> Result<NewQuestion, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::MissingQuestionText);
        }
        let kind = match self.kind {
            QuestionKind::MultipleChoice { options } => {
                if options.is_empty() {
                    return Err(ValidationError::NoOptions);
                }
                if options.iter().any(|option| option.trim().is_empty()) {
                    return Err(ValidationError::BlankOption);
                }
                QuestionKind::MultipleChoice { options }
            }
            other => other,
        };
        Ok(NewQuestion::new(kind, text, self.required))
    }

    /// Editing sends every field back, so the patch overwrites all of them.
    pub fn validate_patch(self) -> Result<QuestionPatch, ValidationError> {
        let question = self.validate()?;
        Ok(QuestionPatch {
            kind: Some(question.kind),
            text: Some(question.text),
            required: Some(question.required),
        })
    }
}

pub fn validate_preview(draft: &FormDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    Ok(())
}

pub fn validate_save(draft: &FormDraft) -> Result<(), ValidationError> {
    validate_preview(draft)?;
    if draft.questions.is_empty() {
        return Err(ValidationError::NoQuestions);
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn validate_email(email: &str, confirmation: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if confirmation.trim().is_empty() {
        return Err(ValidationError::MissingEmailConfirmation);
    }
    if email != confirmation {
        return Err(ValidationError::EmailMismatch);
    }
    Ok(())
}

/// Every required question must carry a non-blank answer.
pub fn validate_required_answers(form: &Form, answers: &Answers) -> Result<(), ValidationError> {
    for question in form.questions.iter().filter(|q| q.required) {
        let answered = answers
            .get(&question.id)
            .is_some_and(|answer| !answer.is_blank());
        if !answered {
            return Err(ValidationError::RequiredAnswerMissing {
                question: question.text.clone(),
            });
        }
    }
    Ok(())
}
