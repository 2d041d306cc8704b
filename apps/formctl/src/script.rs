//! JSON action scripts: each step is one thing a user does in the UI.

use form_client::{
    AnswerSheet, AppContext, ClientError, Notice, NoticeLevel, QuestionInput, ValidationError,
};
use form_store::DispatchOutcome;
use serde::Deserialize;
use shared::domain::{Answer, FormId, QuestionId, QuestionKind};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SetTitle {
        title: String,
    },
    AddQuestion {
        #[serde(flatten)]
        question: QuestionInput,
    },
    EditQuestion {
        index: usize,
        #[serde(flatten)]
        question: QuestionInput,
    },
    DeleteQuestion {
        index: usize,
    },
    Preview,
    SaveForm,
    NewForm,
    EditForm {
        form: usize,
    },
    ShareLink {
        form: usize,
    },
    /// `answers` follow the form's question order; `null` leaves one blank.
    Submit {
        form: usize,
        email: String,
        #[serde(default)]
        email_confirmation: Option<String>,
        #[serde(default)]
        answers: Vec<Option<Answer>>,
    },
    DeleteForm {
        form: usize,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetTitle { .. } => "set_title",
            Self::AddQuestion { .. } => "add_question",
            Self::EditQuestion { .. } => "edit_question",
            Self::DeleteQuestion { .. } => "delete_question",
            Self::Preview => "preview",
            Self::SaveForm => "save_form",
            Self::NewForm => "new_form",
            Self::EditForm { .. } => "edit_form",
            Self::ShareLink { .. } => "share_link",
            Self::Submit { .. } => "submit",
            Self::DeleteForm { .. } => "delete_form",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("the draft has no question #{0}")]
    NoSuchQuestion(usize),
    #[error("there is no saved form #{0}")]
    NoSuchForm(usize),
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<&ScriptError> for Notice {
    fn from(err: &ScriptError) -> Self {
        match err {
            ScriptError::Client(err) => Notice::from(err),
            other => Notice::new(NoticeLevel::Danger, "Error", other.to_string()),
        }
    }
}

/// What one step produced: the toast, if any, plus extra output such as a
/// share link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub notice: Option<Notice>,
    pub detail: Option<String>,
}

/// Decodes each element on its own so one bad step does not sink the script.
pub fn parse_script(raw: &str) -> serde_json::Result<Vec<Result<Action, serde_json::Error>>> {
    let steps: Vec<serde_json::Value> = serde_json::from_str(raw)?;
    Ok(steps.into_iter().map(serde_json::from_value).collect())
}

pub fn apply(ctx: &mut AppContext, action: Action) -> Result<StepReport, ScriptError> {
    let report = match action {
        Action::SetTitle { title } => StepReport::from_outcome(&ctx.set_title(title)),
        Action::AddQuestion { question } => StepReport::from_outcome(&ctx.add_question(question)?),
        Action::EditQuestion { index, question } => {
            let question_id = draft_question(ctx, index)?;
            StepReport::from_outcome(&ctx.edit_question(question_id, question)?)
        }
        Action::DeleteQuestion { index } => {
            let question_id = draft_question(ctx, index)?;
            StepReport::from_outcome(&ctx.delete_question(question_id))
        }
        Action::Preview => {
            let draft = ctx.preview()?;
            let questions: Vec<String> = draft
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let marker = if q.required { "*" } else { "" };
                    format!("{}. {}{marker} [{}]", i + 1, q.text, q.kind.label())
                })
                .collect();
            StepReport::detail(format!("preview '{}': {}", draft.title, questions.join("; ")))
        }
        Action::SaveForm => StepReport::from_outcome(&ctx.save_form()?),
        Action::NewForm => StepReport::from_outcome(&ctx.new_form()),
        Action::EditForm { form } => {
            let form_id = saved_form(ctx, form)?;
            StepReport::from_outcome(&ctx.edit_form(form_id)?)
        }
        Action::ShareLink { form } => {
            let link = ctx.share_link(saved_form(ctx, form)?)?;
            StepReport {
                notice: Some(Notice::success("Form link copied to clipboard!")),
                detail: Some(link.to_string()),
            }
        }
        Action::Submit {
            form,
            email,
            email_confirmation,
            answers,
        } => {
            let sheet = fill_sheet(ctx, form, answers)?;
            let confirmation = email_confirmation.unwrap_or_else(|| email.clone());
            let response_id = ctx.submit_response(sheet, &email, &confirmation)?;
            StepReport {
                notice: Some(Notice::success("Response submitted successfully!")),
                detail: Some(format!("response {response_id}")),
            }
        }
        Action::DeleteForm { form } => {
            let form_id = saved_form(ctx, form)?;
            StepReport::from_outcome(&ctx.delete_form(form_id))
        }
    };
    Ok(report)
}

impl StepReport {
    fn from_outcome(outcome: &DispatchOutcome) -> Self {
        Self {
            notice: Notice::for_outcome(outcome),
            detail: None,
        }
    }

    fn detail(detail: String) -> Self {
        Self {
            notice: None,
            detail: Some(detail),
        }
    }
}

fn draft_question(ctx: &AppContext, index: usize) -> Result<QuestionId, ScriptError> {
    ctx.state()
        .current_form()
        .questions
        .get(index)
        .map(|q| q.id)
        .ok_or(ScriptError::NoSuchQuestion(index))
}

fn saved_form(ctx: &AppContext, index: usize) -> Result<FormId, ScriptError> {
    ctx.state()
        .forms()
        .get(index)
        .map(|f| f.id)
        .ok_or(ScriptError::NoSuchForm(index))
}

fn fill_sheet(
    ctx: &AppContext,
    index: usize,
    answers: Vec<Option<Answer>>,
) -> Result<AnswerSheet, ScriptError> {
    let form = ctx
        .state()
        .forms()
        .get(index)
        .ok_or(ScriptError::NoSuchForm(index))?;
    let mut sheet = AnswerSheet::for_form(form);
    for (question, answer) in form.questions.iter().zip(answers) {
        match (answer, &question.kind) {
            (None, _) => {}
            (Some(Answer::Choices(choices)), QuestionKind::MultipleChoice { .. }) => {
                for choice in &choices {
                    sheet
                        .toggle_choice(question.id, choice)
                        .map_err(ClientError::from)?;
                }
            }
            (Some(answer @ Answer::Choices(_)), _) => {
                return Err(ClientError::from(ValidationError::AnswerMismatch {
                    question: question.text.clone(),
                    answer: answer.to_string(),
                })
                .into())
            }
            (Some(Answer::Text(text)), _) => sheet
                .set_text(question.id, text)
                .map_err(ClientError::from)?,
        }
    }
    Ok(sheet)
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
