//! Caller side of the form store: the application context that the views
//! share, plus the validation each view runs before it dispatches.

use form_store::{DispatchOutcome, FormStore, StoreState};
use shared::{
    domain::{Form, FormDraft, FormId, QuestionId, ResponseId},
    error::{AddressError, ApiException, ErrorCode},
    protocol::Transition,
};
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

mod answer_sheet;
pub mod links;
mod notice;
pub mod stats;
pub mod validation;

pub use answer_sheet::AnswerSheet;
pub use notice::{Notice, NoticeLevel};
pub use stats::AdminStats;
pub use validation::{QuestionInput, ValidationError};

pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:5173/";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("invalid share base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl From<AddressError> for ClientError {
    fn from(value: AddressError) -> Self {
        Self::Api(value.into())
    }
}

/// Everything the views share for the lifetime of the application. Built
/// once at startup and handed to each view by reference.
pub struct AppContext {
    store: FormStore,
    share_base: Url,
}

impl AppContext {
    pub fn new(store: FormStore, share_base_url: &str) -> Result<Self, ClientError> {
        let share_base =
            links::parse_base_url(share_base_url).map_err(|source| ClientError::InvalidBaseUrl {
                url: share_base_url.to_string(),
                source,
            })?;
        Ok(Self { store, share_base })
    }

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn share_base(&self) -> &Url {
        &self.share_base
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> DispatchOutcome {
        self.store.dispatch(Transition::SetDraftTitle {
            title: title.into(),
        })
    }

    pub fn add_question(&mut self, input: QuestionInput) -> Result<DispatchOutcome, ClientError> {
        let question = input.validate().inspect_err(|err| {
            warn!(error = %err, "rejected new question");
        })?;
        Ok(self.store.dispatch(Transition::AddQuestion { question }))
    }

    pub fn edit_question(
        &mut self,
        question_id: QuestionId,
        input: QuestionInput,
    ) -> Result<DispatchOutcome, ClientError> {
        let patch = input.validate_patch().inspect_err(|err| {
            warn!(error = %err, %question_id, "rejected question edit");
        })?;
        Ok(self
            .store
            .dispatch(Transition::UpdateQuestion { question_id, patch }))
    }

    pub fn delete_question(&mut self, question_id: QuestionId) -> DispatchOutcome {
        self.store
            .dispatch(Transition::DeleteQuestion { question_id })
    }

    pub fn preview(&self) -> Result<&FormDraft, ClientError> {
        let draft = self.store.state().current_form();
        validation::validate_preview(draft)?;
        Ok(draft)
    }

    pub fn save_form(&mut self) -> Result<DispatchOutcome, ClientError> {
        validation::validate_save(self.store.state().current_form()).inspect_err(|err| {
            warn!(error = %err, "rejected form save");
        })?;
        let outcome = self.store.dispatch(Transition::SaveForm);
        if let DispatchOutcome::FormSaved { form_id, created } = outcome {
            info!(%form_id, created, "form saved");
        }
        Ok(outcome)
    }

    pub fn new_form(&mut self) -> DispatchOutcome {
        self.store.dispatch(Transition::ResetDraft)
    }

    /// Loads a saved form back into the draft for editing.
    pub fn edit_form(&mut self, form_id: FormId) -> Result<DispatchOutcome, ClientError> {
        let form = self.saved_form(form_id)?.clone();
        Ok(self.store.dispatch(Transition::LoadDraft { form }))
    }

    pub fn share_link(&self, form_id: FormId) -> Result<Url, ClientError> {
        self.saved_form(form_id)?;
        links::share_link(&self.share_base, form_id).map_err(|source| {
            ClientError::InvalidBaseUrl {
                url: self.share_base.to_string(),
                source,
            }
        })
    }

    /// Resolves a share link (or bare `userform/<id>` path) to the saved form.
    pub fn open_shared(&self, link: &str) -> Result<&Form, ClientError> {
        let address = links::address_from_link(link)?;
        self.store
            .state()
            .resolve(&address)
            .ok_or_else(|| {
                ApiException::not_found(format!("form {} not found", address.form_id)).into()
            })
    }

    pub fn submit_response(
        &mut self,
        sheet: AnswerSheet,
        email: &str,
        email_confirmation: &str,
    ) -> Result<ResponseId, ClientError> {
        let form_id = sheet.form_id();
        let form = self.saved_form(form_id)?;
        validation::validate_email(email, email_confirmation)?;
        validation::validate_required_answers(form, sheet.answers())?;

        let outcome = self.store.dispatch(Transition::SubmitResponse {
            form_id,
            email: email.to_string(),
            answers: sheet.into_answers(),
        });
        match outcome {
            DispatchOutcome::ResponseSubmitted(response_id) => {
                info!(%form_id, %response_id, "response submitted");
                Ok(response_id)
            }
            other => Err(ApiException::new(
                ErrorCode::Internal,
                format!("unexpected outcome for response submission: {other:?}"),
            )
            .into()),
        }
    }

    pub fn delete_form(&mut self, form_id: FormId) -> DispatchOutcome {
        let outcome = self.store.dispatch(Transition::DeleteForm { form_id });
        if let DispatchOutcome::FormDeleted {
            responses_removed, ..
        } = outcome
        {
            info!(%form_id, responses_removed, "form deleted");
        }
        outcome
    }

    pub fn stats(&self) -> AdminStats {
        AdminStats::collect(self.store.state())
    }

    fn saved_form(&self, form_id: FormId) -> Result<&Form, ClientError> {
        self.store
            .state()
            .form(form_id)
            .ok_or_else(|| ApiException::not_found(format!("form {form_id} not found")).into())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
