use serde::Serialize;
use shared::{
    domain::{Form, FormDraft, FormId, Response},
    protocol::FormAddress,
};

/// One immutable snapshot of everything the store owns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StoreState {
    pub(crate) forms: Vec<Form>,
    pub(crate) current_form: FormDraft,
    pub(crate) responses: Vec<Response>,
}

impl StoreState {
    /// Saved forms in insertion order.
    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn current_form(&self) -> &FormDraft {
        &self.current_form
    }

    /// Submitted responses in submission order.
    pub fn responses(&self) -> &[Response] {
        &self.responses
    }

    pub fn form(&self, form_id: FormId) -> Option<&Form> {
        self.forms.iter().find(|form| form.id == form_id)
    }

    pub fn form_position(&self, form_id: FormId) -> Option<usize> {
        self.forms.iter().position(|form| form.id == form_id)
    }

    pub fn responses_for(&self, form_id: FormId) -> impl Iterator<Item = &Response> + '_ {
        self.responses
            .iter()
            .filter(move |response| response.form_id == form_id)
    }

    pub fn response_count(&self, form_id: FormId) -> usize {
        self.responses_for(form_id).count()
    }

    pub fn resolve(&self, address: &FormAddress) -> Option<&Form> {
        self.form(address.form_id)
    }
}
