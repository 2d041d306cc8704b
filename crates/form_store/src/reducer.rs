//! Pure transition function over [`StoreState`].

use shared::{
    domain::{Form, FormDraft, FormId, QuestionId, Response, ResponseId},
    protocol::Transition,
};

use crate::{
    services::{Clock, IdGenerator},
    state::StoreState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    TitleSet,
    QuestionAdded(QuestionId),
    QuestionUpdated(QuestionId),
    QuestionDeleted(QuestionId),
    FormSaved { form_id: FormId, created: bool },
    DraftLoaded,
    DraftReset,
    ResponseSubmitted(ResponseId),
    FormDeleted {
        form_id: FormId,
        responses_removed: usize,
    },
    Unchanged,
}

impl DispatchOutcome {
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

#[derive(Debug)]
pub enum Reduced {
    Changed {
        state: StoreState,
        outcome: DispatchOutcome,
    },
    Unchanged,
}

impl Reduced {
    fn changed(state: StoreState, outcome: DispatchOutcome) -> Self {
        Self::Changed { state, outcome }
    }
}

pub fn reduce(
    state: &StoreState,
    transition: Transition,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
) -> Reduced {
    match transition {
        Transition::SetDraftTitle { title } => {
            let mut next = state.clone();
            next.current_form.title = title;
            Reduced::changed(next, DispatchOutcome::TitleSet)
        }
        Transition::AddQuestion { question } => {
            let question_id = QuestionId(ids.next_uuid());
            let mut next = state.clone();
            next.current_form
                .questions
                .push(question.into_question(question_id));
            Reduced::changed(next, DispatchOutcome::QuestionAdded(question_id))
        }
        Transition::UpdateQuestion { question_id, patch } => {
            let Some(index) = question_index(&state.current_form, question_id) else {
                return Reduced::Unchanged;
            };
            let mut next = state.clone();
            patch.apply(&mut next.current_form.questions[index]);
            Reduced::changed(next, DispatchOutcome::QuestionUpdated(question_id))
        }
        Transition::DeleteQuestion { question_id } => {
            let Some(index) = question_index(&state.current_form, question_id) else {
                return Reduced::Unchanged;
            };
            let mut next = state.clone();
            next.current_form.questions.remove(index);
            Reduced::changed(next, DispatchOutcome::QuestionDeleted(question_id))
        }
        Transition::SaveForm => {
            let draft = &state.current_form;
            let form = Form {
                id: draft.id.unwrap_or_else(|| FormId(ids.next_uuid())),
                title: draft.title.clone(),
                questions: draft.questions.clone(),
                is_published: true,
                created_at: draft.created_at.unwrap_or_else(|| clock.now()),
            };
            let form_id = form.id;

            let mut next = state.clone();
            let created = match next.form_position(form_id) {
                Some(index) => {
                    next.forms[index] = form;
                    false
                }
                None => {
                    next.forms.push(form);
                    true
                }
            };
            next.current_form = FormDraft::default();
            Reduced::changed(next, DispatchOutcome::FormSaved { form_id, created })
        }
        Transition::LoadDraft { form } => {
            let mut next = state.clone();
            next.current_form = form.into();
            Reduced::changed(next, DispatchOutcome::DraftLoaded)
        }
        Transition::ResetDraft => {
            let mut next = state.clone();
            next.current_form = FormDraft::default();
            Reduced::changed(next, DispatchOutcome::DraftReset)
        }
        Transition::SubmitResponse {
            form_id,
            email,
            answers,
        } => {
            let response_id = ResponseId(ids.next_uuid());
            let mut next = state.clone();
            next.responses.push(Response {
                id: response_id,
                form_id,
                email,
                answers,
                submitted_at: clock.now(),
            });
            Reduced::changed(next, DispatchOutcome::ResponseSubmitted(response_id))
        }
        Transition::DeleteForm { form_id } => {
            let responses_removed = state.response_count(form_id);
            if state.form(form_id).is_none() && responses_removed == 0 {
                return Reduced::Unchanged;
            }
            let mut next = state.clone();
            next.forms.retain(|form| form.id != form_id);
            next.responses.retain(|response| response.form_id != form_id);
            Reduced::changed(
                next,
                DispatchOutcome::FormDeleted {
                    form_id,
                    responses_removed,
                },
            )
        }
    }
}

fn question_index(draft: &FormDraft, question_id: QuestionId) -> Option<usize> {
    draft.questions.iter().position(|q| q.id == question_id)
}
