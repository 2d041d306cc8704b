//! Admin panel figures derived from a store snapshot.

use chrono::{DateTime, Utc};
use form_store::StoreState;
use serde::Serialize;
use shared::domain::{FormId, ResponseId};

pub const UNKNOWN_FORM: &str = "Unknown Form";
pub const UNKNOWN_QUESTION: &str = "Unknown Question";
/// Badge for listed forms; only published forms reach the saved collection.
pub const PUBLISHED: &str = "Published";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_forms: usize,
    pub total_responses: usize,
    pub average_responses_per_form: f64,
    pub forms: Vec<FormRow>,
    pub responses: Vec<ResponseRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormRow {
    pub form_id: FormId,
    pub title: String,
    pub question_count: usize,
    pub response_count: usize,
    pub created_at: DateTime<Utc>,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseRow {
    pub response_id: ResponseId,
    pub form_title: String,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AnswerRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRow {
    pub question: String,
    pub answer: String,
}

impl AdminStats {
    pub fn collect(state: &StoreState) -> Self {
        let forms = state
            .forms()
            .iter()
            .map(|form| FormRow {
                form_id: form.id,
                title: form.title.clone(),
                question_count: form.questions.len(),
                response_count: state.response_count(form.id),
                created_at: form.created_at,
                status: PUBLISHED,
            })
            .collect();

        let responses = state
            .responses()
            .iter()
            .map(|response| {
                let form = state.form(response.form_id);
                let answers = response
                    .answers
                    .iter()
                    .map(|(question_id, answer)| AnswerRow {
                        question: form
                            .and_then(|form| form.question(*question_id))
                            .map_or_else(|| UNKNOWN_QUESTION.to_string(), |q| q.text.clone()),
                        answer: answer.to_string(),
                    })
                    .collect();
                ResponseRow {
                    response_id: response.id,
                    form_title: form
                        .map_or_else(|| UNKNOWN_FORM.to_string(), |form| form.title.clone()),
                    email: response.email.clone(),
                    submitted_at: response.submitted_at,
                    answers,
                }
            })
            .collect();

        let total_forms = state.forms().len();
        let total_responses = state.responses().len();
        Self {
            total_forms,
            total_responses,
            average_responses_per_form: average_per_form(total_responses, total_forms),
            forms,
            responses,
        }
    }
}

/// Rounded to one decimal; zero until there is at least one response.
pub fn average_per_form(responses: usize, forms: usize) -> f64 {
    if responses == 0 || forms == 0 {
        return 0.0;
    }
    let average = responses as f64 / forms as f64;
    (average * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_store::FormStore;
    use shared::{
        domain::{Answer, Answers, QuestionId, QuestionKind},
        protocol::{NewQuestion, Transition},
    };
    use uuid::Uuid;

    #[test]
    fn average_is_rounded_and_guarded() {
        assert_eq!(average_per_form(0, 0), 0.0);
        assert_eq!(average_per_form(0, 4), 0.0);
        assert_eq!(average_per_form(2, 3), 0.7);
        assert_eq!(average_per_form(5, 0), 0.0);
        assert_eq!(average_per_form(4, 2), 2.0);
    }

    #[test]
    fn rows_fall_back_for_dangling_references() {
        let mut store = FormStore::new();
        store.dispatch(Transition::SetDraftTitle {
            title: "Survey".into(),
        });
        store.dispatch(Transition::AddQuestion {
            question: NewQuestion::new(QuestionKind::ShortAnswer, "Name?", true),
        });
        store.dispatch(Transition::SaveForm);
        let form = store.state().forms()[0].clone();

        let mut answers = Answers::new();
        answers.insert(form.questions[0].id, Answer::Text("Ada".into()));
        answers.insert(
            QuestionId(Uuid::from_u128(7)),
            Answer::Choices(vec!["A".into(), "B".into()]),
        );
        store.dispatch(Transition::SubmitResponse {
            form_id: form.id,
            email: "a@example.com".into(),
            answers: answers.clone(),
        });
        store.dispatch(Transition::SubmitResponse {
            form_id: shared::domain::FormId(Uuid::from_u128(99)),
            email: "ghost@example.com".into(),
            answers,
        });

        let stats = AdminStats::collect(store.state());
        assert_eq!(stats.forms[0].status, PUBLISHED);
        assert_eq!(stats.forms[0].question_count, 1);
        assert_eq!(stats.forms[0].response_count, 1);

        let known = &stats.responses[0];
        assert_eq!(known.form_title, "Survey");
        assert_eq!(known.answers[0].question, "Name?");
        assert_eq!(known.answers[0].answer, "Ada");
        assert_eq!(known.answers[1].question, UNKNOWN_QUESTION);
        assert_eq!(known.answers[1].answer, "A, B");

        let ghost = &stats.responses[1];
        assert_eq!(ghost.form_title, UNKNOWN_FORM);
        assert_eq!(ghost.answers[0].question, UNKNOWN_QUESTION);
    }
}
