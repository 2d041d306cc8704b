use indexmap::IndexMap;
use shared::domain::{Answer, Answers, Form, FormId, QuestionId, QuestionKind, NO, YES};

use crate::validation::ValidationError;

/// Answers a respondent is filling in for one form, before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSheet {
    form_id: FormId,
    questions: IndexMap<QuestionId, (String, QuestionKind)>,
    answers: Answers,
}

impl AnswerSheet {
    /// Blank text for text questions, an empty selection for multiple choice.
    pub fn for_form(form: &Form) -> Self {
        let mut questions = IndexMap::with_capacity(form.questions.len());
        let mut answers = Answers::with_capacity(form.questions.len());
        for question in &form.questions {
            let blank = match question.kind {
                QuestionKind::MultipleChoice { .. } => Answer::Choices(Vec::new()),
                _ => Answer::Text(String::new()),
            };
            answers.insert(question.id, blank);
            questions.insert(question.id, (question.text.clone(), question.kind.clone()));
        }
        Self {
            form_id: form.id,
            questions,
            answers,
        }
    }

    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn into_answers(self) -> Answers {
        self.answers
    }

    pub fn set_text(
        &mut self,
        question_id: QuestionId,
        text: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let text = text.into();
        let (question, kind) = self.question(question_id)?;
        match kind {
            QuestionKind::ShortAnswer => {}
            QuestionKind::YesNo if text == YES || text == NO => {}
            _ => {
                return Err(ValidationError::AnswerMismatch {
                    question: question.clone(),
                    answer: text,
                })
            }
        }
        self.answers.insert(question_id, Answer::Text(text));
        Ok(())
    }

    pub fn set_yes_no(&mut self, question_id: QuestionId, yes: bool) -> Result<(), ValidationError> {
        self.set_text(question_id, if yes { YES } else { NO })
    }

    /// Selects the option if it is not selected yet, otherwise deselects it.
    /// Selections keep the order in which they were made.
    pub fn toggle_choice(
        &mut self,
        question_id: QuestionId,
        option: &str,
    ) -> Result<(), ValidationError> {
        let (question, kind) = self.question(question_id)?;
        let offered = match kind {
            QuestionKind::MultipleChoice { options } => options.iter().any(|o| o == option),
            _ => false,
        };
        if !offered {
            return Err(ValidationError::AnswerMismatch {
                question: question.clone(),
                answer: option.to_string(),
            });
        }

        let entry = self
            .answers
            .entry(question_id)
            .or_insert_with(|| Answer::Choices(Vec::new()));
        if let Answer::Choices(selected) = entry {
            if let Some(index) = selected.iter().position(|s| s == option) {
                selected.remove(index);
            } else {
                selected.push(option.to_string());
            }
        }
        Ok(())
    }

    /// Question text paired with the rendered answer, for the review step.
    pub fn review(&self) -> Vec<(String, String)> {
        self.questions
            .iter()
            .map(|(id, (text, _))| {
                let rendered = match self.answers.get(id) {
                    Some(answer) if !answer.is_blank() => answer.to_string(),
                    _ => "No answer".to_string(),
                };
                (text.clone(), rendered)
            })
            .collect()
    }

    fn question(&self, question_id: QuestionId) -> Result<&(String, QuestionKind), ValidationError> {
        self.questions
            .get(&question_id)
            .ok_or(ValidationError::UnknownQuestion(question_id))
    }
}
