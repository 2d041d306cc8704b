use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(FormId);
id_newtype!(QuestionId);
id_newtype!(ResponseId);

pub const YES: &str = "Yes";
pub const NO: &str = "No";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuestionKind {
    #[serde(rename = "short")]
    ShortAnswer,
    #[serde(rename = "yesno")]
    YesNo,
    #[serde(rename = "multiple")]
    MultipleChoice { options: Vec<String> },
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShortAnswer => "Short Answer",
            Self::YesNo => "Yes/No",
            Self::MultipleChoice { .. } => "Multiple Choice",
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, Self::MultipleChoice { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    #[serde(flatten)]
    pub kind: QuestionKind,
    pub text: String,
    pub required: bool,
}

impl Question {
    /// Options offered by a multiple-choice question; empty for every other kind.
    pub fn options(&self) -> &[String] {
        match &self.kind {
            QuestionKind::MultipleChoice { options } => options,
            _ => &[],
        }
    }
}

/// The form currently being authored. `id` stays `None` until the first save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormDraft {
    pub id: Option<FormId>,
    pub title: String,
    pub questions: Vec<Question>,
    pub is_published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FormDraft {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.title.is_empty() && self.questions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    pub questions: Vec<Question>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

impl Form {
    pub fn question(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

impl From<Form> for FormDraft {
    fn from(form: Form) -> Self {
        Self {
            id: Some(form.id),
            title: form.title,
            questions: form.questions,
            is_published: form.is_published,
            created_at: Some(form.created_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Choices(Vec<String>),
}

impl Answer {
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choices(choices) => choices.is_empty(),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Choices(choices) => f.write_str(&choices.join(", ")),
        }
    }
}

pub type Answers = IndexMap<QuestionId, Answer>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: ResponseId,
    pub form_id: FormId,
    pub email: String,
    pub answers: Answers,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_serializes_kind_inline() {
        let question = Question {
            id: QuestionId(Uuid::nil()),
            kind: QuestionKind::MultipleChoice {
                options: vec!["A".into(), "B".into()],
            },
            text: "Pick".into(),
            required: true,
        };
        let value = serde_json::to_value(&question).expect("serialize");
        assert_eq!(value["type"], "multiple");
        assert_eq!(value["options"], serde_json::json!(["A", "B"]));
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");

        let decoded: Question = serde_json::from_value(value).expect("decode");
        assert_eq!(decoded, question);
        assert_eq!(decoded.options(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn question_kinds_use_short_yesno_and_multiple_tags() {
        let tags: Vec<String> = [
            QuestionKind::ShortAnswer,
            QuestionKind::YesNo,
            QuestionKind::MultipleChoice { options: vec![] },
        ]
        .iter()
        .map(|kind| serde_json::to_value(kind).expect("serialize")["type"].to_string())
        .collect();
        assert_eq!(tags, [r#""short""#, r#""yesno""#, r#""multiple""#]);

        let decoded: QuestionKind =
            serde_json::from_str(r#"{"type":"yesno"}"#).expect("yesno tag");
        assert_eq!(decoded, QuestionKind::YesNo);
        assert!(serde_json::from_str::<QuestionKind>(r#"{"type":"yes_no"}"#).is_err());
    }

    #[test]
    fn answers_decode_by_shape() {
        let text: Answer = serde_json::from_str(r#""Yes""#).expect("text");
        assert_eq!(text, Answer::Text(YES.into()));
        let choices: Answer = serde_json::from_str(r#"["A","B"]"#).expect("choices");
        assert_eq!(choices.to_string(), "A, B");
        assert!(Answer::Text("  ".into()).is_blank());
        assert!(Answer::Choices(vec![]).is_blank());
    }

    #[test]
    fn loading_a_form_keeps_identity_and_creation_time() {
        let created_at = "2024-05-01T09:00:00Z".parse().expect("timestamp");
        let form = Form {
            id: FormId(Uuid::from_u128(5)),
            title: "Survey".into(),
            questions: Vec::new(),
            is_published: true,
            created_at,
        };
        let draft = FormDraft::from(form);
        assert_eq!(draft.id, Some(FormId(Uuid::from_u128(5))));
        assert_eq!(draft.created_at, Some(created_at));
        assert!(draft.is_published);
        assert!(!draft.is_empty());
    }

    #[test]
    fn ids_parse_from_display() {
        let id = ResponseId(Uuid::from_u128(0xabc));
        assert_eq!(id.to_string().parse::<ResponseId>().expect("parse"), id);
    }
}
