use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
}

#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct ApiException {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiException {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("form address must look like userform/<form id>, got '{0}'")]
    Malformed(String),
    #[error("invalid form id '{raw}': {source}")]
    InvalidFormId {
        raw: String,
        #[source]
        source: uuid::Error,
    },
}

impl From<AddressError> for ApiException {
    fn from(value: AddressError) -> Self {
        Self::new(ErrorCode::Validation, value.to_string())
    }
}
