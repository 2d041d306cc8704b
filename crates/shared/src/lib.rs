//! Data model, transition vocabulary and error types shared by the form store
//! and its callers.

pub mod domain;
pub mod error;
pub mod protocol;
