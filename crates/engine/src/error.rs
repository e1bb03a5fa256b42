//! The module contains the errors a submission can surface to callers.
//!
//! Everything that reaches the user is one of:
//!
//! - [`Validation`] the draft is incomplete or inconsistent, keyed by field.
//! - [`SubmissionInFlight`] a second submit raced an unfinished one.
//! - [`InvalidDraft`] a draft precondition broke after validation passed.
//! - [`Backend`] a remote call failed and any partial work was unwound.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`SubmissionInFlight`]: EngineError::SubmissionInFlight
//!  [`InvalidDraft`]: EngineError::InvalidDraft
//!  [`Backend`]: EngineError::Backend
use thiserror::Error;

use crate::backend::BackendError;
use crate::form::FieldErrors;

/// Submission errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("a submission is already in progress")]
    SubmissionInFlight,
    #[error("invalid draft: {0}")]
    InvalidDraft(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl EngineError {
    /// Field errors carried by a [`EngineError::Validation`], if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            EngineError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
