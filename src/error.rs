//! Error types for distance computation
//!
//! Only two things can go wrong: the input is not legitimate text, or the
//! working memory for the computation could not be obtained.

use thiserror::Error;

/// Errors that can occur while computing an edit distance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    /// Argument is not well-formed text, or breaks a configured limit.
    /// Raised before any matrix is built.
    #[error("Invalid text: {reason}")]
    Validation { reason: String },

    /// Working memory could not be allocated
    #[error("Could not allocate {requested} cells for {what}")]
    Resource { what: &'static str, requested: usize },
}

impl DistanceError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn resource(what: &'static str, requested: usize) -> Self {
        Self::Resource { what, requested }
    }

    /// Map a failed reservation onto a resource error.
    pub(crate) fn from_reserve<E>(what: &'static str, requested: usize) -> impl FnOnce(E) -> Self {
        move |_| Self::resource(what, requested)
    }

    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    #[must_use]
    pub fn is_resource(&self) -> bool {
        matches!(self, Self::Resource { .. })
    }
}

pub type Result<T> = std::result::Result<T, DistanceError>;
