//! Uniform JSON response wrapper.
//!
//! Every endpoint answers with
//! `{status, message, isSuccess, pagination?, data}`; failures carry
//! `data: null`.

use serde::Serialize;

use shopline_core::PageMeta;

/// Outcome label shown in the `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Failed,
}

/// Response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub status: Status,
    pub message: String,
    pub is_success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageMeta>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            is_success: true,
            pagination: None,
            data: Some(data),
        }
    }

    /// Successful response with `data: null`.
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            is_success: true,
            pagination: None,
            data: None,
        }
    }

    /// Failed response; `data` is always null.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: Status::Failed,
            message: message.into(),
            is_success: false,
            pagination: None,
            data: None,
        }
    }

    /// Attach listing metadata.
    #[must_use]
    pub fn with_pagination(mut self, pagination: PageMeta) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
