//! User-visible outcome notices
//!
//! Each create/update/delete answers with exactly one notice. Failures carry
//! theirs inside [`crate::error::ApiError`]; successes use [`Outcome`].

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Successful lifecycle response body
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub notice: Notice,
    /// Id of the record created, updated or deleted
    pub id: i64,
}

impl Outcome {
    pub fn success(id: i64, message: impl Into<String>) -> Self {
        Self {
            notice: Notice::success(message),
            id,
        }
    }
}
