//! UI/backend events and error modeling for the playback window.

use shared::{
    error::{ErrorCode, HanoiError},
    protocol::SessionEvent,
};

pub enum UiEvent {
    Info(String),
    Session(SessionEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Defect,
    Backend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    StartPlayback,
    SetPacing,
    Playback,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid")
            || message_lower.contains("outside")
            || message_lower.contains("valid number")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("empty rod")
            || message_lower.contains("invariant")
            || message_lower.contains("faulted")
        {
            UiErrorCategory::Defect
        } else {
            UiErrorCategory::Backend
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_hanoi(context: UiErrorContext, err: &HanoiError) -> Self {
        Self::from_code(context, err.code(), err.to_string())
    }

    pub fn from_code(context: UiErrorContext, code: ErrorCode, message: impl Into<String>) -> Self {
        let category = match code {
            ErrorCode::InvalidArgument => UiErrorCategory::Validation,
            ErrorCode::EmptyRod | ErrorCode::InvariantViolation => UiErrorCategory::Defect,
        };
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> &'static str {
        match self.category {
            UiErrorCategory::Validation => "Invalid input",
            UiErrorCategory::Defect => "Playback defect",
            UiErrorCategory::Backend => "Backend",
        }
    }
}
