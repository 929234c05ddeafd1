//! Toast notification queue. Timers belong to the host: it calls
//! [`ToastQueue::dismiss`] after [`DEFAULT_DURATION_MS`] and
//! [`ToastQueue::remove`] after [`EXIT_ANIMATION_MS`].

use serde::Serialize;

use crate::lifecycle::execute::TxOutcome;
use crate::types::ClassifiedError;

pub const MAX_VISIBLE: usize = 5;
pub const DEFAULT_DURATION_MS: u64 = 5000;
pub const EXIT_ANIMATION_MS: u64 = 300;

pub type ToastId = u64;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: ToastId,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub title: String,
    pub message: String,
    pub is_exiting: bool,
}

/// Ordered oldest first. Ids are issued by the queue and never reused.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Appends a toast. When the queue already holds [`MAX_VISIBLE`]
    /// entries the oldest live one starts exiting.
    pub fn show(
        &mut self,
        kind: ToastKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;

        if self.toasts.len() >= MAX_VISIBLE
            && let Some(oldest) = self.toasts.iter_mut().find(|t| !t.is_exiting)
        {
            tracing::debug!(evicted = oldest.id, "toast limit reached");
            oldest.is_exiting = true;
        }

        self.toasts.push(Toast {
            id,
            kind,
            title: title.into(),
            message: message.into(),
            is_exiting: false,
        });
        id
    }

    pub fn show_classified(&mut self, error: &ClassifiedError) -> ToastId {
        self.show(ToastKind::Error, error.title.clone(), error.message.clone())
    }

    /// Success toast for a confirmed transaction, error toast otherwise.
    pub fn show_outcome<R>(&mut self, outcome: &TxOutcome<R>, success_message: &str) -> ToastId {
        match outcome {
            TxOutcome::Confirmed { .. } => {
                self.show(ToastKind::Success, "Success", success_message)
            }
            TxOutcome::Failed { error, .. } => self.show_classified(error),
        }
    }

    /// Starts the exit animation. Returns false for unknown ids.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.is_exiting = true;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ToastId) -> Option<Toast> {
        let index = self.toasts.iter().position(|t| t.id == id)?;
        Some(self.toasts.remove(index))
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
