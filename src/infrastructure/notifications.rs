use crate::domain::errors::AppError;
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_error};
use gloo::timers::callback::Timeout;
use std::cell::RefCell;
use strum::{AsRefStr, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: ToastKind::Error, message: message.into() }
    }
}

/// Transient user-facing messages shared by every page.
pub trait Notifier {
    fn notify(&self, toast: Toast) -> Result<(), AppError>;

    /// Shows an error toast; a failure to display it is only logged.
    fn notify_error(&self, error: &AppError) {
        if let Err(display_error) = self.notify(Toast::error(error.to_string())) {
            log_error!(
                LogComponent::Infrastructure("Notifier"),
                "could not show error toast ({}): {}",
                display_error,
                error
            );
        }
    }
}

/// Appends a Bootstrap-style toast to `document.body` and removes it after `duration_ms`.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
    duration_ms: u32,
}

impl ToastNotifier {
    pub fn new(duration_ms: u32) -> Self {
        Self { duration_ms }
    }

    fn background_class(kind: ToastKind) -> &'static str {
        match kind {
            ToastKind::Success => "bg-success",
            ToastKind::Error => "bg-danger",
        }
    }
}

impl Default for ToastNotifier {
    fn default() -> Self {
        Self::new(5_000)
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, toast: Toast) -> Result<(), AppError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| AppError::Browser("document not available".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| AppError::Browser("document has no body".to_string()))?;

        let element = document
            .create_element("div")
            .map_err(|_| AppError::Browser("failed to create toast element".to_string()))?;
        element.set_class_name(&format!(
            "toast show position-fixed top-0 end-0 m-3 text-white {} toast-{}",
            Self::background_class(toast.kind),
            toast.kind
        ));
        element
            .set_attribute("role", "alert")
            .map_err(|_| AppError::Browser("failed to mark toast as alert".to_string()))?;
        element.set_text_content(Some(&toast.message));
        body.append_child(&element)
            .map_err(|_| AppError::Browser("failed to attach toast".to_string()))?;

        log_debug!(LogComponent::Infrastructure("Notifier"), "{} toast: {}", toast.kind, toast.message);

        Timeout::new(self.duration_ms, move || element.remove()).forget();
        Ok(())
    }
}

/// Keeps every toast in memory instead of showing it.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    toasts: RefCell<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) -> Result<(), AppError> {
        self.toasts.borrow_mut().push(toast);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_toast_carries_display_text() {
        let notifier = RecordingNotifier::new();
        notifier.notify_error(&AppError::DataUnavailable("markets".to_string()));
        assert_eq!(notifier.toasts(), vec![Toast::error("Data Unavailable: markets")]);
    }
}
