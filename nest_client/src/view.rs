//! Presentation seam between the form controller and whatever renders it

use nest_core::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Invalid,
}

impl From<bool> for FieldState {
    fn from(valid: bool) -> Self {
        if valid {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Everything the controller may change on screen. Implementations own
/// their UI handles; the controller never touches them directly.
pub trait FormView: Send + Sync {
    fn set_field_state(&self, field: Field, state: FieldState);

    fn clear_field_states(&self);

    /// Empties every input after a successful send.
    fn clear_inputs(&self);

    fn set_status(&self, status: &StatusMessage);

    fn clear_status(&self);

    /// Screen-reader announcement.
    fn announce(&self, text: &str);

    /// Disables the submit control while a request is outstanding.
    fn set_busy(&self, busy: bool);

    fn open_popup(&self, text: &str);

    fn close_popup(&self);

    fn celebrate(&self);
}
