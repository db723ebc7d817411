//! Line-oriented rendering of the form for the command-line front-end

use crate::view::{FieldState, FormView, StatusMessage, Tone};
use nest_core::Field;
use parking_lot::Mutex;
use std::collections::HashMap;

const CONFETTI: &str = "* . o ~ * . o ~ * . o ~ * . o ~ *";

#[derive(Debug, Default)]
pub struct TerminalView {
    /// Echo screen-reader announcements on stderr.
    pub announcements: bool,
    shown: Mutex<HashMap<Field, FieldState>>,
}

impl TerminalView {
    pub fn new(announcements: bool) -> Self {
        Self {
            announcements,
            ..Default::default()
        }
    }

    /// Stores the new state and reports whether it differs from the last one.
    fn transition(&self, field: Field, state: FieldState) -> bool {
        self.shown.lock().insert(field, state) != Some(state)
    }
}

impl FormView for TerminalView {
    fn set_field_state(&self, field: Field, state: FieldState) {
        if self.transition(field, state) && state == FieldState::Invalid {
            println!("  ✗ {}", field);
        }
    }

    fn clear_field_states(&self) {
        self.shown.lock().clear();
    }

    fn clear_inputs(&self) {}

    fn set_status(&self, status: &StatusMessage) {
        match status.tone {
            Tone::Info => println!("{}", status.text),
            Tone::Success => println!("✓ {}", status.text),
            Tone::Error => eprintln!("error: {}", status.text),
        }
    }

    fn clear_status(&self) {}

    fn announce(&self, text: &str) {
        if self.announcements {
            eprintln!("[announce] {}", text);
        }
    }

    fn set_busy(&self, _busy: bool) {}

    fn open_popup(&self, text: &str) {
        println!();
        println!("  {}", text);
        println!();
    }

    fn close_popup(&self) {}

    fn celebrate(&self) {
        println!("{}", CONFETTI);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_state_is_not_a_transition() {
        let view = TerminalView::new(false);

        assert!(view.transition(Field::Name, FieldState::Invalid));
        assert!(!view.transition(Field::Name, FieldState::Invalid));
        assert!(view.transition(Field::Name, FieldState::Valid));
        assert!(view.transition(Field::Email, FieldState::Invalid));

        view.clear_field_states();
        assert!(view.transition(Field::Name, FieldState::Valid));
    }
}
