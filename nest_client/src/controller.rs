//! Contact form controller: live validation and the submit round trip

use crate::{
    api::SubmissionApi,
    messages,
    view::{FieldState, FormView, StatusMessage, Tone},
};
use nest_core::{ContactForm, Field};
use parking_lot::Mutex;
use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tracing::{debug, info, warn};

pub const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Sending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side rules failed; nothing was sent.
    Invalid(Vec<Field>),
    Sent,
    /// The endpoint answered `success: false`.
    Rejected(Option<String>),
    /// No usable answer: connection, timeout or undecodable body.
    ServerError(String),
    /// Another submission from this controller is still outstanding.
    AlreadySending,
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ValueChanged { field: Field, value: String },
    FocusLost(Field),
    Submitted,
    PopupDismissed,
}

#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub status_clear_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            status_clear_delay: STATUS_CLEAR_DELAY,
        }
    }
}

/// Returns the controller to `Idle` when a submission ends, including when
/// the submit future is dropped mid-request.
struct InFlight<'a, V: FormView + 'static, A: SubmissionApi> {
    controller: &'a FormController<V, A>,
}

impl<V: FormView + 'static, A: SubmissionApi> Drop for InFlight<'_, V, A> {
    fn drop(&mut self) {
        let controller = self.controller;
        if controller.phase() == Phase::Sending {
            controller.view.set_busy(false);
        }
        controller.set_phase(Phase::Idle);
        controller.in_flight.store(false, Ordering::SeqCst);
    }
}

pub struct FormController<V, A> {
    view: Arc<V>,
    api: A,
    settings: ControllerSettings,
    form: Mutex<ContactForm>,
    phase: Mutex<Phase>,
    in_flight: AtomicBool,
    status_generation: Arc<AtomicU64>,
}

impl<V, A> FormController<V, A>
where
    V: FormView + 'static,
    A: SubmissionApi,
{
    pub fn new(view: Arc<V>, api: A) -> Self {
        Self::with_settings(view, api, ControllerSettings::default())
    }

    pub fn with_settings(view: Arc<V>, api: A, settings: ControllerSettings) -> Self {
        Self {
            view,
            api,
            settings,
            form: Mutex::new(ContactForm::default()),
            phase: Mutex::new(Phase::Idle),
            in_flight: AtomicBool::new(false),
            status_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn form(&self) -> ContactForm {
        self.form.lock().clone()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Routes one UI event. Only `Submitted` produces an outcome.
    pub async fn dispatch(&self, event: FormEvent) -> Option<SubmitOutcome> {
        match event {
            FormEvent::ValueChanged { field, value } => {
                self.on_input(field, value);
                None
            }
            FormEvent::FocusLost(field) => {
                self.on_blur(field);
                None
            }
            FormEvent::Submitted => Some(self.submit().await),
            FormEvent::PopupDismissed => {
                self.dismiss_popup();
                None
            }
        }
    }

    pub fn on_input(&self, field: Field, value: impl Into<String>) -> bool {
        self.form.lock().set(field, value);
        self.refresh_field(field)
    }

    pub fn on_blur(&self, field: Field) -> bool {
        let valid = self.refresh_field(field);
        self.view.announce(&messages::field_feedback(field, valid));
        valid
    }

    pub fn dismiss_popup(&self) {
        self.view.close_popup();
    }

    pub async fn submit(&self) -> SubmitOutcome {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Submit ignored, a request is already in flight");
            return SubmitOutcome::AlreadySending;
        }

        let _in_flight = InFlight { controller: self };
        self.run_submission().await
    }

    async fn run_submission(&self) -> SubmitOutcome {
        self.set_phase(Phase::Validating);
        self.clear_status();

        let form = self.form();
        let invalid = form.check_all().invalid_fields();
        for field in Field::ALL {
            let state = FieldState::from(!invalid.contains(&field));
            self.view.set_field_state(field, state);
        }

        if !invalid.is_empty() {
            debug!(?invalid, "Submit blocked by invalid fields");
            self.show_status(messages::FIX_FIELDS, Tone::Error);
            self.view.announce(messages::FORM_HAS_ERRORS);
            return SubmitOutcome::Invalid(invalid);
        }

        self.set_phase(Phase::Sending);
        self.view.set_busy(true);
        self.show_status(messages::SENDING, Tone::Info);
        self.view.announce(messages::SENDING_ANNOUNCEMENT);

        let result = self.api.send_message(&form).await;
        self.view.set_busy(false);
        self.set_phase(Phase::Idle);

        match result {
            Ok(response) if response.success => {
                info!("Contact form delivered");
                self.form.lock().clear();
                self.view.clear_inputs();
                self.view.clear_field_states();
                self.show_status(messages::SENT, Tone::Success);
                self.schedule_status_clear();
                self.view.announce(messages::SENT_ANNOUNCEMENT);
                self.view.open_popup(messages::POPUP_TEXT);
                self.view.celebrate();
                SubmitOutcome::Sent
            }
            Ok(response) => {
                warn!(error = ?response.error, "Contact endpoint refused the message");
                self.show_status(messages::REJECTED, Tone::Error);
                self.view.announce(messages::REJECTED_ANNOUNCEMENT);
                SubmitOutcome::Rejected(response.error)
            }
            Err(e) => {
                warn!("Contact endpoint unreachable: {}", e);
                self.show_status(messages::SERVER_ERROR, Tone::Error);
                self.view.announce(messages::SERVER_ERROR_ANNOUNCEMENT);
                SubmitOutcome::ServerError(e.to_string())
            }
        }
    }

    fn refresh_field(&self, field: Field) -> bool {
        let valid = self.form.lock().check_field(field);
        self.view.set_field_state(field, FieldState::from(valid));
        valid
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock() = phase;
    }

    fn show_status(&self, text: &str, tone: Tone) {
        self.status_generation.fetch_add(1, Ordering::SeqCst);
        self.view.set_status(&StatusMessage::new(text, tone));
    }

    fn clear_status(&self) {
        self.status_generation.fetch_add(1, Ordering::SeqCst);
        self.view.clear_status();
    }

    /// Clears the current status after the configured delay unless another
    /// status replaced it in the meantime.
    fn schedule_status_clear(&self) {
        let generation = self.status_generation.load(Ordering::SeqCst);
        let current = Arc::clone(&self.status_generation);
        let view = Arc::clone(&self.view);
        let delay = self.settings.status_clear_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                view.clear_status();
            }
        });
    }
}
