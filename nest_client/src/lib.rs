//! Client-side contact form controller for the Nomadic Nest relay.
//!
//! [`FormController`] owns the form values, runs the per-field rules from
//! [`nest_core::validation`] on every edit, and performs the submit round
//! trip through a [`SubmissionApi`]. Rendering is delegated to a
//! [`FormView`].

pub mod api;
pub mod controller;
pub mod error;
pub mod messages;
pub mod terminal;
pub mod view;

pub use api::{HttpSubmissionApi, SubmissionApi, DEFAULT_API_URL};
pub use controller::{ControllerSettings, FormController, FormEvent, Phase, SubmitOutcome};
pub use error::{ClientError, Result};
pub use terminal::TerminalView;
pub use view::{FieldState, FormView, StatusMessage, Tone};
