//! Command-line front-end for the contact form

use anyhow::Result;
use clap::Parser;
use nest_client::{
    FormController, FormEvent, HttpSubmissionApi, SubmitOutcome, TerminalView, DEFAULT_API_URL,
};
use nest_core::Field;
use std::{process::ExitCode, sync::Arc, time::Duration};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "nest-contact", version, about = "Send a message to Nomadic Nest")]
struct Cli {
    /// Base URL of the contact relay
    #[arg(long, env = "NEST_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    /// Booking type, e.g. "Tour" or "Stay"
    #[arg(long = "type")]
    booking_type: String,

    #[arg(long)]
    message: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,

    /// Print screen-reader announcements on stderr
    #[arg(long)]
    announce: bool,
}

impl Cli {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Type => &self.booking_type,
            Field::Message => &self.message,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();
    let api = HttpSubmissionApi::new(&cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    debug!(endpoint = %api.endpoint(), "Using contact endpoint");

    let controller = FormController::new(Arc::new(TerminalView::new(cli.announce)), api);

    for field in Field::ALL {
        controller
            .dispatch(FormEvent::ValueChanged {
                field,
                value: cli.value(field).to_string(),
            })
            .await;
        controller.dispatch(FormEvent::FocusLost(field)).await;
    }

    let outcome = controller.dispatch(FormEvent::Submitted).await;
    debug!(?outcome, "Submission finished");

    Ok(match outcome {
        Some(SubmitOutcome::Sent) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}
