use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use config::builder::DefaultState;
use http::{HeaderValue, Method};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ADMIN_ADDRESS: &str = "nomadicnestkodai@gmail.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serves the plain-text liveness banner on `GET /`.
    pub liveness_route: bool,
    pub shutdown_timeout_seconds: u64,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub admin_address: String,
    pub admin_sender_name: String,
    pub confirmation_sender_name: String,
    pub timeout_seconds: u64,
    /// Record messages in memory and log them instead of talking to SMTP.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub max_age_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            liveness_route: true,
            shutdown_timeout_seconds: 10,
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            username: String::new(),
            password: String::new(),
            admin_address: DEFAULT_ADMIN_ADDRESS.to_string(),
            admin_sender_name: "Nomadic Nest Contact".to_string(),
            confirmation_sender_name: "Nomadic Nest".to_string(),
            timeout_seconds: 30,
            dry_run: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://127.0.0.1:5500".to_string(),
                "http://localhost:5500".to_string(),
                "https://nomadicnest.netlify.app".to_string(),
            ],
            allowed_methods: vec!["GET".to_string(), "POST".to_string()],
            max_age_seconds: 3600,
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("admin_address", &self.admin_address)
            .field("admin_sender_name", &self.admin_sender_name)
            .field("confirmation_sender_name", &self.confirmation_sender_name)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl MailConfig {
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }

    /// The authenticated account doubles as the sender address; without one
    /// the admin inbox is used so local relays still get a valid `From`.
    pub fn sender_address(&self) -> &str {
        if self.username.is_empty() {
            &self.admin_address
        } else {
            &self.username
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let file = Path::new("config.toml");
        Self::load_from(file.exists().then_some(file))
    }

    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(app_environment(None));

        builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.mail.smtp_host.is_empty() {
            return Err(ConfigError::Message("SMTP host cannot be empty".to_string()));
        }

        if self.mail.admin_address.parse::<lettre::Address>().is_err() {
            return Err(ConfigError::Message(format!(
                "Admin address is not a valid email address: {}",
                self.mail.admin_address
            )));
        }

        if !self.mail.username.is_empty() && self.mail.username.parse::<lettre::Address>().is_err() {
            return Err(ConfigError::Message(format!(
                "Mail username must be the sending email address, got: {}",
                self.mail.username
            )));
        }

        if !self.mail.has_credentials() && !self.mail.dry_run {
            tracing::warn!("Mail credentials not set - using an unauthenticated SMTP connection");
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Message(
                "At least one allowed origin is required".to_string(),
            ));
        }

        for origin in &self.cors.allowed_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Message(format!("Invalid allowed origin: {}", origin)));
            }
        }

        for method in &self.cors.allowed_methods {
            if method.parse::<Method>().is_err() {
                return Err(ConfigError::Message(format!("Invalid allowed method: {}", method)));
            }
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `APP_*` variables, e.g. `APP_MAIL__SMTP_HOST` or a comma separated
/// `APP_CORS__ALLOWED_ORIGINS`. `source` replaces the process environment.
fn app_environment(source: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .with_list_parse_key("cors.allowed_methods")
        .source(source)
}

/// Plain variables used by existing deployments: `PORT`, `EMAIL_USER`
/// and `EMAIL_PASS`. They win over every other source.
fn apply_legacy_env<F>(
    builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    builder
        .set_override_option("server.port", lookup("PORT"))?
        .set_override_option("mail.username", lookup("EMAIL_USER"))?
        .set_override_option("mail.password", lookup("EMAIL_PASS"))
}
