use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Server error (status {status}, code {code}): {message}")]
    Server {
        status: u16,
        code: i64,
        message: String,
    },

    #[error("Missing parameter: {field}")]
    MissingParameter { field: String },

    #[error("Invalid parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Runtime error: {message}")]
    Runtime { message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Server,
    Parameter,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ClientError {
    pub fn server(status: u16, code: i64, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::MissingParameter {
            field: field.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Http(_) => ErrorCategory::Network,
            Self::Server { .. } => ErrorCategory::Server,
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => {
                ErrorCategory::Parameter
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidUrl(_) => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::Csv(_) => ErrorCategory::Data,
            Self::Io(_) | Self::Runtime { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Http(e) if e.is_timeout() || e.is_connect() => ErrorSeverity::Medium,
            Self::Server { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            Self::Http(_) | Self::Server { .. } => ErrorSeverity::High,
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => ErrorSeverity::High,
            Self::Serialization(_) | Self::Csv(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidUrl(_) => ErrorSeverity::Critical,
            Self::Io(_) | Self::Runtime { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check that the server is reachable and retry",
            ErrorCategory::Server => {
                "Check the service URL, dataset names and credentials against the server"
            }
            ErrorCategory::Parameter => "Review the request parameters",
            ErrorCategory::Configuration => "Fix the configuration file or command line arguments",
            ErrorCategory::Data => "The server response or output could not be converted",
            ErrorCategory::System => "Check the local environment",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Server { message, .. } if !message.is_empty() => {
                format!("The server rejected the request: {}", message)
            }
            Self::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            Self::Http(e) if e.is_connect() => "Could not connect to the server".to_string(),
            other => other.to_string(),
        }
    }
}
