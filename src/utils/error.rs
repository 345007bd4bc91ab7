use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowcallError {
    #[error("Malformed {field} entry '{entry}': expected key:value")]
    ConfigFormatError { field: String, entry: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid JSON body in {context}: {source}")]
    BodyParseError {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Body in {context} must be a JSON object")]
    BodyShapeError { context: String },

    #[error("Cannot access {path}: {message}")]
    FileAccessError { path: String, message: String },

    #[error("Row {row} has no column {column}")]
    RowShapeError { row: usize, column: usize },

    #[error("HTTP request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Cannot build request: {message}")]
    RequestBuildError { message: String },

    #[error("Cannot write output row: {message}")]
    WriteError { message: String },

    #[error("TOML configuration error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl RowcallError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigFormatError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::BodyParseError { .. }
            | Self::BodyShapeError { .. }
            | Self::FileAccessError { .. }
            | Self::RowShapeError { .. } => ErrorCategory::Input,
            Self::NetworkError(_) | Self::RequestBuildError { .. } => ErrorCategory::Network,
            Self::WriteError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Network | ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Input => 2,
            ErrorCategory::Network => 3,
            ErrorCategory::Output => 4,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ConfigFormatError { field, entry } => {
                format!("The {} value '{}' is missing a ':' separator", field, entry)
            }
            Self::BodyParseError { context, .. } => {
                format!("The request body from {} is not valid JSON", context)
            }
            Self::BodyShapeError { context } => {
                format!("The request body from {} is not a JSON object", context)
            }
            Self::RowShapeError { row, column } => {
                format!("Input row {} is shorter than the header (column {})", row, column)
            }
            Self::NetworkError(e) if e.is_connect() => {
                "Could not connect to the target service".to_string()
            }
            Self::NetworkError(e) if e.is_timeout() => "The request timed out".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ConfigFormatError { .. } => "Pass headers and params as name:value",
            Self::InvalidConfigValueError { .. } | Self::MissingConfigError { .. } => {
                "Check the command-line flags and the --config file"
            }
            Self::TomlError(_) => "Make sure the config file is valid TOML",
            Self::BodyParseError { .. } | Self::BodyShapeError { .. } => {
                "Provide the body as a JSON object, e.g. {\"key\":\"value\"}"
            }
            Self::FileAccessError { .. } => "Check that the input file exists and is readable",
            Self::RowShapeError { .. } => "Every row must have as many fields as the header",
            Self::NetworkError(_) | Self::RequestBuildError { .. } => {
                "Check the URL, method and that the service is reachable"
            }
            Self::WriteError { .. } => "Check free disk space and permissions on the output file",
        }
    }
}

pub type Result<T> = std::result::Result<T, RowcallError>;
