use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Unable to read input file {path}: {source}")]
    SourceOpenError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row in {path}: {source}")]
    MalformedRowError {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Unable to write report {path}: {source}")]
    SinkWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::SourceOpenError { .. } | EtlError::MalformedRowError { .. } => {
                ErrorCategory::Input
            }
            EtlError::SinkWriteError { .. } => ErrorCategory::Output,
            EtlError::CsvError(_) | EtlError::ProcessingError { .. } => ErrorCategory::Processing,
            EtlError::IoError(_) => ErrorCategory::System,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Nothing in a grade run is retried, so every error is at least `High`.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System | ErrorCategory::Output => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::SourceOpenError { path, .. } => {
                format!("Check that '{}' exists and is readable", path)
            }
            EtlError::MalformedRowError { path, .. } => format!(
                "Fix '{}': it needs the headers matricula,nome,materia,nota,trimestre and a numeric nota on every row",
                path
            ),
            EtlError::SinkWriteError { path, .. } => {
                format!("Check that the directory of '{}' is writable", path)
            }
            EtlError::CsvError(_) => "Inspect the report data for unencodable values".to_string(),
            EtlError::IoError(_) => "Check file permissions and free disk space".to_string(),
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. } => {
                format!("Correct the '{}' setting and run again", field)
            }
            EtlError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Could not load grade records. {}", self),
            ErrorCategory::Output => format!("Could not write the reports. {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration. {}", self),
            ErrorCategory::Processing => format!("Grade processing failed. {}", self),
            ErrorCategory::System => format!("System error. {}", self),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
