//! Error handling for the planilla CLI

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for planilla CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Parsing error in {file}: {message}")]
    Parse { file: String, message: String },

    #[error("Export failed: {failed} of {total} file(s) could not be written")]
    Export { failed: usize, total: usize },

    #[error("Refusing to overwrite existing file: {path}")]
    AlreadyExists { path: PathBuf },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }

    pub fn parse<S: Into<String>>(file: S, message: S) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    pub fn export(failed: usize, total: usize) -> Self {
        Self::Export { failed, total }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        Self::config(format!("TOML serialization error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Use 'planilla init' to write a starting lineup file",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Lineup files must end in .toml or .json\n\
                 • Export formats are png, pdf, svg or all",
            );
        }

        CliError::Parse { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Compare your file with the output of 'planilla init'\n\
                 • Formations are written as \"4-4-2\", roles as ARQ, DEF, MED or DEL",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your planilla.toml configuration file\n\
                 • Use 'planilla config --example' to generate a sample configuration",
            );
        }

        CliError::Export { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Run with -v to see why the capture or the write failed\n\
                 • Check that the [branding] emblem path points to a readable PNG, JPEG or SVG",
            );
        }

        CliError::AlreadyExists { .. } => {
            message.push_str("\n\nSuggestions:\n• Pass --force to overwrite it, or choose another path with --out");
        }

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("lineup.toml"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("planilla init"));
    }

    #[test]
    fn test_export_error_message() {
        assert_eq!(
            CliError::export(1, 2).to_string(),
            "Export failed: 1 of 2 file(s) could not be written"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }
}
