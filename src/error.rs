//! Error types for the reporting pipeline, one enum per stage:
//! - `ConfigError`: configuration file and credential problems
//! - `FetchError`: Reddit API client errors
//! - `SummarizeError`: prompt building and Gemini API client errors
//! - `SiteError`: static site generation errors

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error opening configuration file {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Credential {0} still holds a placeholder value, replace it with a real one")]
    PlaceholderCredential(&'static str),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Reddit API error: {status} - {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Prompt template not found at {}", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Error parsing prompt template: {0}")]
    TemplateParse(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("The model returned an empty response")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Template '{}' not found at {}", .name, .path.display())]
    TemplateMissing { name: &'static str, path: PathBuf },

    #[error("Two letters map to the date {}: {} and {}", .date, .first.display(), .second.display())]
    DuplicateDate {
        date: NaiveDate,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Error rendering {}: {}", .path.display(), .reason)]
    Render { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
