use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::CredisourceError;

/// Minimum number of characters accepted for a text submission.
pub const MIN_TEXT_CHARS: usize = 300;

/// Media class a url or file submission is verified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = CredisourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(CredisourceError::Validation(format!("Unknown content type: {}", other))),
        }
    }
}

/// Kind tag of a [`VerificationRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Text,
    Url,
    File,
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Url => write!(f, "url"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A piece of content the user wants verified.
///
/// Url and file submissions carry the media class they will be verified as;
/// the constructors infer it, and `with_content_type` overrides it.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationRequest {
    Text { text: String },
    Url { url: String, content_type: ContentType },
    File { path: PathBuf, content_type: ContentType },
}

impl VerificationRequest {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        let url = url.into();
        let content_type = crate::client::detect::content_type_for_url(&url);
        Self::Url { url, content_type }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let content_type = crate::client::detect::content_type_for_path(&path);
        Self::File { path, content_type }
    }

    /// Force the media class of a url or file submission. Text stays text.
    pub fn with_content_type(self, forced: ContentType) -> Self {
        match self {
            Self::Url { url, .. } if forced != ContentType::Text => Self::Url { url, content_type: forced },
            Self::File { path, .. } if forced != ContentType::Text => Self::File { path, content_type: forced },
            other => other,
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Text { .. } => RequestKind::Text,
            Self::Url { .. } => RequestKind::Url,
            Self::File { .. } => RequestKind::File,
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Text { .. } => ContentType::Text,
            Self::Url { content_type, .. } | Self::File { content_type, .. } => *content_type,
        }
    }

    /// Client-side checks that must pass before anything goes over the wire.
    pub fn validate(&self) -> Result<(), CredisourceError> {
        match self {
            Self::Text { text } => validate_text(text),
            Self::Url { url, .. } => validate_url(url),
            Self::File { path, .. } => validate_file(path),
        }
    }
}

fn validate_text(text: &str) -> Result<(), CredisourceError> {
    let count = text.chars().count();
    if count < MIN_TEXT_CHARS {
        return Err(CredisourceError::Validation(format!(
            "Text must be at least {} characters ({} provided)",
            MIN_TEXT_CHARS, count
        )));
    }
    Ok(())
}

fn validate_url(url: &str) -> Result<(), CredisourceError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(CredisourceError::Validation("URL must not be empty".into()));
    }
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| CredisourceError::Validation(format!("Invalid URL '{}': {}", trimmed, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(CredisourceError::Validation(format!(
            "Unsupported URL scheme '{}': only http and https are accepted",
            other
        ))),
    }
}

fn validate_file(path: &Path) -> Result<(), CredisourceError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        CredisourceError::Validation(format!("Cannot read file {}: {}", path.display(), e))
    })?;
    if !metadata.is_file() {
        return Err(CredisourceError::Validation(format!("{} is not a regular file", path.display())));
    }
    if metadata.len() == 0 {
        return Err(CredisourceError::Validation(format!("{} is empty", path.display())));
    }
    Ok(())
}
