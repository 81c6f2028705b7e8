//! Content-type inference for url and file submissions.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::ContentType;

/// Hosts whose links are treated as video regardless of path.
const VIDEO_HOSTS: &[&str] = &["tiktok.com", "twitter.com", "youtube.com", "instagram.com"];

static IMAGE_EXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").expect("valid regex"));
static VIDEO_EXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(mp4|mov|avi|webm)$").expect("valid regex"));

/// Infer the media class of a remote url. Defaults to image.
pub fn content_type_for_url(url: &str) -> ContentType {
    let (host, path) = match reqwest::Url::parse(url.trim()) {
        Ok(parsed) => (
            parsed.host_str().map(|h| h.to_ascii_lowercase()),
            parsed.path().to_string(),
        ),
        Err(_) => (None, strip_query(url).to_string()),
    };

    if let Some(host) = host {
        if VIDEO_HOSTS.iter().any(|known| host == *known || host.ends_with(&format!(".{}", known))) {
            return ContentType::Video;
        }
    }

    if IMAGE_EXT.is_match(&path) {
        ContentType::Image
    } else if VIDEO_EXT.is_match(&path) {
        ContentType::Video
    } else {
        ContentType::Image
    }
}

/// Infer the media class of a local file from its MIME type. Defaults to image.
pub fn content_type_for_path(path: &Path) -> ContentType {
    match mime_for_path(path) {
        Some(mime) if mime.starts_with("video/") => ContentType::Video,
        _ => ContentType::Image,
    }
}

/// MIME type implied by a file's extension, if it is a known image or video type.
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => return None,
    };
    Some(mime)
}

fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}
