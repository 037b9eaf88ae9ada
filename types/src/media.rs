use url::Url;

pub const CDN_PREFIX: &str = "https://customer-2p3jflss4r4hmpnz.cloudflarestream.com/";
pub const VIDEO_SUFFIX: &str = "/manifest/video.m3u8";
pub const THUMBNAIL_SUFFIX: &str = "/thumbnails/thumbnail.jpg";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaUrlError {
    #[error("invalid video token {0:?}")]
    InvalidToken(String),
    #[error(transparent)]
    Parse(#[from] url::ParseError),
}

/// Tokens are a single path segment, anything else could escape the template
fn check_token(video_token: &str) -> Result<(), MediaUrlError> {
    let valid = !video_token.is_empty()
        && video_token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if !valid {
        return Err(MediaUrlError::InvalidToken(video_token.to_string()));
    }
    Ok(())
}

pub fn video_url(prefix: &str, video_token: &str) -> Result<Url, MediaUrlError> {
    check_token(video_token)?;
    Ok(Url::parse(&format!("{prefix}{video_token}{VIDEO_SUFFIX}"))?)
}

pub fn thumbnail_url(prefix: &str, video_token: &str) -> Result<Url, MediaUrlError> {
    check_token(video_token)?;
    Ok(Url::parse(&format!(
        "{prefix}{video_token}{THUMBNAIL_SUFFIX}"
    ))?)
}
