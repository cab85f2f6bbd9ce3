use thiserror::Error;

use crate::source::error::SourceError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid video ID: {0}")]
    InvalidVideoId(String),
}

/// 选流失败的原因，最终都会被打印并转成 `false`
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("Quality {quality} is not available. Use --list to see the available qualities.")]
    QualityNotFound { quality: String },

    #[error("No downloadable video stream found. Use --list to see the available qualities.")]
    NoVideoStream,

    #[error("No audio stream found for this video.")]
    NoAudioStream,

    #[error("{0}")]
    Source(SourceError),
}

impl From<ParseError> for SelectionError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::InvalidUrl(input) | ParseError::InvalidVideoId(input) => {
                SelectionError::InvalidUrl(input)
            }
        }
    }
}

impl From<SourceError> for SelectionError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::InvalidUrl(msg) => SelectionError::InvalidUrl(msg),
            SourceError::VideoUnavailable(msg) => SelectionError::VideoUnavailable(msg),
            other => SelectionError::Source(other),
        }
    }
}
