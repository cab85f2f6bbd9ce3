use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    #[error("找不到视频解析工具: {0}")]
    ToolNotFound(String),

    #[error("视频信息提取失败: {0}")]
    Extraction(String),

    #[error("响应解析失败: {0}")]
    InvalidResponse(String),

    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("下载失败: HTTP {0}")]
    HttpStatus(u16),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidResponse(e.to_string())
    }
}

impl SourceError {
    /// 根据 yt-dlp 的 stderr 判断错误类型
    pub fn from_extractor_stderr(stderr: &str) -> Self {
        let message = stderr
            .lines()
            .map(str::trim)
            .find(|line| line.starts_with("ERROR:"))
            .unwrap_or_else(|| stderr.trim())
            .trim_start_matches("ERROR:")
            .trim()
            .to_string();
        let lower = message.to_lowercase();

        const INVALID_MARKERS: &[&str] = &[
            "is not a valid url",
            "unsupported url",
            "incomplete youtube id",
            "invalid url",
        ];
        const UNAVAILABLE_MARKERS: &[&str] = &[
            "video unavailable",
            "private video",
            "this video is not available",
            "has been removed",
            "sign in to confirm your age",
            "members-only",
            "not made this video available in your country",
        ];

        if INVALID_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::InvalidUrl(message)
        } else if UNAVAILABLE_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::VideoUnavailable(message)
        } else {
            Self::Extraction(message)
        }
    }
}
