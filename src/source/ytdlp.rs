use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info};

use super::error::SourceError;
use super::transfer::download_stream;
use super::VideoStreamSource;
use crate::downloader::progress::TransferHooks;
use crate::parser::models::{StreamDescriptor, VideoCatalog, VideoLocator};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

const COMMON_PATHS: &[&str] = &[
    "/opt/homebrew/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/usr/bin/yt-dlp",
];

#[derive(Debug, Clone)]
pub struct YtDlpConfig {
    /// yt-dlp 可执行文件路径
    pub binary: String,
    /// 网络超时（秒）
    pub socket_timeout: u32,
}

impl Default for YtDlpConfig {
    fn default() -> Self {
        Self {
            binary: find_ytdlp(),
            socket_timeout: 30,
        }
    }
}

impl YtDlpConfig {
    pub fn with_binary(mut self, binary: Option<String>) -> Self {
        if let Some(binary) = binary {
            self.binary = binary;
        }
        self
    }

    pub fn with_socket_timeout(mut self, seconds: u32) -> Self {
        self.socket_timeout = seconds;
        self
    }
}

/// 依次检查常见安装位置，找不到就交给 PATH
fn find_ytdlp() -> String {
    COMMON_PATHS
        .iter()
        .find(|path| Path::new(path).exists())
        .map(|path| path.to_string())
        .unwrap_or_else(|| "yt-dlp".to_string())
}

// yt-dlp --dump-json 输出中用到的字段
#[derive(Debug, Deserialize)]
struct RawVideoInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    formats: Vec<RawFormat>,
}

#[derive(Debug, Deserialize)]
struct RawFormat {
    #[serde(default)]
    format_id: String,
    #[serde(default)]
    ext: String,
    vcodec: Option<String>,
    acodec: Option<String>,
    height: Option<u32>,
    fps: Option<f64>,
    abr: Option<f64>,
    filesize: Option<u64>,
    filesize_approx: Option<u64>,
    url: Option<String>,
    protocol: Option<String>,
    #[serde(default)]
    http_headers: BTreeMap<String, String>,
}

fn has_codec(codec: Option<&str>, fallback: bool) -> bool {
    match codec {
        Some("none") => false,
        Some(_) => true,
        None => fallback,
    }
}

impl RawFormat {
    /// 只保留可以直接 HTTP 下载的音视频流
    fn into_descriptor(self) -> Option<StreamDescriptor> {
        let url = self.url?;
        if !matches!(self.protocol.as_deref(), None | Some("http") | Some("https")) {
            return None;
        }

        let has_video = has_codec(self.vcodec.as_deref(), self.height.is_some());
        let has_audio = has_codec(self.acodec.as_deref(), self.abr.is_some());
        if !has_video && !has_audio {
            return None;
        }

        let container = match self.ext.as_str() {
            "m4a" | "mp4" => "mp4",
            "3gp" => "3gpp",
            other => other,
        };
        let kind = if has_video { "video" } else { "audio" };

        Some(StreamDescriptor {
            itag: self.format_id,
            mime_type: format!("{}/{}", kind, container),
            resolution: if has_video {
                self.height.map(|h| format!("{}p", h))
            } else {
                None
            },
            abr: self.abr.map(|abr| abr as f32),
            fps: self.fps.map(|fps| fps.round() as u32),
            filesize: self.filesize.or(self.filesize_approx),
            progressive: has_video && has_audio,
            has_video,
            has_audio,
            url,
            http_headers: self.http_headers,
        })
    }
}

/// 解析 yt-dlp 的 JSON 输出
pub fn parse_catalog(json: &[u8]) -> Result<VideoCatalog, SourceError> {
    let info: RawVideoInfo = serde_json::from_slice(json)?;
    let streams = info
        .formats
        .into_iter()
        .filter_map(RawFormat::into_descriptor)
        .collect();

    Ok(VideoCatalog::new(
        info.title.unwrap_or_else(|| "Unknown".to_string()),
        streams,
    ))
}

/// 基于 yt-dlp 的视频源：yt-dlp 负责解析，下载用 reqwest 直接拉流
pub struct YtDlpSource {
    config: YtDlpConfig,
    client: Client,
}

impl YtDlpSource {
    pub fn new(config: YtDlpConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(config.socket_timeout as u64))
            .build()?;
        Ok(Self { config, client })
    }

    fn build_args(&self, locator: &VideoLocator) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--socket-timeout".to_string(),
            self.config.socket_timeout.to_string(),
            locator.watch_url(),
        ]
    }
}

#[async_trait]
impl VideoStreamSource for YtDlpSource {
    async fn fetch(&self, locator: &VideoLocator) -> Result<VideoCatalog, SourceError> {
        let args = self.build_args(locator);
        debug!("执行: {} {}", self.config.binary, args.join(" "));

        let output = Command::new(&self.config.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SourceError::ToolNotFound(format!(
                    "{} (请先安装 yt-dlp 或使用 --yt-dlp 指定路径)",
                    self.config.binary
                )),
                _ => SourceError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::from_extractor_stderr(&stderr));
        }

        let catalog = parse_catalog(&output.stdout)?;
        info!("获取到 {} 个可下载的流", catalog.streams.len());
        Ok(catalog)
    }

    async fn transfer(
        &self,
        stream: &StreamDescriptor,
        output_dir: &Path,
        filename: &str,
        hooks: &mut dyn TransferHooks,
    ) -> Result<PathBuf, SourceError> {
        let output_path = output_dir.join(filename);
        download_stream(&self.client, stream, &output_path, hooks).await
    }
}
