use std::path::PathBuf;

use tracing::{debug, error, info};

use crate::common::logger::PrettyLogger;
use crate::common::utils::FormatTool;
use crate::parser::detector::detect_video_locator;
use crate::parser::errors::SelectionError;
use crate::parser::models::{SelectionMode, SelectionRequest, StreamDescriptor};
use crate::parser::quality_lister::list_available_qualities;
use crate::parser::stream_selector::StreamSelector;
use crate::source::VideoStreamSource;
use crate::{log_error, log_info, log_step, log_success};

use progress::{ConsoleProgress, TransferHooks};

pub mod progress;

// 一次调用的结果
#[derive(Debug)]
pub enum Outcome {
    Listed { found: bool },
    Downloaded(PathBuf),
    Failed(SelectionError),
}

impl Outcome {
    /// 只列清晰度时无论是否找到流都算成功
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

pub struct VideoDownloader<S> {
    source: S,
}

impl<S: VideoStreamSource> VideoDownloader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 完整流程：解析链接 → 获取流列表 → 选流 → 下载
    ///
    /// 只有创建输出目录失败会以 `Err` 返回，其余失败都会打印出来并体现在 `Outcome` 里
    pub async fn run(&self, request: &SelectionRequest) -> std::io::Result<Outcome> {
        let mut hooks = ConsoleProgress::new();
        self.run_with_hooks(request, &mut hooks).await
    }

    pub async fn run_with_hooks(
        &self,
        request: &SelectionRequest,
        hooks: &mut dyn TransferHooks,
    ) -> std::io::Result<Outcome> {
        let outcome = match self.select(request).await {
            Ok(Selected::Listed(found)) => Outcome::Listed { found },
            Ok(Selected::Stream { title, stream }) => {
                self.download(request, &title, &stream, hooks).await?
            }
            Err(e) => Outcome::Failed(e),
        };

        if let Outcome::Failed(e) = &outcome {
            log_error!("{}", e);
        }
        Ok(outcome)
    }

    async fn select(&self, request: &SelectionRequest) -> Result<Selected, SelectionError> {
        let locator = detect_video_locator(&request.locator)?;
        debug!("视频ID: {}", locator.video_id);

        log_step!("Fetching video information...");
        let catalog = self.source.fetch(&locator).await?;
        info!("标题: << {} >>", catalog.title);

        if request.list_only {
            return Ok(Selected::Listed(list_available_qualities(&catalog)));
        }

        let stream = StreamSelector::new(&catalog)
            .select(request.mode, request.quality.as_deref())?
            .clone();

        Ok(Selected::Stream {
            title: catalog.title,
            stream,
        })
    }

    async fn download(
        &self,
        request: &SelectionRequest,
        title: &str,
        stream: &StreamDescriptor,
        hooks: &mut dyn TransferHooks,
    ) -> std::io::Result<Outcome> {
        if !request.output_dir.exists() {
            info!("创建输出目录: {:?}", request.output_dir);
        }
        tokio::fs::create_dir_all(&request.output_dir).await?;

        PrettyLogger::selected_stream(title, describe(request.mode, stream));
        let filename = format!(
            "{}.{}",
            FormatTool::sanitize_filename(title),
            stream.extension()
        );
        log_info!("Downloading {} ...", filename);

        match self
            .source
            .transfer(stream, &request.output_dir, &filename, hooks)
            .await
        {
            Ok(path) => {
                log_success!("Download completed!");
                Ok(Outcome::Downloaded(path))
            }
            Err(e) => {
                error!("下载失败: {}", e);
                Ok(Outcome::Failed(SelectionError::from(e)))
            }
        }
    }
}

enum Selected {
    Listed(bool),
    Stream {
        title: String,
        stream: StreamDescriptor,
    },
}

fn describe(mode: SelectionMode, stream: &StreamDescriptor) -> String {
    let size = stream
        .filesize
        .map(FormatTool::format_size)
        .unwrap_or_else(|| "unknown size".to_string());
    match mode {
        SelectionMode::AudioOnly => {
            let abr = stream
                .abr
                .map(|abr| format!("{:.0}kbps", abr))
                .unwrap_or_else(|| "audio".to_string());
            format!("{} {}, {}", stream.subtype(), abr, size)
        }
        SelectionMode::Video => format!(
            "{} {}, {}",
            stream.subtype(),
            stream.resolution.as_deref().unwrap_or("?"),
            size
        ),
    }
}
