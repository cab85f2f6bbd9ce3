use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::downloader::progress::TransferHooks;
use crate::parser::models::{StreamDescriptor, VideoCatalog, VideoLocator};
use error::SourceError;

pub mod error;
pub mod transfer;
pub mod ytdlp;

pub use ytdlp::{YtDlpConfig, YtDlpSource};

// 外部视频解析器的抽象，任何实现都可以替换进来
#[async_trait]
pub trait VideoStreamSource: Send + Sync {
    /// 获取视频标题和所有可下载的流
    async fn fetch(&self, locator: &VideoLocator) -> Result<VideoCatalog, SourceError>;

    /// 把选中的流保存到 `output_dir/filename`，返回最终路径
    async fn transfer(
        &self,
        stream: &StreamDescriptor,
        output_dir: &Path,
        filename: &str,
        hooks: &mut dyn TransferHooks,
    ) -> Result<PathBuf, SourceError>;
}
