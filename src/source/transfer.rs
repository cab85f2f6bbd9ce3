use std::path::{Path, PathBuf};

use futures::StreamExt;
use reqwest::{Client, Response};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use super::error::SourceError;
use crate::downloader::progress::TransferHooks;
use crate::parser::models::StreamDescriptor;

/// 以流的方式下载单个媒体文件，每收到一个分块就回调一次进度
pub async fn download_stream(
    client: &Client,
    stream: &StreamDescriptor,
    output_path: &Path,
    hooks: &mut dyn TransferHooks,
) -> Result<PathBuf, SourceError> {
    let mut request = client.get(&stream.url);
    for (name, value) in &stream.http_headers {
        request = request.header(name.as_str(), value.as_str());
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::HttpStatus(status.as_u16()));
    }

    // 服务器给的长度是准确值，描述里的大小可能只是估算
    let total_size = response
        .content_length()
        .or(stream.filesize)
        .unwrap_or(0);
    debug!("开始下载 itag={} 共 {} 字节", stream.itag, total_size);

    let part_path = output_path.with_extension("part");
    if let Err(e) = write_part(response, &part_path, output_path, total_size, hooks).await {
        if let Err(rm) = tokio::fs::remove_file(&part_path).await {
            if rm.kind() != std::io::ErrorKind::NotFound {
                warn!("清理临时文件失败: {}", rm);
            }
        }
        return Err(e);
    }

    let path = output_path.to_path_buf();
    hooks.on_complete(&path);
    Ok(path)
}

// 写入 .part 文件，全部写完后再改名
async fn write_part(
    response: Response,
    part_path: &Path,
    output_path: &Path,
    total_size: u64,
    hooks: &mut dyn TransferHooks,
) -> Result<(), SourceError> {
    let mut file = tokio::fs::File::create(part_path).await?;
    let mut body = response.bytes_stream();

    let mut downloaded = 0u64;
    hooks.on_progress(total_size, total_size);
    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
        hooks.on_progress(total_size, total_size.saturating_sub(downloaded));
    }
    file.flush().await?;
    drop(file);

    tokio::fs::rename(part_path, output_path).await?;
    debug!("下载完成: {} ({} 字节)", output_path.display(), downloaded);
    Ok(())
}
