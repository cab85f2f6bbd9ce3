use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use yt_downloader::cli::Cli;
use yt_downloader::downloader::VideoDownloader;
use yt_downloader::source::{YtDlpConfig, YtDlpSource};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // 解析命令行参数
    let args = Cli::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let config = YtDlpConfig::default().with_binary(args.yt_dlp.clone());
    debug!("yt-dlp: {}", config.binary);
    let source = YtDlpSource::new(config)?;

    let request = args.to_request();
    let outcome = VideoDownloader::new(source).run(&request).await?;

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
