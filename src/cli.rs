use clap::Parser;
use std::path::PathBuf;

use crate::parser::models::{SelectionMode, SelectionRequest};

/// YouTube 视频下载器
#[derive(Parser, Debug)]
#[command(name = "ytdl")]
#[command(version)]
#[command(about = "Download YouTube videos or audio tracks", long_about = None)]
pub struct Cli {
    /// 视频链接或 11 位视频ID
    #[arg(value_name = "URL")]
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: String,

    /// 视频保存目录
    #[arg(short, long, value_name = "DIR")]
    #[arg(default_value = ".")]
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub output_dir: PathBuf,

    #[arg(short, long, help = "Download the audio track only")]
    pub audio_only: bool,

    #[arg(short, long, value_name = "QUALITY")]
    #[arg(help = "Video resolution to download, e.g. 1080p, 720p, 480p")]
    pub quality: Option<String>,

    #[arg(short, long, help = "List the available qualities instead of downloading")]
    pub list: bool,

    /// yt-dlp 可执行文件路径
    #[arg(long = "yt-dlp", value_name = "PATH")]
    #[arg(value_hint = clap::ValueHint::ExecutablePath)]
    pub yt_dlp: Option<String>,

    #[arg(short, long, help = "Print debug logs")]
    pub verbose: bool,
}

impl Cli {
    pub fn to_request(&self) -> SelectionRequest {
        SelectionRequest {
            locator: self.url.clone(),
            mode: if self.audio_only {
                SelectionMode::AudioOnly
            } else {
                SelectionMode::Video
            },
            quality: self.quality.clone(),
            list_only: self.list,
            output_dir: self.output_dir.clone(),
        }
    }
}
