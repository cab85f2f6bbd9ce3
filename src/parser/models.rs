use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 首选的封装容器
pub const PREFERRED_CONTAINER: &str = "mp4";

/// 经过校验的视频定位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoLocator {
    pub video_id: String,
}

impl VideoLocator {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

impl fmt::Display for VideoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.watch_url())
    }
}

// 单条可下载的流，由外部解析器生成，核心逻辑只读
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDescriptor {
    pub itag: String,
    pub mime_type: String, // 如 video/mp4、audio/webm
    pub resolution: Option<String>, // 如 720p，音频为 None
    pub abr: Option<f32>, // 平均码率 kbps
    pub fps: Option<u32>,
    pub filesize: Option<u64>,
    pub progressive: bool, // 音视频合一
    pub has_video: bool,
    pub has_audio: bool,
    pub url: String,
    pub http_headers: BTreeMap<String, String>,
}

impl StreamDescriptor {
    /// mime 类型的子类型，即容器名
    pub fn subtype(&self) -> &str {
        self.mime_type.split('/').nth(1).unwrap_or("")
    }

    pub fn is_adaptive(&self) -> bool {
        !self.progressive
    }

    pub fn is_audio_only(&self) -> bool {
        self.has_audio && !self.has_video
    }

    pub fn is_video_only(&self) -> bool {
        self.has_video && !self.has_audio
    }

    /// 分辨率的数值部分，"1080p60" => 1080
    pub fn height(&self) -> Option<u32> {
        self.resolution.as_deref().and_then(resolution_height)
    }

    /// 保存文件时使用的扩展名
    pub fn extension(&self) -> &str {
        match (self.subtype(), self.is_audio_only()) {
            ("mp4", true) => "m4a",
            ("", _) => "bin",
            (subtype, _) => subtype,
        }
    }
}

pub fn resolution_height(resolution: &str) -> Option<u32> {
    let digits: String = resolution
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// 用户输入的清晰度统一成 "720p" 这种形式
pub fn normalize_quality(quality: &str) -> String {
    let quality = quality.trim().to_lowercase();
    if !quality.is_empty() && quality.chars().all(|c| c.is_ascii_digit()) {
        format!("{}p", quality)
    } else {
        quality
    }
}

// 一个视频可用的全部流
#[derive(Debug, Clone, Default)]
pub struct VideoCatalog {
    pub title: String,
    pub streams: Vec<StreamDescriptor>,
}

impl VideoCatalog {
    pub fn new(title: impl Into<String>, streams: Vec<StreamDescriptor>) -> Self {
        Self {
            title: title.into(),
            streams,
        }
    }

    pub fn query(&self) -> StreamQuery<'_> {
        StreamQuery {
            streams: self.streams.iter().collect(),
        }
    }

    /// 任意容器中码率最高的纯音频流
    pub fn best_audio(&self) -> Option<&StreamDescriptor> {
        self.query()
            .filter(StreamDescriptor::is_audio_only)
            .order_by(StreamOrder::Bitrate)
            .desc()
            .first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOrder {
    Resolution,
    Bitrate,
}

/// 流列表的链式查询，filter / order_by / desc / first
#[derive(Debug, Clone)]
pub struct StreamQuery<'a> {
    streams: Vec<&'a StreamDescriptor>,
}

impl<'a> StreamQuery<'a> {
    pub fn filter<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&StreamDescriptor) -> bool,
    {
        self.streams.retain(|s| predicate(*s));
        self
    }

    pub fn progressive(self) -> Self {
        self.filter(|s| s.progressive)
    }

    pub fn adaptive(self) -> Self {
        self.filter(StreamDescriptor::is_adaptive)
    }

    pub fn container(self, subtype: &str) -> Self {
        self.filter(|s| s.subtype() == subtype)
    }

    /// 升序排列，缺少排序字段的流排在最前，`desc` 之后就落到末尾
    pub fn order_by(mut self, order: StreamOrder) -> Self {
        match order {
            StreamOrder::Resolution => {
                self.streams.sort_by_key(|s| s.height());
            }
            StreamOrder::Bitrate => {
                self.streams.sort_by(|a, b| {
                    let a = a.abr.unwrap_or(f32::NEG_INFINITY);
                    let b = b.abr.unwrap_or(f32::NEG_INFINITY);
                    a.total_cmp(&b)
                });
            }
        }
        self
    }

    pub fn desc(mut self) -> Self {
        self.streams.reverse();
        self
    }

    pub fn first(&self) -> Option<&'a StreamDescriptor> {
        self.streams.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a StreamDescriptor> + '_ {
        self.streams.iter().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Video,
    AudioOnly,
}

// 一次调用对应的选流请求
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub locator: String,
    pub mode: SelectionMode,
    pub quality: Option<String>,
    pub list_only: bool,
    pub output_dir: PathBuf,
}

impl Default for SelectionRequest {
    fn default() -> Self {
        Self {
            locator: String::new(),
            mode: SelectionMode::Video,
            quality: None,
            list_only: false,
            output_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(itag: &str, mime: &str, res: Option<&str>, abr: Option<f32>) -> StreamDescriptor {
        StreamDescriptor {
            itag: itag.to_string(),
            mime_type: mime.to_string(),
            resolution: res.map(str::to_string),
            abr,
            fps: None,
            filesize: None,
            progressive: false,
            has_video: res.is_some(),
            has_audio: res.is_none(),
            url: String::new(),
            http_headers: BTreeMap::new(),
        }
    }

    #[test]
    fn resolution_sorts_numerically() {
        let catalog = VideoCatalog::new(
            "t",
            vec![
                stream("1", "video/mp4", Some("1080p"), None),
                stream("2", "video/mp4", Some("144p"), None),
                stream("3", "video/mp4", Some("720p60"), None),
            ],
        );
        let heights: Vec<_> = catalog
            .query()
            .order_by(StreamOrder::Resolution)
            .desc()
            .iter()
            .map(|s| s.height())
            .collect();
        assert_eq!(heights, vec![Some(1080), Some(720), Some(144)]);
    }

    #[test]
    fn best_audio_ignores_container() {
        let catalog = VideoCatalog::new(
            "t",
            vec![
                stream("140", "audio/mp4", None, Some(129.5)),
                stream("251", "audio/webm", None, Some(160.0)),
                stream("18", "video/mp4", Some("360p"), None),
            ],
        );
        assert_eq!(catalog.best_audio().map(|s| s.itag.as_str()), Some("251"));
    }

    #[test]
    fn streams_without_sort_key_are_kept_last() {
        let catalog = VideoCatalog::new(
            "t",
            vec![
                stream("0", "video/mp4", Some("unknown"), None),
                stream("1", "video/mp4", Some("360p"), None),
                stream("139", "audio/mp4", None, None),
                stream("140", "audio/mp4", None, Some(128.0)),
            ],
        );
        let by_res: Vec<_> = catalog
            .query()
            .filter(|s| s.has_video)
            .order_by(StreamOrder::Resolution)
            .desc()
            .iter()
            .map(|s| s.itag.as_str())
            .collect();
        assert_eq!(by_res, vec!["1", "0"]);

        let by_abr: Vec<_> = catalog
            .query()
            .filter(StreamDescriptor::is_audio_only)
            .order_by(StreamOrder::Bitrate)
            .desc()
            .iter()
            .map(|s| s.itag.as_str())
            .collect();
        assert_eq!(by_abr, vec!["140", "139"]);
    }

    #[test]
    fn best_audio_without_bitrate() {
        let catalog = VideoCatalog::new("t", vec![stream("140", "audio/mp4", None, None)]);
        assert_eq!(catalog.best_audio().map(|s| s.itag.as_str()), Some("140"));
    }

    #[test]
    fn quality_normalization() {
        assert_eq!(normalize_quality("720"), "720p");
        assert_eq!(normalize_quality(" 1080P "), "1080p");
        assert_eq!(normalize_quality("720p60"), "720p60");
    }

    #[test]
    fn extension_follows_container() {
        let audio = stream("140", "audio/mp4", None, Some(128.0));
        let video = stream("22", "video/mp4", Some("720p"), None);
        let webm = stream("251", "audio/webm", None, Some(160.0));
        assert_eq!(audio.extension(), "m4a");
        assert_eq!(video.extension(), "mp4");
        assert_eq!(webm.extension(), "webm");
    }
}
