use std::fmt;

use colored::Colorize;

use super::models::VideoCatalog;
use super::stream_selector::StreamSelector;
use crate::common::utils::FormatTool;

/// 缺失属性时显示的占位符
pub const NOT_AVAILABLE: &str = "not available";

// 清晰度列表中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct QualityRow {
    pub index: usize,
    pub resolution: String,
    pub fps: Option<u32>,
    pub size_mb: Option<f64>,
}

impl QualityRow {
    pub fn fps_label(&self) -> String {
        self.fps
            .map(|fps| format!("{} fps", fps))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn size_label(&self) -> String {
        self.size_mb
            .map(|mb| format!("{:.2} MB", mb))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

impl fmt::Display for QualityRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3}. Resolution: {:<8} Frame rate: {:<14} Size: {}",
            self.index,
            self.resolution,
            self.fps_label(),
            self.size_label()
        )
    }
}

/// 可列出的清晰度，按分辨率从高到低
pub fn quality_rows(catalog: &VideoCatalog) -> Vec<QualityRow> {
    StreamSelector::new(catalog)
        .progressive_candidates()
        .iter()
        .enumerate()
        .map(|(i, stream)| QualityRow {
            index: i + 1,
            resolution: stream
                .resolution
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            fps: stream.fps,
            size_mb: stream.filesize.map(FormatTool::bytes_to_mb),
        })
        .collect()
}

/// 打印清晰度列表，返回是否找到了可用的流
pub fn list_available_qualities(catalog: &VideoCatalog) -> bool {
    println!(
        "Available video qualities for {}:\n",
        catalog.title.bold()
    );

    let rows = quality_rows(catalog);
    if rows.is_empty() {
        println!("{}", "No available stream found.".yellow());
        return false;
    }

    for row in &rows {
        println!("{}", row);
    }
    true
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::parser::models::StreamDescriptor;

    fn progressive(res: &str, fps: Option<u32>, size: Option<u64>) -> StreamDescriptor {
        StreamDescriptor {
            itag: res.to_string(),
            mime_type: "video/mp4".to_string(),
            resolution: Some(res.to_string()),
            abr: None,
            fps,
            filesize: size,
            progressive: true,
            has_video: true,
            has_audio: true,
            url: String::new(),
            http_headers: BTreeMap::new(),
        }
    }

    #[test]
    fn rows_are_sorted_by_descending_resolution() {
        let catalog = VideoCatalog::new(
            "clip",
            vec![
                progressive("360p", Some(30), Some(10 * 1024 * 1024)),
                progressive("1080p", Some(60), None),
                progressive("720p", None, Some(5_242_880)),
            ],
        );
        let rows = quality_rows(&catalog);
        let resolutions: Vec<_> = rows.iter().map(|r| r.resolution.as_str()).collect();
        assert_eq!(resolutions, vec!["1080p", "720p", "360p"]);
        assert_eq!(rows.iter().map(|r| r.index).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn missing_metadata_uses_placeholder() {
        let row = QualityRow {
            index: 1,
            resolution: "720p".to_string(),
            fps: None,
            size_mb: None,
        };
        assert_eq!(row.fps_label(), NOT_AVAILABLE);
        assert_eq!(row.size_label(), NOT_AVAILABLE);
        assert!(row.to_string().contains(NOT_AVAILABLE));
    }

    #[test]
    fn stream_without_resolution_is_listed_last() {
        let mut unknown = progressive("360p", None, None);
        unknown.resolution = None;
        let catalog = VideoCatalog::new("clip", vec![unknown, progressive("720p", Some(30), None)]);
        let rows = quality_rows(&catalog);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].resolution, "720p");
        assert_eq!(rows[1].resolution, NOT_AVAILABLE);
        assert!(list_available_qualities(&catalog));
    }

    #[test]
    fn size_is_reported_in_megabytes() {
        let catalog = VideoCatalog::new("clip", vec![progressive("720p", Some(30), Some(5_242_880))]);
        let rows = quality_rows(&catalog);
        assert_eq!(rows[0].size_label(), "5.00 MB");
        assert_eq!(rows[0].fps_label(), "30 fps");
    }

    #[test]
    fn empty_listing_returns_false() {
        let catalog = VideoCatalog::new("nothing", Vec::new());
        assert!(!list_available_qualities(&catalog));
    }
}
