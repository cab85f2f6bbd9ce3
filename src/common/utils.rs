use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RESERVED_CHARS: Regex = Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

// 文件名长度上限（字符数）
const MAX_FILENAME_CHARS: usize = 200;

pub struct FormatTool;

impl FormatTool {
    pub fn bytes_to_mb(size: u64) -> f64 {
        size as f64 / 1024.0 / 1024.0
    }

    // 格式化文件大小
    pub fn format_size(size: u64) -> String {
        if size > 1024 * 1024 * 1024 {
            format!("{:.2} GB", size as f64 / 1024.0 / 1024.0 / 1024.0)
        } else if size > 1024 * 1024 {
            format!("{:.1} MB", Self::bytes_to_mb(size))
        } else {
            format!("{:.1} KB", size as f64 / 1024.0)
        }
    }

    /// 把视频标题变成可以安全落盘的文件名
    pub fn sanitize_filename(title: &str) -> String {
        let cleaned = RESERVED_CHARS.replace_all(title, "");
        let cleaned = WHITESPACE.replace_all(cleaned.trim(), " ");
        let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
        let cleaned: String = cleaned.chars().take(MAX_FILENAME_CHARS).collect();

        if cleaned.is_empty() {
            "video".to_string()
        } else {
            cleaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_reserved_characters() {
        assert_eq!(
            FormatTool::sanitize_filename("AC/DC: Back in Black?  (Live)"),
            "ACDC Back in Black (Live)"
        );
        assert_eq!(FormatTool::sanitize_filename("  ...  "), "video");
        assert_eq!(FormatTool::sanitize_filename("中文 标题"), "中文 标题");
    }

    #[test]
    fn format_size_units() {
        assert_eq!(FormatTool::format_size(512), "0.5 KB");
        assert_eq!(FormatTool::format_size(5 * 1024 * 1024 + 1), "5.0 MB");
        assert_eq!(FormatTool::format_size(3 * 1024 * 1024 * 1024 + 1), "3.00 GB");
    }
}
