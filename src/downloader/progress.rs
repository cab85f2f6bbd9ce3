use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

/// 传输过程中的回调，由下载方在传输调用内同步触发
pub trait TransferHooks: Send {
    /// `bytes_remaining` 是尚未下载的字节数，`total_bytes` 为 0 表示大小未知，此时 `bytes_remaining` 无意义
    fn on_progress(&mut self, total_bytes: u64, bytes_remaining: u64);

    fn on_complete(&mut self, path: &Path);
}

/// 已完成的百分比
pub fn percent_complete(total_bytes: u64, bytes_remaining: u64) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }
    let done = total_bytes.saturating_sub(bytes_remaining);
    done as f64 / total_bytes as f64 * 100.0
}

// 终端进度条，同一行刷新
pub struct ConsoleProgress {
    pb: Option<ProgressBar>,
    saved_to: Option<String>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            pb: None,
            saved_to: None,
        }
    }

    pub fn saved_to(&self) -> Option<&str> {
        self.saved_to.as_deref()
    }

    fn bar(&mut self, total_bytes: u64) -> &ProgressBar {
        self.pb.get_or_insert_with(|| {
            if total_bytes > 0 {
                let pb = ProgressBar::new(total_bytes);
                if let Ok(style) = ProgressStyle::with_template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg} {bytes}/{total_bytes} ({eta})",
                ) {
                    pb.set_style(style.progress_chars("#>-"));
                }
                pb
            } else {
                let pb = ProgressBar::new_spinner();
                if let Ok(style) =
                    ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] downloading...")
                {
                    pb.set_style(style);
                }
                pb
            }
        })
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferHooks for ConsoleProgress {
    fn on_progress(&mut self, total_bytes: u64, bytes_remaining: u64) {
        let pb = self.bar(total_bytes);
        if total_bytes > 0 {
            pb.set_position(total_bytes.saturating_sub(bytes_remaining));
            pb.set_message(format!(
                "{:.1}%",
                percent_complete(total_bytes, bytes_remaining)
            ));
        } else {
            pb.tick();
        }
    }

    fn on_complete(&mut self, path: &Path) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
        let path = path.display().to_string();
        crate::common::logger::PrettyLogger::saved_path(&path);
        self.saved_to = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_from_remaining_bytes() {
        assert_eq!(percent_complete(200, 200), 0.0);
        assert_eq!(percent_complete(200, 50), 75.0);
        assert_eq!(percent_complete(200, 0), 100.0);
    }

    #[test]
    fn unknown_total_never_divides_by_zero() {
        assert_eq!(percent_complete(0, 0), 0.0);
        assert_eq!(percent_complete(100, 500), 0.0);
    }

    #[test]
    fn completion_records_path() {
        let mut progress = ConsoleProgress::new();
        progress.on_progress(100, 40);
        progress.on_complete(Path::new("/tmp/clip.mp4"));
        assert_eq!(progress.saved_to(), Some("/tmp/clip.mp4"));
    }
}
