use colored::*;

/// 终端状态输出，前面带一个彩色图标
pub struct PrettyLogger;

impl PrettyLogger {
    fn line(icon: ColoredString, message: &str) {
        println!("{} {}", icon, message);
    }

    pub fn success(message: impl AsRef<str>) {
        Self::line("✓".green().bold(), message.as_ref());
    }

    pub fn info(message: impl AsRef<str>) {
        Self::line("ℹ".blue().bold(), message.as_ref());
    }

    /// 不影响结果的提示
    pub fn warning(message: impl AsRef<str>) {
        Self::line("⚠".yellow().bold(), message.as_ref());
    }

    // 错误输出到 stderr
    pub fn error(message: impl AsRef<str>) {
        eprintln!("{} {}", "✗".red().bold(), message.as_ref().red());
    }

    /// 流程中的一个步骤，前面空一行
    pub fn step_start(step: impl AsRef<str>) {
        println!();
        Self::line("▶".cyan().bold(), &step.as_ref().bold().to_string());
    }

    /// 保存路径
    pub fn saved_path(path: impl AsRef<str>) {
        Self::line("📁".blue().bold(), &format!("{} {}", "Saved to:".bold(), path.as_ref()));
    }

    /// 选中的流：标题 + 格式描述
    pub fn selected_stream(title: impl AsRef<str>, description: impl AsRef<str>) {
        Self::line(
            "🎬".magenta().bold(),
            &format!("{} [{}]", title.as_ref().bold(), description.as_ref().cyan()),
        );
    }
}

/// 便捷宏用于漂亮的日志输出
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::success(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::info(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::warning(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::error(format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_step {
    ($($arg:tt)*) => {
        $crate::common::logger::PrettyLogger::step_start(format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_format_their_arguments() {
        crate::log_success!("saved {} bytes", 42);
        crate::log_info!("{}", "info");
        crate::log_warning!("careful: {}", 1);
        crate::log_error!("failed: {:?}", "reason");
        crate::log_step!("step {}", 2);
        super::PrettyLogger::saved_path("/tmp/clip.mp4");
        super::PrettyLogger::selected_stream("title", "mp4 720p, 5.0 MB");
    }
}
