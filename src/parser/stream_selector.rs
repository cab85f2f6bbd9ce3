use tracing::debug;

use super::errors::SelectionError;
use super::models::{
    normalize_quality, SelectionMode, StreamDescriptor, StreamOrder, StreamQuery, VideoCatalog,
    PREFERRED_CONTAINER,
};

pub struct StreamSelector<'a> {
    catalog: &'a VideoCatalog,
}

impl<'a> StreamSelector<'a> {
    pub fn new(catalog: &'a VideoCatalog) -> Self {
        Self { catalog }
    }

    /// 根据模式和清晰度选择要下载的流
    pub fn select(
        &self,
        mode: SelectionMode,
        quality: Option<&str>,
    ) -> Result<&'a StreamDescriptor, SelectionError> {
        match mode {
            SelectionMode::AudioOnly => self.select_audio(),
            SelectionMode::Video => self.select_video(quality),
        }
    }

    /// 首选容器里码率最高的音频，没有的话退回到任意容器的最佳音频
    pub fn select_audio(&self) -> Result<&'a StreamDescriptor, SelectionError> {
        let preferred = self
            .catalog
            .query()
            .filter(StreamDescriptor::is_audio_only)
            .container(PREFERRED_CONTAINER)
            .order_by(StreamOrder::Bitrate)
            .desc()
            .first();

        if let Some(stream) = preferred {
            return Ok(stream);
        }

        debug!("没有 {} 音频流，改用最佳音频", PREFERRED_CONTAINER);
        self.catalog
            .best_audio()
            .ok_or(SelectionError::NoAudioStream)
    }

    pub fn progressive_candidates(&self) -> StreamQuery<'a> {
        self.catalog
            .query()
            .progressive()
            .container(PREFERRED_CONTAINER)
            .order_by(StreamOrder::Resolution)
            .desc()
    }

    pub fn adaptive_candidates(&self) -> StreamQuery<'a> {
        self.catalog
            .query()
            .adaptive()
            .filter(StreamDescriptor::is_video_only)
            .container(PREFERRED_CONTAINER)
            .order_by(StreamOrder::Resolution)
            .desc()
    }

    /// 先找音视频合一的流，没有的话再找分离的视频流
    pub fn select_video(
        &self,
        quality: Option<&str>,
    ) -> Result<&'a StreamDescriptor, SelectionError> {
        let progressive = self.progressive_candidates();
        let candidates = if !progressive.is_empty() {
            progressive
        } else {
            debug!("没有 progressive 流，尝试 adaptive 流");
            let adaptive = self.adaptive_candidates();
            if adaptive.is_empty() {
                return Err(SelectionError::NoVideoStream);
            }
            adaptive
        };

        match quality {
            Some(quality) => {
                let wanted = normalize_quality(quality);
                candidates
                    .filter(|s| s.resolution.as_deref() == Some(wanted.as_str()))
                    .first()
                    .ok_or(SelectionError::QualityNotFound {
                        quality: quality.to_string(),
                    })
            }
            None => candidates.first().ok_or(SelectionError::NoVideoStream),
        }
    }
}
