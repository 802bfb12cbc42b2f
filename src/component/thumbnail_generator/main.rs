use super::ffmpeg_command::FfmpegCommand;
use super::thumbnail_task::{GenerationFailure, ThumbnailTask, remove_stale_staging_files};
use crate::component::video_catalog::VideoEntry;
use crate::config::Config;
use anyhow::{Context, Result};
use log::{error, info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 暫存工作區的資料夾前綴
const SCRATCH_PREFIX: &str = "thumbnailer";

/// 縮圖產生結果
#[derive(Debug, Default)]
pub struct GenerationResult {
    pub total_videos: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub failures: Vec<GenerationFailure>,
}

#[derive(Debug)]
enum EntryOutcome {
    Generated,
    Skipped,
    Failed(GenerationFailure),
    Cancelled,
}

/// 動態縮圖產生器
///
/// 每部影片依序經過：
/// 1. 已有 `{identifier}.gif` 則跳過
/// 2. 擷取畫面（ffmpeg）
/// 3. 組合 GIF（ffmpeg）並改名發布
///
/// 單一影片失敗只會記錄下來，不影響其他影片。
pub struct ThumbnailGenerator {
    config: Config,
    ffmpeg: FfmpegCommand,
    shutdown_signal: Arc<AtomicBool>,
}

impl ThumbnailGenerator {
    #[must_use]
    pub fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        let ffmpeg = FfmpegCommand::new(&config.ffmpeg_program);
        Self {
            config,
            ffmpeg,
            shutdown_signal,
        }
    }

    /// 為整份目錄產生縮圖
    ///
    /// 只有暫存工作區或執行緒池建立失敗會回傳錯誤；個別影片的失敗記錄在結果中。
    pub fn run(&self, videos: &[VideoEntry]) -> Result<GenerationResult> {
        let scratch = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .context("無法建立暫存工作區")?;

        let stale = remove_stale_staging_files(&self.config.thumbnail_dir);
        if stale > 0 {
            warn!("已清除 {stale} 個上次未完成的暫存縮圖");
        }

        info!(
            "縮圖任務開始: thumbnail_dir={}, temp_dir={}, videos={}",
            self.config.thumbnail_dir.display(),
            scratch.path().display(),
            videos.len()
        );

        let outcomes = self.process_videos(videos, scratch.path())?;
        let result = Self::summarize(videos.len(), outcomes);

        if let Err(e) = scratch.close() {
            warn!("無法清理暫存工作區: {e}");
        }

        self.log_summary(&result);
        Ok(result)
    }

    fn process_videos(
        &self,
        videos: &[VideoEntry],
        scratch_dir: &Path,
    ) -> Result<Vec<EntryOutcome>> {
        if self.config.workers <= 1 {
            return Ok(videos
                .iter()
                .map(|video| self.process_single_video(video, scratch_dir))
                .collect());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("thumbnailer-{i}"))
            .build()
            .context("無法建立縮圖執行緒池")?;

        Ok(pool.install(|| {
            videos
                .par_iter()
                .map(|video| self.process_single_video(video, scratch_dir))
                .collect()
        }))
    }

    fn process_single_video(&self, video: &VideoEntry, scratch_dir: &Path) -> EntryOutcome {
        if self.shutdown_signal.load(Ordering::SeqCst) {
            return EntryOutcome::Cancelled;
        }

        let output_path = video.thumbnail_path(&self.config.thumbnail_dir);
        if output_path.exists() {
            info!(
                "縮圖已存在，跳過: path={}, hash={}",
                video.path.display(),
                video.identifier
            );
            return EntryOutcome::Skipped;
        }

        info!(
            "開始產生縮圖: path={}, hash={}",
            video.path.display(),
            video.identifier
        );

        let task = ThumbnailTask::new(video, scratch_dir, &self.config.thumbnail_dir);
        match task.run(&self.ffmpeg, self.config.frame_interval_secs) {
            Ok(()) => {
                info!("縮圖已建立: {}", output_path.display());
                EntryOutcome::Generated
            }
            Err(failure) => {
                error!(
                    "縮圖產生失敗: path={}, hash={}, step={}, error={}, output={}",
                    failure.path.display(),
                    failure.identifier,
                    failure.step,
                    failure.error,
                    failure.output.trim()
                );
                EntryOutcome::Failed(failure)
            }
        }
    }

    fn summarize(total_videos: usize, outcomes: Vec<EntryOutcome>) -> GenerationResult {
        let mut result = GenerationResult {
            total_videos,
            ..GenerationResult::default()
        };

        for outcome in outcomes {
            match outcome {
                EntryOutcome::Generated => result.successful += 1,
                EntryOutcome::Skipped => result.skipped += 1,
                EntryOutcome::Cancelled => result.cancelled += 1,
                EntryOutcome::Failed(failure) => {
                    result.failed += 1;
                    result.failures.push(failure);
                }
            }
        }

        result
    }

    fn log_summary(&self, result: &GenerationResult) {
        if result.cancelled > 0 {
            warn!("收到中斷訊號，{} 部影片未處理", result.cancelled);
        }

        info!(
            "縮圖任務完成 - 總計: {}, 成功: {}, 跳過: {}, 失敗: {}",
            result.total_videos, result.successful, result.skipped, result.failed
        );
    }
}
