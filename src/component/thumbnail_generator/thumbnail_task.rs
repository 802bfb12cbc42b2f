use super::ffmpeg_command::FfmpegCommand;
use crate::component::video_catalog::VideoEntry;
use log::warn;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// 暫存 GIF 的副檔名，發布前的檔名為 `.{identifier}.{uuid}.gif.part`
pub const STAGING_SUFFIX: &str = ".gif.part";

/// 縮圖流程的步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStep {
    Prepare,
    FrameExtraction,
    Assembly,
    Publish,
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Prepare => "prepare",
            Self::FrameExtraction => "frame_extraction",
            Self::Assembly => "assembly",
            Self::Publish => "publish",
        };
        write!(f, "{name}")
    }
}

/// 單一影片縮圖失敗的紀錄
#[derive(Debug, Clone)]
pub struct GenerationFailure {
    pub identifier: String,
    pub path: PathBuf,
    pub step: GenerationStep,
    pub error: String,
    /// 到失敗為止所有 ffmpeg 呼叫的 stdout + stderr
    pub output: String,
}

/// 一部影片的縮圖任務
///
/// 畫面先寫進暫存工作區中專屬的子資料夾，GIF 先寫成縮圖資料夾內的隱藏檔，
/// 成功後才改名成 `{identifier}.gif`，讀取端不會看到寫到一半的檔案。
#[derive(Debug)]
pub struct ThumbnailTask {
    pub identifier: String,
    pub video_path: PathBuf,
    pub frame_dir: PathBuf,
    pub staging_path: PathBuf,
    pub output_path: PathBuf,
}

impl ThumbnailTask {
    #[must_use]
    pub fn new(entry: &VideoEntry, scratch_dir: &Path, thumbnail_dir: &Path) -> Self {
        let run_id = Uuid::new_v4().simple().to_string();
        Self {
            identifier: entry.identifier.clone(),
            video_path: entry.path.clone(),
            frame_dir: scratch_dir.join(&run_id),
            staging_path: thumbnail_dir.join(format!(".{}.{run_id}{STAGING_SUFFIX}", entry.identifier)),
            output_path: entry.thumbnail_path(thumbnail_dir),
        }
    }

    /// 編號畫面的檔名樣式：`{identifier}%02d.jpg`
    #[must_use]
    pub fn frame_pattern(&self) -> PathBuf {
        self.frame_dir.join(format!("{}%02d.jpg", self.identifier))
    }

    /// 依序執行擷取畫面與組合 GIF，結束後清除中間檔
    pub fn run(&self, ffmpeg: &FfmpegCommand, interval_secs: u32) -> Result<(), GenerationFailure> {
        let result = self.run_stages(ffmpeg, interval_secs);

        if self.frame_dir.exists() && fs::remove_dir_all(&self.frame_dir).is_err() {
            warn!("無法清理暫存畫面: {}", self.frame_dir.display());
        }
        if result.is_err() && self.staging_path.exists() {
            if let Err(e) = fs::remove_file(&self.staging_path) {
                warn!("無法清理暫存縮圖 {}: {e}", self.staging_path.display());
            }
        }

        result
    }

    fn run_stages(
        &self,
        ffmpeg: &FfmpegCommand,
        interval_secs: u32,
    ) -> Result<(), GenerationFailure> {
        let mut output = String::new();

        fs::create_dir_all(&self.frame_dir).map_err(|e| {
            self.failure(GenerationStep::Prepare, format!("無法建立暫存資料夾: {e}"), &output)
        })?;

        let frame_pattern = self.frame_pattern();

        let extract = ffmpeg.extract_frames(&self.video_path, &frame_pattern, interval_secs);
        self.run_step(GenerationStep::FrameExtraction, extract, &mut output)?;

        let assemble = ffmpeg.assemble_gif(&frame_pattern, &self.staging_path);
        self.run_step(GenerationStep::Assembly, assemble, &mut output)?;

        fs::rename(&self.staging_path, &self.output_path).map_err(|e| {
            self.failure(
                GenerationStep::Publish,
                format!("無法發布縮圖 {}: {e}", self.output_path.display()),
                &output,
            )
        })?;

        Ok(())
    }

    fn run_step(
        &self,
        step: GenerationStep,
        mut cmd: Command,
        output: &mut String,
    ) -> Result<(), GenerationFailure> {
        let result = cmd
            .output()
            .map_err(|e| self.failure(step, format!("無法執行 ffmpeg: {e}"), output.as_str()))?;

        output.push_str(&String::from_utf8_lossy(&result.stdout));
        output.push_str(&String::from_utf8_lossy(&result.stderr));

        if !result.status.success() {
            let error = format!("ffmpeg 執行失敗: {}", result.status);
            return Err(self.failure(step, error, output.as_str()));
        }

        Ok(())
    }

    fn failure(&self, step: GenerationStep, error: String, output: &str) -> GenerationFailure {
        GenerationFailure {
            identifier: self.identifier.clone(),
            path: self.video_path.clone(),
            step,
            error,
            output: output.to_string(),
        }
    }
}

/// 清除上次執行中斷時留在縮圖資料夾的暫存 GIF，回傳刪除的數量
pub fn remove_stale_staging_files(thumbnail_dir: &Path) -> usize {
    let entries = match fs::read_dir(thumbnail_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("無法讀取縮圖資料夾 {}: {e}", thumbnail_dir.display());
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with('.') || !name.ends_with(STAGING_SUFFIX) {
            continue;
        }

        let path = entry.path();
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => warn!("無法清理暫存縮圖 {}: {e}", path.display()),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn entry(identifier: &str) -> VideoEntry {
        VideoEntry {
            path: PathBuf::from("/videos/a.mp4"),
            identifier: identifier.to_string(),
            display_name: "a.mp4".to_string(),
            size_bytes: 0,
            modified_at: Local::now(),
        }
    }

    #[test]
    fn test_task_paths() {
        let task = ThumbnailTask::new(
            &entry("abc"),
            Path::new("/tmp/scratch"),
            Path::new("/srv/thumb"),
        );

        assert_eq!(task.output_path, PathBuf::from("/srv/thumb/abc.gif"));
        assert!(task.frame_dir.starts_with("/tmp/scratch"));
        assert_eq!(task.frame_pattern(), task.frame_dir.join("abc%02d.jpg"));
        assert_eq!(task.staging_path.parent(), Some(Path::new("/srv/thumb")));

        let staging_name = task.staging_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(staging_name.starts_with(".abc."));
        assert!(staging_name.ends_with(".gif.part"));
    }

    #[test]
    fn test_each_task_gets_its_own_frame_dir() {
        let first = ThumbnailTask::new(&entry("abc"), Path::new("/tmp/s"), Path::new("/t"));
        let second = ThumbnailTask::new(&entry("abc"), Path::new("/tmp/s"), Path::new("/t"));
        assert_ne!(first.frame_dir, second.frame_dir);
        assert_ne!(first.staging_path, second.staging_path);
        assert_eq!(first.output_path, second.output_path);
    }

    #[test]
    fn test_missing_program_is_recorded_as_extraction_failure() {
        let scratch = tempfile::TempDir::new().unwrap();
        let thumbs = tempfile::TempDir::new().unwrap();
        let task = ThumbnailTask::new(&entry("abc"), scratch.path(), thumbs.path());
        let ffmpeg = FfmpegCommand::new(Path::new("/nonexistent/ffmpeg-binary"));

        let failure = task.run(&ffmpeg, 200).unwrap_err();

        assert_eq!(failure.step, GenerationStep::FrameExtraction);
        assert_eq!(failure.identifier, "abc");
        assert_eq!(failure.path, PathBuf::from("/videos/a.mp4"));
        assert!(!task.output_path.exists());
        // 失敗後暫存畫面資料夾也要被清掉
        assert!(!task.frame_dir.exists());
    }

    #[test]
    fn test_remove_stale_staging_files() {
        let thumbs = tempfile::TempDir::new().unwrap();
        fs::write(thumbs.path().join(".abc.0123.gif.part"), b"GIF8").unwrap();
        fs::write(thumbs.path().join(".def.4567.gif.part"), b"").unwrap();
        fs::write(thumbs.path().join("abc.gif"), b"GIF89a").unwrap();
        fs::write(thumbs.path().join("notes.gif.part"), b"").unwrap();

        assert_eq!(remove_stale_staging_files(thumbs.path()), 2);

        let mut left: Vec<String> = fs::read_dir(thumbs.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        left.sort();
        assert_eq!(left, vec!["abc.gif", "notes.gif.part"]);
    }

    #[test]
    fn test_remove_stale_staging_files_missing_dir() {
        assert_eq!(remove_stale_staging_files(Path::new("/nonexistent/thumb")), 0);
    }

    #[test]
    fn test_step_names() {
        assert_eq!(GenerationStep::FrameExtraction.to_string(), "frame_extraction");
        assert_eq!(GenerationStep::Assembly.to_string(), "assembly");
    }
}
