use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// 跳過影片開頭的秒數
pub const START_OFFSET_SECS: u32 = 3;
/// 場景變換偵測的門檻
pub const SCENE_THRESHOLD: f64 = 0.1;
/// 每部影片最多擷取的畫面數
pub const MAX_FRAMES: u32 = 10;
/// GIF 的輸出幀率
pub const OUTPUT_FRAMERATE: u32 = 1;
/// GIF 寬度（高度依比例縮放）
pub const THUMBNAIL_WIDTH: u32 = 480;
/// 播放時間倍率，讓 GIF 播放速度比擷取速度慢
pub const PTS_MULTIPLIER: u32 = 8;

/// 組出縮圖流程需要的兩個 ffmpeg 指令
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    program: PathBuf,
}

impl FfmpegCommand {
    #[must_use]
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
        }
    }

    /// 啟動前檢查 ffmpeg 是否可用（`ffmpeg -version`）
    pub fn check_available(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("-version")
            .output()
            .with_context(|| format!("無法執行 ffmpeg: {}", self.program.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("ffmpeg 檢查失敗 ({}): {}", output.status, stderr.trim());
        }

        Ok(())
    }

    /// 擷取畫面：跳過開頭、只取場景變換處，再依最小間隔取樣，最多 [`MAX_FRAMES`] 張
    #[must_use]
    pub fn extract_frames(
        &self,
        video_path: &Path,
        frame_pattern: &Path,
        interval_secs: u32,
    ) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::extract_frames_args(video_path, frame_pattern, interval_secs))
            .stdin(Stdio::null());
        cmd
    }

    /// 將編號畫面組成循環播放的 GIF
    #[must_use]
    pub fn assemble_gif(&self, frame_pattern: &Path, output_path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::assemble_gif_args(frame_pattern, output_path))
            .stdin(Stdio::null());
        cmd
    }

    fn extract_frames_args(
        video_path: &Path,
        frame_pattern: &Path,
        interval_secs: u32,
    ) -> Vec<OsString> {
        let filter = format!("select=gt(scene\\,{SCENE_THRESHOLD}),fps=fps=1/{interval_secs}");

        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-ss".into(),
            START_OFFSET_SECS.to_string().into(),
            "-i".into(),
            video_path.as_os_str().to_owned(),
        ];
        args.extend(
            [
                "-vf".to_string(),
                filter,
                "-frames:v".to_string(),
                MAX_FRAMES.to_string(),
                "-vsync".to_string(),
                "vfr".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(frame_pattern.as_os_str().to_owned());
        args
    }

    fn assemble_gif_args(frame_pattern: &Path, output_path: &Path) -> Vec<OsString> {
        let filter =
            format!("scale={THUMBNAIL_WIDTH}:-1:flags=lanczos,setpts={PTS_MULTIPLIER}*PTS");

        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-f".into(),
            "image2".into(),
            "-framerate".into(),
            OUTPUT_FRAMERATE.to_string().into(),
            "-i".into(),
            frame_pattern.as_os_str().to_owned(),
        ];
        args.extend(
            [
                "-vf".to_string(),
                filter,
                "-loop".to_string(),
                "0".to_string(),
                "-f".to_string(),
                "gif".to_string(),
            ]
            .map(OsString::from),
        );
        args.push(output_path.as_os_str().to_owned());
        args
    }
}
