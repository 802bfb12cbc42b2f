//! 動態縮圖產生元件
//!
//! 每部影片兩次 ffmpeg 呼叫：
//! 1. 擷取場景變換處的畫面到暫存工作區
//! 2. 將畫面組成 GIF，改名發布到縮圖資料夾

mod ffmpeg_command;
mod main;
mod thumbnail_task;

pub use ffmpeg_command::{
    FfmpegCommand, MAX_FRAMES, OUTPUT_FRAMERATE, PTS_MULTIPLIER, SCENE_THRESHOLD,
    START_OFFSET_SECS, THUMBNAIL_WIDTH,
};
pub use main::{GenerationResult, ThumbnailGenerator};
pub use thumbnail_task::{
    GenerationFailure, GenerationStep, STAGING_SUFFIX, ThumbnailTask, remove_stale_staging_files,
};
