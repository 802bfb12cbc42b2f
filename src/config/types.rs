use crate::config::file_type::ExtensionSet;
use clap::ValueEnum;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

/// 預設的縮圖最小間隔秒數
pub const DEFAULT_FRAME_INTERVAL_SECS: u32 = 200;

/// 預設的縮圖資料夾名稱（位於工作目錄下）
pub const DEFAULT_THUMBNAIL_DIR_NAME: &str = "thumb";

/// 影片識別碼的產生方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HashStrategy {
    /// 以路徑計算（快速，但檔案改名後視為新影片）
    #[default]
    Path,
    /// 以檔案內容計算（改名不影響，但每次掃描都要讀完整個檔案）
    Content,
}

impl fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Content => write!(f, "content"),
        }
    }
}

/// 啟動時建立一次、之後不可變的設定
#[derive(Debug, Clone)]
pub struct Config {
    pub video_root: PathBuf,
    pub allowed_extensions: ExtensionSet,
    pub thumbnail_dir: PathBuf,
    pub frame_interval_secs: u32,
    pub hash_strategy: HashStrategy,
    pub listen_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub ffmpeg_program: PathBuf,
    pub workers: usize,
}
