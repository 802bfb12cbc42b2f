use crate::config::file_type::{DEFAULT_VIDEO_EXTENSIONS, ExtensionSet};
use crate::config::types::{
    Config, DEFAULT_FRAME_INTERVAL_SECS, DEFAULT_THUMBNAIL_DIR_NAME, HashStrategy,
};
use crate::tools::{ensure_directory_exists, validate_directory_exists};
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// 命令列參數（每個參數都可以用環境變數取代）
#[derive(Debug, Clone, Parser)]
#[command(name = "video_thumbnailer", version, about = "掃描影片並產生動態 GIF 縮圖")]
pub struct Cli {
    /// (必填) 影片根目錄
    #[arg(long = "vdir", env = "THUMBNAILER_VDIR")]
    pub video_root: Option<PathBuf>,

    /// 允許的影片副檔名，以空白分隔
    #[arg(long = "ext", env = "THUMBNAILER_EXT", default_value = DEFAULT_VIDEO_EXTENSIONS)]
    pub extensions: String,

    /// 縮圖輸出資料夾（必須是絕對路徑）；未指定時使用工作目錄下的 `thumb`
    #[arg(long = "tdir", env = "THUMBNAILER_TDIR")]
    pub thumbnail_dir: Option<PathBuf>,

    /// 動態縮圖的最小取樣間隔（秒）
    #[arg(long = "tint", env = "THUMBNAILER_TINT", default_value_t = DEFAULT_FRAME_INTERVAL_SECS)]
    pub frame_interval_secs: u32,

    /// 識別碼計算方式
    #[arg(long = "hash", env = "THUMBNAILER_HASH", value_enum, default_value_t = HashStrategy::Path)]
    pub hash_strategy: HashStrategy,

    /// HTTP 監聽位址
    #[arg(long = "listen", env = "THUMBNAILER_LISTEN", default_value = "0.0.0.0:80")]
    pub listen_addr: SocketAddr,

    /// 前端靜態檔案資料夾
    #[arg(long = "static-dir", env = "THUMBNAILER_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// ffmpeg 執行檔
    #[arg(long = "ffmpeg", env = "THUMBNAILER_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg_program: PathBuf,

    /// 同時產生縮圖的數量
    #[arg(long = "workers", env = "THUMBNAILER_WORKERS", default_value_t = 1)]
    pub workers: usize,
}

impl Config {
    /// 由命令列參數建立設定，並在需要時建立縮圖資料夾
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("無法取得目前工作目錄")?;
        Self::from_cli_in(cli, &cwd)
    }

    /// 與 [`Config::from_cli`] 相同，但以 `working_dir` 作為預設縮圖資料夾的位置
    pub fn from_cli_in(cli: Cli, working_dir: &Path) -> Result<Self> {
        let Some(video_root) = cli.video_root else {
            bail!("未指定影片根目錄 (--vdir)");
        };
        validate_directory_exists(&video_root)?;
        let video_root = std::path::absolute(&video_root)
            .with_context(|| format!("無法取得絕對路徑: {}", video_root.display()))?;

        if cli.frame_interval_secs == 0 {
            bail!("縮圖間隔必須大於 0 秒");
        }
        if cli.workers == 0 {
            bail!("workers 必須至少為 1");
        }

        let allowed_extensions = ExtensionSet::parse(&cli.extensions);
        if allowed_extensions.is_empty() {
            bail!("副檔名清單不可為空");
        }

        let thumbnail_dir = resolve_thumbnail_dir(cli.thumbnail_dir, working_dir)?;

        Ok(Self {
            video_root,
            allowed_extensions,
            thumbnail_dir,
            frame_interval_secs: cli.frame_interval_secs,
            hash_strategy: cli.hash_strategy,
            listen_addr: cli.listen_addr,
            static_dir: cli.static_dir,
            ffmpeg_program: cli.ffmpeg_program,
            workers: cli.workers,
        })
    }
}

/// 未指定時使用 `{working_dir}/thumb`；指定的路徑必須是絕對路徑
fn resolve_thumbnail_dir(configured: Option<PathBuf>, working_dir: &Path) -> Result<PathBuf> {
    let thumbnail_dir = match configured {
        Some(dir) => {
            if !dir.is_absolute() {
                bail!("縮圖資料夾必須是絕對路徑: {}", dir.display());
            }
            dir
        }
        None => working_dir.join(DEFAULT_THUMBNAIL_DIR_NAME),
    };

    ensure_directory_exists(&thumbnail_dir)
        .with_context(|| format!("無法建立縮圖資料夾: {}", thumbnail_dir.display()))?;

    Ok(thumbnail_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["video_thumbnailer"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let videos = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let cli = parse(&["--vdir", videos.path().to_str().unwrap()]);

        let config = Config::from_cli_in(cli, work.path()).unwrap();

        assert_eq!(config.allowed_extensions, ExtensionSet::default());
        assert_eq!(config.frame_interval_secs, 200);
        assert_eq!(config.hash_strategy, HashStrategy::Path);
        assert_eq!(config.workers, 1);
        assert!(config.video_root.is_absolute());
        assert_eq!(config.thumbnail_dir, work.path().join("thumb"));
        // 預設縮圖資料夾會自動建立
        assert!(config.thumbnail_dir.is_dir());
    }

    #[test]
    fn test_missing_video_root_is_rejected() {
        let work = TempDir::new().unwrap();
        let cli = Cli {
            video_root: None,
            ..parse(&[])
        };
        assert!(Config::from_cli_in(cli, work.path()).is_err());
    }

    #[test]
    fn test_nonexistent_video_root_is_rejected() {
        let work = TempDir::new().unwrap();
        let missing = work.path().join("nope");
        let cli = parse(&["--vdir", missing.to_str().unwrap()]);
        assert!(Config::from_cli_in(cli, work.path()).is_err());
    }

    #[test]
    fn test_relative_thumbnail_dir_is_rejected() {
        let videos = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let cli = parse(&[
            "--vdir",
            videos.path().to_str().unwrap(),
            "--tdir",
            "relative/thumb",
        ]);
        assert!(Config::from_cli_in(cli, work.path()).is_err());
    }

    #[test]
    fn test_explicit_options() {
        let videos = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let thumbs = work.path().join("custom");
        let cli = parse(&[
            "--vdir",
            videos.path().to_str().unwrap(),
            "--tdir",
            thumbs.to_str().unwrap(),
            "--ext",
            "mov .mp4",
            "--tint",
            "30",
            "--hash",
            "content",
            "--workers",
            "4",
        ]);

        let config = Config::from_cli_in(cli, work.path()).unwrap();

        assert_eq!(config.thumbnail_dir, thumbs);
        assert!(thumbs.is_dir());
        assert!(config.allowed_extensions.contains(".mov"));
        assert_eq!(config.frame_interval_secs, 30);
        assert_eq!(config.hash_strategy, HashStrategy::Content);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn test_zero_interval_and_workers_are_rejected() {
        let videos = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let root = videos.path().to_str().unwrap();

        let cli = parse(&["--vdir", root, "--tint", "0"]);
        assert!(Config::from_cli_in(cli, work.path()).is_err());

        let cli = parse(&["--vdir", root, "--workers", "0"]);
        assert!(Config::from_cli_in(cli, work.path()).is_err());
    }
}
