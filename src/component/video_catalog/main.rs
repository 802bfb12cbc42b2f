use super::video_entry::VideoEntry;
use crate::config::ExtensionSet;
use crate::tools::scan_video_files;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// 掃描影片根目錄並建立完整的影片目錄
///
/// 任何一個檔案無法計算識別碼或讀取中繼資料（例如在掃描後被刪除），
/// 整個建立流程就會失敗，不會回傳缺漏的目錄。
pub fn build_catalog<F>(
    root: &Path,
    allowed_extensions: &ExtensionSet,
    identifier_fn: F,
) -> Result<Vec<VideoEntry>>
where
    F: Fn(&Path) -> Result<String>,
{
    let video_paths = scan_video_files(root, allowed_extensions)?;
    debug!("掃描到 {} 個影片檔案: {}", video_paths.len(), root.display());

    let mut entries = Vec::with_capacity(video_paths.len());
    for path in video_paths {
        let identifier = identifier_fn(&path)
            .with_context(|| format!("無法計算識別碼: {}", path.display()))?;

        let metadata =
            fs::metadata(&path).with_context(|| format!("無法讀取檔案資訊: {}", path.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("無法取得修改時間: {}", path.display()))?;

        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        entries.push(VideoEntry {
            identifier,
            display_name,
            size_bytes: metadata.len(),
            modified_at: DateTime::<Local>::from(modified),
            path,
        });
    }

    info!("影片目錄建立完成: {} 部影片", entries.len());
    Ok(entries)
}
