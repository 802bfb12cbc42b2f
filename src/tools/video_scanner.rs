use crate::config::ExtensionSet;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 遞迴掃描影片檔案
///
/// 回傳順序即為目錄走訪順序，不做排序。只要有任何一個目錄無法讀取
/// （包含根目錄不存在），整次掃描就會失敗，不會回傳不完整的結果。
pub fn scan_video_files(
    directory: &Path,
    allowed_extensions: &ExtensionSet,
) -> Result<Vec<PathBuf>> {
    let mut video_files = Vec::new();

    for entry in WalkDir::new(directory).follow_links(false) {
        let entry = entry.with_context(|| format!("掃描目錄失敗: {}", directory.display()))?;

        if entry.file_type().is_dir() {
            continue;
        }

        if allowed_extensions.matches(entry.path()) {
            video_files.push(entry.into_path());
        }
    }

    Ok(video_files)
}
