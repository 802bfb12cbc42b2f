use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// 縮圖檔的副檔名
pub const THUMBNAIL_EXTENSION: &str = "gif";

/// 掃描時發現的一部影片
///
/// 建立後不再修改；大小與修改時間只是掃描當下的快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoEntry {
    #[serde(serialize_with = "serialize_lossy_path")]
    pub path: PathBuf,
    #[serde(rename = "hash")]
    pub identifier: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub modified_at: DateTime<Local>,
}

impl VideoEntry {
    /// 縮圖檔名：`{identifier}.gif`
    #[must_use]
    pub fn thumbnail_file_name(&self) -> String {
        format!("{}.{THUMBNAIL_EXTENSION}", self.identifier)
    }

    /// 縮圖在指定資料夾中的完整路徑
    #[must_use]
    pub fn thumbnail_path(&self, thumbnail_dir: &Path) -> PathBuf {
        thumbnail_dir.join(self.thumbnail_file_name())
    }
}

// 非 UTF-8 路徑以替換字元輸出，避免整份目錄無法序列化
fn serialize_lossy_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
