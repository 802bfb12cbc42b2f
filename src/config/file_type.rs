use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 預設允許的影片副檔名（以空白分隔）
pub const DEFAULT_VIDEO_EXTENSIONS: &str = ".mkv .mp4 .webm .avi";

/// 允許掃描的副檔名集合
///
/// 每個項目都包含開頭的 `.`，比對時區分大小寫（`.MKV` 不等於 `.mkv`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: HashSet<String>,
}

impl ExtensionSet {
    /// 解析以空白分隔的副檔名清單，缺少 `.` 的項目會自動補上
    #[must_use]
    pub fn parse(list: &str) -> Self {
        let extensions = list
            .split_whitespace()
            .map(|ext| {
                if ext.starts_with('.') {
                    ext.to_string()
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        Self { extensions }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// 檔案的副檔名是否在集合中；沒有副檔名或非 UTF-8 的副檔名一律不符合
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&format!(".{ext}")))
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::parse(DEFAULT_VIDEO_EXTENSIONS)
    }
}

impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorted: Vec<&str> = self.extensions.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        write!(f, "{}", sorted.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_list() {
        let set = ExtensionSet::default();
        assert!(set.contains(".mkv"));
        assert!(set.contains(".mp4"));
        assert!(set.contains(".webm"));
        assert!(set.contains(".avi"));
        assert!(!set.contains(".mov"));
    }

    #[test]
    fn test_parse_adds_missing_dot_and_ignores_extra_spaces() {
        let set = ExtensionSet::parse("  mp4   .mkv ");
        assert!(set.contains(".mp4"));
        assert!(set.contains(".mkv"));
        assert_eq!(set.to_string(), ".mkv .mp4");
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        let set = ExtensionSet::parse(".mkv .mp4");
        assert!(set.matches(Path::new("/videos/a.mp4")));
        assert!(!set.matches(Path::new("/videos/c.MKV")));
        assert!(!set.matches(Path::new("/videos/b.txt")));
    }

    #[test]
    fn test_matches_uses_last_extension_only() {
        let set = ExtensionSet::parse(".mp4");
        assert!(set.matches(Path::new("clip.part1.mp4")));
        assert!(!set.matches(Path::new("clip.mp4.bak")));
        assert!(!set.matches(Path::new("mp4")));
    }

    #[test]
    fn test_empty_list() {
        let set = ExtensionSet::parse("   ");
        assert!(set.is_empty());
        assert!(!set.matches(Path::new("a.mp4")));
    }
}
