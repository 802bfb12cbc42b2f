//! 影片目錄元件
//!
//! 掃描 → 計算識別碼 → 讀取檔案資訊，一次建立完成後不再變動。

mod main;
mod video_entry;

pub use main::build_catalog;
pub use video_entry::{THUMBNAIL_EXTENSION, VideoEntry};
