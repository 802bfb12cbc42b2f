pub mod file_type;
pub mod load;
pub mod types;

pub use file_type::{DEFAULT_VIDEO_EXTENSIONS, ExtensionSet};
pub use load::Cli;
pub use types::{
    Config, DEFAULT_FRAME_INTERVAL_SECS, DEFAULT_THUMBNAIL_DIR_NAME, HashStrategy,
};
