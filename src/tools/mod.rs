mod file_hasher;
mod path_validator;
mod video_scanner;

pub use file_hasher::{IdentifierFn, calculate_file_hash, identifier_fn, path_identifier};
pub use path_validator::{ensure_directory_exists, validate_directory_exists};
pub use video_scanner::scan_video_files;
