use crate::config::HashStrategy;
use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const BUFFER_SIZE: usize = 4 * 1024 * 1024; // 4MB buffer

/// 由影片路徑計算識別碼的函式
///
/// 目錄建立器只依賴這個簽章，不需要知道目前使用哪一種策略。
pub type IdentifierFn = fn(&Path) -> Result<String>;

/// 依設定的策略取得對應的識別碼函式
#[must_use]
pub fn identifier_fn(strategy: HashStrategy) -> IdentifierFn {
    match strategy {
        HashStrategy::Path => path_identifier,
        HashStrategy::Content => calculate_file_hash,
    }
}

/// 以路徑計算識別碼：路徑位元組先做 Base64，再取 SHA-256
///
/// 不會讀取檔案本身，檔案不存在也能計算。
pub fn path_identifier(path: &Path) -> Result<String> {
    let encoded = STANDARD.encode(path.as_os_str().as_encoded_bytes());
    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// 以檔案內容計算識別碼（BLAKE3）
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("讀取檔案失敗: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}
