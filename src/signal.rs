use anyhow::{Context, Result, bail};
use log::warn;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 設定 Ctrl-C 處理器，收到訊號後將旗標設為 `true`
///
/// 縮圖任務在每部影片開始前檢查旗標，HTTP 伺服器則據此優雅關閉。
pub fn setup_shutdown_signal() -> Result<Arc<AtomicBool>> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        warn!("收到中斷信號，正在安全關閉...");
    })
    .context("無法設定 Ctrl-C 處理器")?;

    Ok(shutdown_signal)
}

/// 長時間的同步工作（例如以內容計算識別碼的掃描）結束後檢查是否已收到中斷訊號
pub fn ensure_not_interrupted(shutdown_signal: &AtomicBool) -> Result<()> {
    if shutdown_signal.load(Ordering::SeqCst) {
        bail!("收到中斷信號，停止啟動");
    }
    Ok(())
}
