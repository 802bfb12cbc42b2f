//! 唯讀 HTTP 介面：影片目錄 JSON 與縮圖靜態檔案

mod routes;

pub use routes::{AppState, build_router};

use anyhow::{Context, Result};
use axum::Router;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;

const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// 綁定監聽位址
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("無法監聽 {addr}"))
}

/// 執行 HTTP 伺服器，直到關閉旗標被設定
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown_signal: Arc<AtomicBool>,
) -> Result<()> {
    let addr = listener.local_addr().context("無法取得監聽位址")?;
    info!("HTTP 伺服器啟動: http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_signal))
        .await
        .context("HTTP 伺服器錯誤")?;

    info!("HTTP 伺服器已關閉");
    Ok(())
}

async fn wait_for_shutdown(shutdown_signal: Arc<AtomicBool>) {
    let mut interval = tokio::time::interval(SHUTDOWN_POLL_INTERVAL);
    while !shutdown_signal.load(Ordering::SeqCst) {
        interval.tick().await;
    }
}
