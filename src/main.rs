use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::process::ExitCode;
use std::sync::Arc;
use video_thumbnailer::component::thumbnail_generator::FfmpegCommand;
use video_thumbnailer::component::{ThumbnailGenerator, build_catalog};
use video_thumbnailer::config::{Cli, Config};
use video_thumbnailer::init;
use video_thumbnailer::server;
use video_thumbnailer::signal::{ensure_not_interrupted, setup_shutdown_signal};
use video_thumbnailer::tools::identifier_fn;

#[tokio::main]
async fn main() -> ExitCode {
    init::init();

    match run(Cli::parse()).await {
        Ok(()) => {
            info!("Program exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    let shutdown_signal = setup_shutdown_signal()?;

    FfmpegCommand::new(&config.ffmpeg_program).check_available()?;

    info!(
        "掃描影片: root={}, ext={}, hash={}",
        config.video_root.display(),
        config.allowed_extensions,
        config.hash_strategy
    );
    let catalog = Arc::new(build_catalog(
        &config.video_root,
        &config.allowed_extensions,
        identifier_fn(config.hash_strategy),
    )?);
    ensure_not_interrupted(&shutdown_signal)?;

    let listener = server::bind(config.listen_addr).await?;
    let router = server::build_router(
        Arc::clone(&catalog),
        &config.thumbnail_dir,
        &config.static_dir,
    );

    let generator = ThumbnailGenerator::new(config, Arc::clone(&shutdown_signal));
    let videos = Arc::clone(&catalog);
    tokio::task::spawn_blocking(move || {
        if let Err(e) = generator.run(&videos) {
            // 暫存工作區無法建立時無法產生任何縮圖，直接結束程式
            error!("縮圖任務無法啟動: {e:#}");
            std::process::exit(1);
        }
    });

    server::serve(listener, router, shutdown_signal).await
}
