use anyhow::Context;
use clap::Parser;
use yt_audio::{
    cli::{Args, run},
    configuration::Settings,
    downloader::Downloader,
    telemetry::init_subscriber,
    youtube::YoutubeProvider,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let configuration = Settings::new().context("Failed to read configuration.")?;
    init_subscriber(&configuration.telemetry_cfg.log_filter);

    let downloader = Downloader::new(YoutubeProvider::default(), &configuration.download_cfg);

    run(args, &downloader, &mut std::io::stdout().lock()).await?;
    Ok(())
}
