use std::io::Write;

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    domain::VideoReference,
    downloader::Downloader,
    error::{DownloadError, error_message},
    provider::Provider,
};

pub const USAGE_REMINDER: &str = "Please provide a YouTube link as an argument.";

/// The first argument is always the video, even a bare ID starting with `-`.
/// Anything after it is ignored.
#[derive(Parser, Debug, Clone)]
#[command(about = "Download the audio stream of a YouTube video")]
pub struct Args {
    /// YouTube video URL
    #[arg(allow_hyphen_values = true)]
    pub url: Option<String>,
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub ignored: Vec<String>,
}

/// Runs one invocation, writing every status line to `out`.
///
/// Download failures are reported on `out` and are not errors of this
/// function; only failing to write to `out` is.
#[instrument(name = "Running CLI", skip_all)]
pub async fn run<P, W>(args: Args, downloader: &Downloader<P>, out: &mut W) -> std::io::Result<()>
where
    P: Provider,
    W: Write,
{
    let Some(url) = args.url else {
        writeln!(out, "{}", USAGE_REMINDER)?;
        return Ok(());
    };
    if !args.ignored.is_empty() {
        debug!("Ignoring extra arguments: {:?}", args.ignored);
    }

    let selection = match VideoReference::parse(url) {
        Ok(url) => downloader.select_audio(&url).await,
        Err(e) => Err(DownloadError::InvalidReference(e)),
    };
    let result = match selection {
        Ok(selection) => {
            writeln!(out, "Downloading audio: {}", selection.title)?;
            out.flush()?;
            downloader.save(selection).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(downloaded) => {
            debug!("Saved '{}' to {}", downloaded.title, downloaded.path.display());
            writeln!(out, "Download complete!")
        }
        Err(e @ DownloadError::NoAudioStream { .. }) => writeln!(out, "{}", e),
        Err(e) => {
            debug!("Download failed: {:?}", e);
            writeln!(out, "An error occurred: {}", error_message(&e))
        }
    }
}
