use reqwest::Client;
use rusty_ytdl::stream::{NonLiveStream, NonLiveStreamOptions, Stream};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

use crate::{domain::MediaStream, error::ProviderError};

/// Bytes requested per ranged request, matching rusty_ytdl's own default.
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

#[instrument(
    name = "Downloading stream",
    skip_all,
    fields(itag = stream.itag, mime = %stream.mime_type)
)]
pub async fn download_stream<W>(
    client: &Client,
    stream: &MediaStream,
    dl_chunk_size: u64,
    sink: &mut W,
) -> Result<u64, ProviderError>
where
    W: AsyncWrite + Unpin,
{
    info!("Downloading audio from YouTube...");

    let content_length = match stream.content_length {
        Some(length) if length > 0 => length,
        _ => lookup_content_length(client, &stream.url).await?,
    };

    let audio_stream = NonLiveStream::new(NonLiveStreamOptions {
        client: None,
        link: stream.url.clone(),
        content_length,
        dl_chunk_size,
        start: 0,
        end: dl_chunk_size,
    })
    .map_err(ProviderError::Stream)?;

    let mut written = 0;
    while let Some(chunk) = audio_stream.chunk().await.map_err(ProviderError::Stream)? {
        sink.write_all(&chunk).await.map_err(ProviderError::Write)?;
        written += chunk.len() as u64;
        debug!("Downloaded {} bytes so far", written);
    }

    if written != content_length {
        return Err(ProviderError::Incomplete {
            expected: content_length,
            received: written,
        });
    }

    info!("Downloaded {} bytes from YouTube", written);
    Ok(written)
}

/// Formats without a `content_length` are sized from the response headers,
/// the same way `rusty_ytdl::Video::stream` does it.
async fn lookup_content_length(client: &Client, url: &str) -> Result<u64, ProviderError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status));
    }
    match response.content_length() {
        Some(length) if length > 0 => Ok(length),
        _ => Err(anyhow::anyhow!("Media host did not report a content length").into()),
    }
}
