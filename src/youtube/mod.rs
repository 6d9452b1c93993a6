use rusty_ytdl::{Video, VideoFormat};
use tokio::io::AsyncWrite;
use tracing::{debug, info, instrument, warn};

use crate::{
    domain::{MediaStream, StreamDescriptor, StreamKind, VideoReference},
    error::ProviderError,
    provider::Provider,
};

mod download;

use download::{DEFAULT_CHUNK_SIZE, download_stream};

/// [`Provider`] backed by `rusty_ytdl` for both metadata and media bytes.
#[derive(Clone, Debug)]
pub struct YoutubeProvider {
    client: reqwest::Client,
    dl_chunk_size: u64,
}

impl YoutubeProvider {
    pub fn with_chunk_size(mut self, dl_chunk_size: u64) -> Self {
        self.dl_chunk_size = dl_chunk_size.max(1);
        self
    }
}

impl Default for YoutubeProvider {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
            dl_chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Provider for YoutubeProvider {
    #[instrument(name = "Resolving YouTube video", skip(self), fields(url = %url))]
    async fn resolve(&self, url: &VideoReference) -> Result<StreamDescriptor, ProviderError> {
        let video = Video::new(url.as_ref()).map_err(|e| {
            debug!("Rejected by rusty_ytdl: {}", e);
            ProviderError::InvalidUrl(url.to_string())
        })?;
        let video_info = video.get_info().await.map_err(ProviderError::Resolve)?;

        let title = video_info.video_details.title;
        let streams = video_info
            .formats
            .iter()
            .filter_map(media_stream_from_format)
            .collect::<Vec<_>>();

        info!("Found video '{}' with {} streams", title, streams.len());

        Ok(StreamDescriptor { title, streams })
    }

    async fn fetch<W>(&self, stream: &MediaStream, sink: &mut W) -> Result<u64, ProviderError>
    where
        W: AsyncWrite + Unpin,
    {
        download_stream(&self.client, stream, self.dl_chunk_size, sink).await
    }
}

fn media_stream_from_format(format: &VideoFormat) -> Option<MediaStream> {
    let Some(kind) = StreamKind::from_tracks(format.has_audio, format.has_video) else {
        warn!("Skipping format {} with neither audio nor video", format.itag);
        return None;
    };

    Some(MediaStream {
        itag: format.itag,
        kind,
        mime_type: format.mime_type.mime.to_string(),
        content_length: format
            .content_length
            .as_deref()
            .and_then(|len| len.parse().ok()),
        url: format.url.clone(),
    })
}
