use tokio::io::AsyncWrite;

use crate::{
    domain::{MediaStream, StreamDescriptor, VideoReference},
    error::ProviderError,
};

/// A video-hosting backend able to list a video's streams and hand over
/// the bytes of one of them.
///
/// The downloader only ever talks to this trait; site-specific extraction
/// stays inside the implementation.
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// Resolves `url` to the video's title and its available streams.
    async fn resolve(&self, url: &VideoReference) -> Result<StreamDescriptor, ProviderError>;

    /// Copies the payload of `stream` into `sink`, returning the number of
    /// bytes written. Failures writing to `sink` surface as
    /// [`ProviderError::Write`].
    async fn fetch<W>(&self, stream: &MediaStream, sink: &mut W) -> Result<u64, ProviderError>
    where
        W: AsyncWrite + Unpin;
}
