use std::path::PathBuf;

/// Failure raised by a [`Provider`](crate::provider::Provider) while
/// resolving a video or fetching one of its streams.
#[derive(thiserror::Error)]
pub enum ProviderError {
    #[error("{0} is not a valid video URL")]
    InvalidUrl(String),
    #[error("Failed to resolve video")]
    Resolve(#[source] rusty_ytdl::VideoError),
    #[error("Failed to fetch stream")]
    Http(#[from] reqwest::Error),
    #[error("Media host answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to stream audio")]
    Stream(#[source] rusty_ytdl::VideoError),
    #[error("Stream ended after {received} of {expected} bytes")]
    Incomplete { expected: u64, received: u64 },
    #[error("Failed to write stream data")]
    Write(#[source] std::io::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(thiserror::Error)]
pub enum DownloadError {
    #[error("{0}")]
    InvalidReference(String),
    #[error("No audio stream found for this video.")]
    NoAudioStream { title: String },
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl std::fmt::Debug for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Renders `e` followed by every `source()` in its chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// One-line message with each distinct cause appended, for console output.
pub fn error_message(e: &impl std::error::Error) -> String {
    let mut message = e.to_string();
    let mut current = e.source();
    while let Some(cause) = current {
        let cause_msg = cause.to_string();
        if !message.contains(&cause_msg) {
            message.push_str(": ");
            message.push_str(&cause_msg);
        }
        current = cause.source();
    }
    message
}
