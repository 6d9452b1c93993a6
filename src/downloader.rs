use std::path::{Path, PathBuf};

use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{info, instrument, warn};

use crate::{
    configuration::DownloadSettings,
    domain::{MediaStream, VideoReference},
    error::{DownloadError, ProviderError},
    provider::Provider,
};

const FALLBACK_FILE_STEM: &str = "audio";

/// The audio-only stream picked for a video, and where it will be written.
#[derive(Debug, Clone)]
pub struct AudioSelection {
    pub title: String,
    pub stream: MediaStream,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Downloaded {
    pub title: String,
    pub path: PathBuf,
    pub bytes_written: u64,
}

pub struct Downloader<P> {
    provider: P,
    output_dir: PathBuf,
    file_extension: String,
}

impl<P: Provider> Downloader<P> {
    pub fn new(provider: P, settings: &DownloadSettings) -> Self {
        Self {
            provider,
            output_dir: settings.output_dir.clone(),
            file_extension: settings.file_extension.clone(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves `url` and selects its first audio-only stream.
    #[instrument(name = "Selecting audio stream", skip(self), fields(url = %url))]
    pub async fn select_audio(
        &self,
        url: &VideoReference,
    ) -> Result<AudioSelection, DownloadError> {
        let descriptor = self.provider.resolve(url).await?;

        let Some(stream) = descriptor.first_audio_only().cloned() else {
            info!("No audio-only stream among {} streams", descriptor.streams.len());
            return Err(DownloadError::NoAudioStream {
                title: descriptor.title,
            });
        };

        info!(
            "Selected stream {} ({}) for '{}'",
            stream.itag, stream.mime_type, descriptor.title
        );
        let path = self.output_path(&descriptor.title);

        Ok(AudioSelection {
            title: descriptor.title,
            stream,
            path,
        })
    }

    /// Writes the selected stream to its destination, replacing any file
    /// already there. A failed write leaves no file behind.
    #[instrument(name = "Saving audio stream", skip_all, fields(path = %selection.path.display()))]
    pub async fn save(&self, selection: AudioSelection) -> Result<Downloaded, DownloadError> {
        let AudioSelection { title, stream, path } = selection;

        let mut file = File::create(&path)
            .await
            .map_err(|source| DownloadError::Io {
                path: path.clone(),
                source,
            })?;

        let result = match self.provider.fetch(&stream, &mut file).await {
            Ok(bytes_written) => file
                .flush()
                .await
                .map(|_| bytes_written)
                .map_err(ProviderError::Write),
            Err(e) => Err(e),
        };
        drop(file);

        match result {
            Ok(bytes_written) => {
                info!("Wrote {} bytes to {}", bytes_written, path.display());
                Ok(Downloaded {
                    title,
                    path,
                    bytes_written,
                })
            }
            Err(e) => {
                discard_partial_file(&path).await;
                Err(match e {
                    ProviderError::Write(source) => DownloadError::Io { path, source },
                    other => DownloadError::Provider(other),
                })
            }
        }
    }

    pub async fn download_audio(&self, url: &VideoReference) -> Result<Downloaded, DownloadError> {
        let selection = self.select_audio(url).await?;
        self.save(selection).await
    }

    pub fn output_path(&self, title: &str) -> PathBuf {
        self.output_dir.join(output_file_name(title, &self.file_extension))
    }
}

/// `<title>.<extension>`, with characters that cannot appear in a single
/// path component replaced by `_`.
pub fn output_file_name(title: &str, extension: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect();
    let stem = match stem.trim() {
        "" | "." | ".." => FALLBACK_FILE_STEM,
        _ => stem.as_str(),
    };
    format!("{}.{}", stem, extension)
}

async fn discard_partial_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove partial file {}: {}", path.display(), e);
    }
}
