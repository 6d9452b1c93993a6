/// What a stream carries, as classified by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    AudioOnly,
    VideoOnly,
    AudioVideo,
}

impl StreamKind {
    pub fn from_tracks(has_audio: bool, has_video: bool) -> Option<Self> {
        match (has_audio, has_video) {
            (true, false) => Some(Self::AudioOnly),
            (false, true) => Some(Self::VideoOnly),
            (true, true) => Some(Self::AudioVideo),
            (false, false) => None,
        }
    }
}

/// One downloadable encoding of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStream {
    pub itag: u64,
    pub kind: StreamKind,
    pub mime_type: String,
    pub content_length: Option<u64>,
    pub url: String,
}

impl MediaStream {
    pub fn is_audio_only(&self) -> bool {
        self.kind == StreamKind::AudioOnly
    }
}

/// Everything a provider knows about a video after resolving it.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    pub title: String,
    pub streams: Vec<MediaStream>,
}

impl StreamDescriptor {
    /// First audio-only stream in provider order.
    pub fn first_audio_only(&self) -> Option<&MediaStream> {
        self.streams.iter().find(|s| s.is_audio_only())
    }
}
