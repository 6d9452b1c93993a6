use claims::{assert_err, assert_matches, assert_ok};
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{method, path},
};
use yt_audio::{
    domain::{MediaStream, StreamKind, VideoReference},
    error::ProviderError,
    provider::Provider,
    youtube::YoutubeProvider,
};

/// Media host serving `body`, honouring `Range: bytes=<start>-[<end>]`.
struct RangedBody(Vec<u8>);

impl Respond for RangedBody {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let range = request
            .headers
            .get("range")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("bytes="))
            .and_then(|value| value.split_once('-'));

        let Some((start, end)) = range else {
            return ResponseTemplate::new(200).set_body_bytes(self.0.clone());
        };
        let len = self.0.len();
        let start = start.parse::<usize>().unwrap_or(0).min(len);
        let end = end
            .parse::<usize>()
            .map_or(len, |end| (end + 1).min(len))
            .max(start);
        ResponseTemplate::new(206).set_body_bytes(self.0[start..end].to_vec())
    }
}

fn audio_stream(server: &MockServer, content_length: Option<u64>) -> MediaStream {
    MediaStream {
        itag: 251,
        kind: StreamKind::AudioOnly,
        mime_type: "audio/webm; codecs=\"opus\"".to_string(),
        content_length,
        url: format!("{}/videoplayback", server.uri()),
    }
}

async fn serve(server: &MockServer, body: &[u8]) {
    Mock::given(path("/videoplayback"))
        .and(method("GET"))
        .respond_with(RangedBody(body.to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetch_streams_the_whole_body_into_the_sink() {
    let server = MockServer::start().await;
    serve(&server, b"opus audio").await;
    let provider = YoutubeProvider::default();
    let mut sink = Vec::new();

    let written = assert_ok!(provider.fetch(&audio_stream(&server, Some(10)), &mut sink).await);

    assert_eq!(written, 10);
    assert_eq!(sink, b"opus audio");
}

#[tokio::test]
async fn fetch_stitches_several_chunks_together() {
    let server = MockServer::start().await;
    let body = (0..=255u8).cycle().take(1000).collect::<Vec<_>>();
    serve(&server, &body).await;
    let provider = YoutubeProvider::default().with_chunk_size(64);
    let mut sink = Vec::new();

    let written = assert_ok!(provider.fetch(&audio_stream(&server, Some(1000)), &mut sink).await);

    assert_eq!(written, 1000);
    assert_eq!(sink, body);
    let requests = server.received_requests().await.unwrap();
    assert!(requests.len() > 1, "expected ranged requests, got {}", requests.len());
}

#[tokio::test]
async fn fetch_sizes_streams_without_a_content_length() {
    let server = MockServer::start().await;
    serve(&server, b"opus audio").await;
    let provider = YoutubeProvider::default();
    let mut sink = Vec::new();

    let written = assert_ok!(provider.fetch(&audio_stream(&server, None), &mut sink).await);

    assert_eq!(written, 10);
    assert_eq!(sink, b"opus audio");
}

#[tokio::test]
async fn fetch_fails_when_the_stream_ends_early() {
    let server = MockServer::start().await;
    Mock::given(path("/videoplayback"))
        .respond_with(ResponseTemplate::new(206))
        .mount(&server)
        .await;
    let provider = YoutubeProvider::default();
    let mut sink = Vec::new();

    let err = assert_err!(provider.fetch(&audio_stream(&server, Some(1000)), &mut sink).await);

    assert_matches!(
        err,
        ProviderError::Incomplete {
            expected: 1000,
            received: 0
        }
    );
}

#[tokio::test]
async fn fetch_fails_when_the_body_is_shorter_than_announced() {
    let server = MockServer::start().await;
    serve(&server, b"only ten b").await;
    let provider = YoutubeProvider::default().with_chunk_size(4);
    let mut sink = Vec::new();

    let err = assert_err!(provider.fetch(&audio_stream(&server, Some(40)), &mut sink).await);

    assert_matches!(err, ProviderError::Incomplete { expected: 40, received: 10 });
}

#[tokio::test]
async fn fetch_fails_on_a_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(path("/videoplayback"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    let provider = YoutubeProvider::default();
    let mut sink = Vec::new();

    let err = assert_err!(provider.fetch(&audio_stream(&server, None), &mut sink).await);

    assert_matches!(err, ProviderError::Status(status) if status.as_u16() == 403);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn resolve_rejects_references_that_are_not_videos() {
    let provider = YoutubeProvider::default();
    let reference = VideoReference::parse("not a youtube video".to_string()).unwrap();

    let err = assert_err!(provider.resolve(&reference).await);

    assert_matches!(err, ProviderError::InvalidUrl(url) if url == "not a youtube video");
}
