use airwave::radio::{NowPlayingClient, RadioError};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer, timeout: Duration) -> NowPlayingClient {
    NowPlayingClient::new(&server.uri(), "test_station", timeout).unwrap()
}

#[tokio::test]
async fn fetches_now_playing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/nowplaying/test_station"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "now_playing": {
                "song": {"id": "abc", "title": "Song", "artist": "Band", "art": "https://x/a.jpg"},
                "elapsed": 12,
                "duration": 180
            },
            "song_history": [{"song": {"title": "Before", "artist": "Band"}, "played_at": 1700000000}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = client(&server, Duration::from_secs(5))
        .fetch_now_playing()
        .await
        .unwrap();

    let song = payload.current_song().unwrap();
    assert_eq!(song.display_title(), "Song");
    assert_eq!(song.cover_url(), Some("https://x/a.jpg"));
    assert_eq!(payload.history().len(), 1);
    assert_eq!(
        payload.progress().map(|p| p.duration),
        Some(Some(Duration::from_secs(180)))
    );
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_secs(5))
        .fetch_now_playing()
        .await
        .unwrap_err();
    assert!(matches!(err, RadioError::Status(500)));
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn garbage_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_secs(5))
        .fetch_now_playing()
        .await
        .unwrap_err();
    assert!(matches!(err, RadioError::MalformedResponse(_)));
}

#[tokio::test]
async fn slow_station_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let err = client(&server, Duration::from_millis(200))
        .fetch_now_playing()
        .await
        .unwrap_err();
    assert!(matches!(err, RadioError::Network(_)));
}
