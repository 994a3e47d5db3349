//! Tests for the catalog/source API client.
//!
//! These tests use mock servers to verify client behavior without requiring
//! a real backend.

use mizu_client::{CatalogClient, ClientConfig, ClientError};
use mizu_core::{AudioCategory, EpisodeId};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> CatalogClient {
    CatalogClient::new(ClientConfig::new(mock_server.uri())).unwrap()
}

// =============================================================================
// Episode Catalog Tests
// =============================================================================

mod episodes {
    use super::*;

    #[tokio::test]
    async fn fetches_and_indexes_catalog() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episodes/show-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "episodes": [
                    {"episodeId": "show-1?ep=102", "number": 2, "title": "Second"},
                    {"episodeId": "show-1?ep=101", "number": 1, "title": "First"},
                    {"episodeId": "show-1?ep=104", "number": 4, "title": "Fourth"}
                ],
                "totalEpisodes": 12
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let catalog = client.fetch_episodes("show-1").await.unwrap();

        assert_eq!(catalog.total_count(), 12);
        assert_eq!(catalog.episodes().len(), 3);

        let first = catalog.find_by_episode_id("show-1?ep=101").unwrap();
        assert_eq!(first.title, "First");
        assert_eq!(catalog.find_next(first).unwrap().number, 2);

        // 3 is missing, so episode 2 has no successor.
        let second = catalog.find_by_number(2).unwrap();
        assert!(catalog.find_next(second).is_none());
    }

    #[tokio::test]
    async fn server_error_is_reported_with_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episodes/show-1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.fetch_episodes("show-1").await;

        match result.unwrap_err() {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert!(message.contains("upstream exploded"));
            }
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episodes/show-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.fetch_episodes("show-1").await;

        match result.unwrap_err() {
            ClientError::ParseError(_) => {}
            e => panic!("Expected ParseError, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_distinguished() {
        let client = CatalogClient::new(ClientConfig::new("http://127.0.0.1:9")).unwrap();

        let result = client.fetch_episodes("show-1").await;
        match result.unwrap_err() {
            ClientError::ServerUnreachable(_) | ClientError::Request(_) => {}
            e => panic!("Expected ServerUnreachable or Request, got: {:?}", e),
        }
    }
}

// =============================================================================
// Source Resolution Tests
// =============================================================================

mod sources {
    use super::*;

    #[tokio::test]
    async fn selects_first_source_and_default_caption() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episode-srcs"))
            .and(query_param("id", "show-1?ep=101"))
            .and(query_param("server", "hd-1"))
            .and(query_param("category", "sub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sources": [
                    {"url": "https://cdn.example/primary.m3u8", "type": "hls"},
                    {"url": "https://cdn.example/backup.m3u8", "type": "hls"}
                ],
                "tracks": [
                    {"kind": "captions", "label": "Spanish", "file": "a.vtt", "default": false},
                    {"kind": "captions", "label": "English", "file": "b.vtt", "default": true}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let episode = EpisodeId::new("show-1?ep=101");
        let resolution = client
            .resolve_sources(&episode, AudioCategory::Sub)
            .await
            .unwrap();

        assert_eq!(resolution.source_url, "https://cdn.example/primary.m3u8");
        assert_eq!(resolution.caption_tracks.len(), 2);
        assert_eq!(resolution.default_caption.as_deref(), Some("b.vtt"));
    }

    #[tokio::test]
    async fn category_is_forwarded_to_the_api() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episode-srcs"))
            .and(query_param("category", "dub"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sources": [{"url": "https://cdn.example/dub.m3u8"}],
                "tracks": []
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let episode = EpisodeId::new("show-1?ep=101");
        let resolution = client
            .resolve_sources(&episode, AudioCategory::Dub)
            .await
            .unwrap();

        assert_eq!(resolution.source_url, "https://cdn.example/dub.m3u8");
        assert!(resolution.default_caption.is_none());
    }

    #[tokio::test]
    async fn zero_sources_is_no_source_available() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episode-srcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "sources": [],
                "tracks": []
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let episode = EpisodeId::new("show-1?ep=101");
        let result = client.resolve_sources(&episode, AudioCategory::Sub).await;

        match result.unwrap_err() {
            ClientError::NoSourceAvailable {
                episode_id,
                category,
            } => {
                assert_eq!(episode_id, "show-1?ep=101");
                assert_eq!(category, AudioCategory::Sub);
            }
            e => panic!("Expected NoSourceAvailable, got: {:?}", e),
        }
    }

    #[tokio::test]
    async fn missing_sources_field_is_no_source_available() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/episode-srcs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let episode = EpisodeId::new("show-1?ep=101");
        let result = client.resolve_sources(&episode, AudioCategory::Sub).await;

        assert!(matches!(
            result.unwrap_err(),
            ClientError::NoSourceAvailable { .. }
        ));
    }
}

// =============================================================================
// Title Metadata Tests
// =============================================================================

mod title_info {
    use super::*;

    #[tokio::test]
    async fn fetches_overview_and_side_lists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/info"))
            .and(query_param("id", "show-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "anime": {
                    "info": {
                        "id": "show-1",
                        "name": "Attack on River",
                        "poster": "https://img.example/show-1.jpg",
                        "description": "A show about a river.",
                        "stats": {"episodes": {"sub": 12, "dub": 8}}
                    },
                    "moreInfo": {"studios": "River Animation"}
                },
                "mostPopularAnimes": [
                    {"id": "other-2", "name": "Other Show", "poster": null}
                ],
                "relatedAnimes": [
                    {"id": "show-1-movie", "name": "Attack on River: The Movie"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let info = client.fetch_title_info("show-1").await.unwrap();

        assert_eq!(info.overview.name, "Attack on River");
        assert_eq!(info.most_popular.len(), 1);
        assert_eq!(info.related.len(), 1);

        let availability = info.availability();
        assert_eq!(availability.sub, Some(12));
        assert_eq!(availability.dub, Some(8));
    }

    #[tokio::test]
    async fn not_found_maps_to_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/info"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such title"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.fetch_title_info("missing").await;

        match result.unwrap_err() {
            ClientError::ServerError { status, .. } => assert_eq!(status, 404),
            e => panic!("Expected ServerError, got: {:?}", e),
        }
    }
}

// =============================================================================
// Home Feed Tests
// =============================================================================

mod home {
    use super::*;

    #[tokio::test]
    async fn fetches_carousels() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/anime/home"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "trendingAnimes": [
                    {"id": "show-1", "name": "Attack on River"},
                    {"id": "show-2", "name": "Other Show"}
                ],
                "latestEpisodeAnimes": [
                    {"id": "show-3", "name": "Third Show"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let feed = client.fetch_home().await.unwrap();

        assert_eq!(feed.trending_animes.len(), 2);
        assert_eq!(feed.latest_episode_animes.len(), 1);
        assert_eq!(feed.trending_animes[0].id, "show-1");
    }
}

// =============================================================================
// Error Type Tests
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn error_display() {
        let error = ClientError::NoSourceAvailable {
            episode_id: "show-1?ep=101".to_string(),
            category: AudioCategory::Dub,
        };
        let rendered = format!("{}", error);
        assert!(rendered.contains("show-1?ep=101"));
        assert!(rendered.contains("dub"));

        let error = ClientError::ServerError {
            status: 503,
            message: "down".to_string(),
        };
        assert!(format!("{}", error).contains("503"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClientError>();
    }
}
