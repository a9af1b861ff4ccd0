// Integration tests for Giftwise: recommendation client -> proxy endpoint -> upstream

use std::net::SocketAddr;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use giftwise::core::{mock_theme_set, RequestCoordinator};
use giftwise::models::{Gender, RecipientProfile, ScoringWeights};
use giftwise::routes::{configure_extractors, configure_routes, AppState};
use giftwise::services::{ProxyPolicy, RecommendationClient, UpstreamClient};
use mockito::Matcher;
use serde_json::json;

fn create_profile() -> RecipientProfile {
    RecipientProfile {
        relationship: "grandfather".to_string(),
        occasion: "retirement".to_string(),
        gender: Gender::Male,
        age: 67,
        shared_hobbies: Some("fishing".to_string()),
        other_hobbies: Some("woodworking".to_string()),
        values: None,
        budget: Some("$250".to_string()),
        ethnicity: Some("Irish".to_string()),
        milestones: Some("40 years at the mill".to_string()),
        loved_gifts: None,
        exclude_gifts: None,
        other_info: None,
        exclusions: Some("no alcohol".to_string()),
    }
}

fn fast_policy() -> ProxyPolicy {
    ProxyPolicy {
        direct_timeout: Duration::from_millis(300),
        attempt_timeout: Duration::from_millis(300),
        total_timeout: Duration::from_secs(2),
        early_exit_margin: Duration::from_millis(500),
        grace_attempts: u32::MAX,
        backoff_base: Duration::from_millis(20),
        backoff_step: Duration::from_millis(10),
        backoff_cap: Duration::from_millis(60),
    }
}

/// Start the giftwise server on an ephemeral port
fn start_proxy(upstream_endpoint: String, policy: ProxyPolicy) -> SocketAddr {
    let state = AppState::new(
        UpstreamClient::new(upstream_endpoint).unwrap(),
        policy,
        ScoringWeights::default(),
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(configure_extractors)
            .configure(configure_routes)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    addr
}

fn client_for(addr: SocketAddr) -> RecommendationClient {
    RecommendationClient::new(format!("http://{}/api/gifts", addr), Duration::from_secs(10)).unwrap()
}

#[actix_web::test]
async fn test_integration_live_themes_through_proxy() {
    let mut upstream = mockito::Server::new_async().await;
    let mock = upstream
        .mock("GET", "/api/gifts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("culture".into(), "Irish".into()),
            Matcher::UrlEncoded("other_exclude".into(), "no alcohol".into()),
            Matcher::UrlEncoded("age".into(), "67".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                { "gift_theme": "Fly Fishing Kit", "match_score": 88 },
                { "gift_theme": "Woodworking Class", "match_score": 93, "id": "wood" }
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let addr = start_proxy(format!("{}/api/gifts", upstream.url()), fast_policy());
    let set = client_for(addr).fetch_themes(&create_profile()).await;

    mock.assert_async().await;
    assert!(!set.is_mock_data);
    assert_eq!(set.themes.len(), 2);
    // Missing ids are generated by the proxy
    assert!(!set.themes[0].id.is_empty());
    assert_eq!(set.themes[1].id, "wood");

    let ranked = set.ranked();
    assert_eq!(ranked.themes[0].gift_theme, "Woodworking Class");
}

#[actix_web::test]
async fn test_integration_upstream_down_yields_mock() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/api/gifts")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let addr = start_proxy(format!("{}/api/gifts", upstream.url()), fast_policy());
    let set = client_for(addr).fetch_themes(&create_profile()).await;

    assert_eq!(set, mock_theme_set());
}

#[actix_web::test]
async fn test_integration_loading_reply_yields_mock() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/api/gifts")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let policy = ProxyPolicy {
        grace_attempts: 2,
        ..fast_policy()
    };
    let addr = start_proxy(format!("{}/api/gifts", upstream.url()), policy);
    let set = client_for(addr).fetch_themes(&create_profile()).await;

    assert!(set.is_mock_data);
    assert_eq!(set.themes.len(), 5);
}

#[actix_web::test]
async fn test_integration_regenerate_discards_stale_response() {
    let mut upstream = mockito::Server::new_async().await;
    let _mock = upstream
        .mock("GET", "/api/gifts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "themes": [{ "gift_theme": "Tackle Box", "match_score": 80 }] }).to_string())
        .create_async()
        .await;

    let addr = start_proxy(format!("{}/api/gifts", upstream.url()), fast_policy());
    let client = client_for(addr);
    let profile = create_profile();
    let mut view = RequestCoordinator::new();

    let first = view.begin();
    let second = view.begin();
    let (first_result, second_result) =
        tokio::join!(client.fetch_themes(&profile), client.fetch_themes(&profile));

    assert!(view.complete(second, second_result));
    assert!(!view.complete(first, first_result));
    assert!(!view.is_loading());
    assert!(!view.showing_mock_data());
    assert_eq!(view.themes().unwrap().themes[0].gift_theme, "Tackle Box");
}
