// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    html_page, mount_geocode_hit, mount_permissive_robots, test_settings, TARIFA_HTML,
};
use kitespotrs::application::use_cases::crawl_use_case::CrawlUseCase;
use kitespotrs::engines::reqwest_engine::ReqwestEngine;
use kitespotrs::infrastructure::geocoding::NominatimGeocoder;
use kitespotrs::utils::robots::RobotsChecker;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAKHLA_HTML: &str = r#"<html>
    <head><title>Dakhla kitesurfing spot</title></head>
    <body><main>
        <p>Dakhla is a famous kitesurfing lagoon in Morocco.
        Flat water and steady wind all year.</p>
    </main></body></html>"#;

async fn run_crawl(
    settings: kitespotrs::config::settings::Settings,
) -> Vec<kitespotrs::domain::models::kitespot::Kitespot> {
    let settings = Arc::new(settings);
    let engine = Arc::new(ReqwestEngine::new(&settings.fetch.user_agent).unwrap());
    let geocoder = Arc::new(NominatimGeocoder::new(
        settings.geocode.endpoint.clone(),
        &settings.fetch.user_agent,
        Duration::from_secs(settings.geocode.timeout_secs),
    ));
    let robots = Arc::new(RobotsChecker::new());

    let use_case = CrawlUseCase::new(settings, engine, geocoder, robots).unwrap();
    use_case.run().await.unwrap()
}

#[tokio::test]
async fn test_links_at_depth_ceiling_are_not_followed() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-next">Next</a>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(seed_html))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-next"))
        .respond_with(html_page(TARIFA_HTML))
        .expect(0)
        .mount(&server)
        .await;

    let mut settings = test_settings(&server.uri(), &server.uri());
    settings.crawl.max_depth = 0;

    let spots = run_crawl(settings).await;
    assert!(spots.is_empty());
}

#[tokio::test]
async fn test_url_limit_stops_the_crawl() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-a">a</a>
        <a href="/kitesurf-b">b</a>
        <a href="/kitesurf-c">c</a>
        <a href="/kitesurf-d">d</a>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(seed_html))
        .mount(&server)
        .await;
    for leaf in ["/kitesurf-a", "/kitesurf-b", "/kitesurf-c", "/kitesurf-d"] {
        Mock::given(method("GET"))
            .and(path(leaf))
            .respond_with(html_page("<html><body><p>nothing here</p></body></html>"))
            .mount(&server)
            .await;
    }

    let mut settings = test_settings(&server.uri(), &server.uri());
    settings.crawl.max_urls = 3;
    settings.crawl.batch_size = 2;

    run_crawl(settings).await;

    // Seed batch (1) plus one follow-up batch (2) reaches the limit
    let requests = server.received_requests().await.unwrap();
    let page_fetches = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/kitesurf"))
        .count();
    assert_eq!(page_fetches, 3);
}

#[tokio::test]
async fn test_spot_limit_stops_the_crawl() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-tarifa">Tarifa</a>
        <a href="/kitesurf-dakhla">Dakhla</a>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(seed_html))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-tarifa"))
        .respond_with(html_page(TARIFA_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-dakhla"))
        .respond_with(html_page(DAKHLA_HTML))
        .mount(&server)
        .await;

    let mut settings = test_settings(&server.uri(), &server.uri());
    settings.crawl.max_spots = 1;
    settings.crawl.batch_size = 1;

    let spots = run_crawl(settings).await;

    // The crawl stops as soon as the first record lands
    assert_eq!(spots.len(), 1);
    let requests = server.received_requests().await.unwrap();
    let page_fetches = requests
        .iter()
        .filter(|r| r.url.path().starts_with("/kitesurf"))
        .count();
    assert_eq!(page_fetches, 2);
}

#[tokio::test]
async fn test_non_html_response_is_skipped() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"spots": []}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;
    assert!(spots.is_empty());
}
