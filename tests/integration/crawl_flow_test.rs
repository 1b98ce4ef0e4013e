// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{
    html_page, mount_geocode_hit, mount_geocode_miss, mount_permissive_robots, test_settings,
    TARIFA_HTML,
};
use kitespotrs::application::use_cases::crawl_use_case::CrawlUseCase;
use kitespotrs::engines::reqwest_engine::ReqwestEngine;
use kitespotrs::infrastructure::geocoding::NominatimGeocoder;
use kitespotrs::utils::robots::RobotsChecker;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn run_crawl(settings: kitespotrs::config::settings::Settings) -> Vec<kitespotrs::domain::models::kitespot::Kitespot> {
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
async fn test_crawl_extracts_full_record_and_skips_binary_links() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = format!(
        r#"<html><head><title>Kitesurfing guide</title></head><body>
            <a href="/kitesurf-tarifa">Tarifa</a>
            <a href="/kitesurf-brochure.pdf">Brochure</a>
            <a href="https://facebook.com/kitesurfing">Share</a>
        </body></html>"#
    );
    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(&seed_html))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-tarifa"))
        .respond_with(html_page(TARIFA_HTML))
        .mount(&server)
        .await;
    // Binary extensions are filtered before they ever reach the queue
    Mock::given(method("GET"))
        .and(path("/kitesurf-brochure.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;

    assert_eq!(spots.len(), 1);
    let spot = &spots[0];
    assert_eq!(spot.name, "Tarifa");
    assert_eq!(spot.country, "Spain");
    assert_eq!(spot.avg_wind_speed, Some(22.0));
    assert_eq!(spot.wind_direction.as_deref(), Some("EAST"));
    assert_eq!(spot.best_season.as_deref(), Some("Summer"));
    assert_eq!(spot.latitude, Some(36.01));
    assert_eq!(spot.longitude, Some(-5.60));
    assert!(spot.source.ends_with("/kitesurf-tarifa"));
}

#[tokio::test]
async fn test_same_spot_on_two_pages_yields_one_record() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-tarifa">Tarifa</a>
        <a href="/kitesurf-tarifa-review">Tarifa again</a>
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
        .and(path("/kitesurf-tarifa-review"))
        .respond_with(html_page(TARIFA_HTML))
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;

    // Identity key (name, country) deduplicates across pages
    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0].name, "Tarifa");
}

#[tokio::test]
async fn test_geocode_miss_still_produces_record_without_coordinates() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_miss(&server).await;

    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(TARIFA_HTML))
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;

    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0].latitude, None);
    assert_eq!(spots[0].longitude, None);
}

#[tokio::test]
async fn test_robots_disallowed_page_is_never_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("User-agent: *\nDisallow: /kitesurf-private\n"),
        )
        .mount(&server)
        .await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-private">Members only</a>
        <a href="/kitesurf-tarifa">Tarifa</a>
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
        .and(path("/kitesurf-private"))
        .respond_with(html_page("<html><body>secret</body></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;

    assert_eq!(spots.len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_does_not_abort_the_batch() {
    let server = MockServer::start().await;
    mount_permissive_robots(&server).await;
    mount_geocode_hit(&server, "36.01", "-5.60").await;

    let seed_html = r#"<html><head><title>Kitesurfing guide</title></head><body>
        <a href="/kitesurf-broken">Broken</a>
        <a href="/kitesurf-tarifa">Tarifa</a>
    </body></html>"#;
    Mock::given(method("GET"))
        .and(path("/kitesurf-guide"))
        .respond_with(html_page(seed_html))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/kitesurf-tarifa"))
        .respond_with(html_page(TARIFA_HTML))
        .mount(&server)
        .await;

    let spots = run_crawl(test_settings(&server.uri(), &server.uri())).await;

    assert_eq!(spots.len(), 1);
    assert_eq!(spots[0].name, "Tarifa");
}
