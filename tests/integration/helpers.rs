// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use kitespotrs::config::settings::{
    CrawlSettings, FetchSettings, GeocodeSettings, OutputSettings, Settings,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 构造指向模拟站点与模拟地理编码服务的测试配置
pub fn test_settings(site: &str, geocode_endpoint: &str) -> Settings {
    Settings {
        crawl: CrawlSettings {
            seed_urls: vec![format!("{}/kitesurf-guide", site)],
            keywords: vec!["kitesurf".to_string(), "kitespot".to_string()],
            max_depth: 2,
            max_spots: 10,
            max_urls: 50,
            batch_size: 5,
            batch_delay_ms: 0,
        },
        fetch: FetchSettings {
            timeout_secs: 5,
            user_agent: "KitespotCrawler/1.0 (integration test)".to_string(),
        },
        geocode: GeocodeSettings {
            endpoint: geocode_endpoint.to_string(),
            delay_ms: 0,
            timeout_secs: 2,
        },
        output: OutputSettings {
            json_path: "kitespots.json".to_string(),
            csv_path: "kitespots.csv".to_string(),
        },
    }
}

/// HTML响应模板
pub fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

/// 挂载允许一切的robots.txt
pub async fn mount_permissive_robots(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nAllow: /\n"),
        )
        .mount(server)
        .await;
}

/// 挂载返回单个坐标的地理编码端点
pub async fn mount_geocode_hit(server: &MockServer, lat: &str, lon: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "lat": lat, "lon": lon }
        ])))
        .mount(server)
        .await;
}

/// 挂载查无结果的地理编码端点
pub async fn mount_geocode_miss(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

/// 描述Tarifa的页面，包含全部可提取字段
pub const TARIFA_HTML: &str = r#"<html>
    <head><title>Tarifa - best kitesurfing spots in Spain</title></head>
    <body><main>
        <p>Tarifa kitesurfing conditions are world class in Spain.
        The wind direction is mostly east with an average wind speed of 22 knots.
        The best season to kite is summer.</p>
    </main></body></html>"#;
