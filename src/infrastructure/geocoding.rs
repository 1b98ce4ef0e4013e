// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// 地理编码坐标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// 纬度
    pub latitude: f64,
    /// 经度
    pub longitude: f64,
}

/// 地理编码服务接口
///
/// 查找失败、超时或服务不可用统一返回None而非错误——
/// 调用方不区分"未找到"与"服务故障"
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// 查询地名对应的坐标
    async fn geocode(&self, query: &str) -> Option<Coordinates>;
}

/// Nominatim搜索API的响应条目
#[derive(Debug, Deserialize)]
struct NominatimEntry {
    /// 纬度（Nominatim以字符串返回）
    lat: String,
    /// 经度
    lon: String,
}

/// 地理编码服务
///
/// 查询Nominatim兼容的搜索端点
pub struct NominatimGeocoder {
    /// API端点
    api_endpoint: String,
    /// HTTP客户端
    client: reqwest::Client,
}

impl NominatimGeocoder {
    /// 创建新的地理编码服务实例
    ///
    /// # 参数
    ///
    /// * `api_endpoint` - 服务端点，如 https://nominatim.openstreetmap.org
    /// * `user_agent` - 请求User-Agent（Nominatim要求标识调用方）
    /// * `timeout` - 查询超时时间
    pub fn new(api_endpoint: String, user_agent: &str, timeout: Duration) -> Self {
        Self {
            api_endpoint,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, query: &str) -> Option<Coordinates> {
        debug!("Geocoding query: {}", query);

        let url = format!("{}/search", self.api_endpoint.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await;

        let response = match response {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                warn!("Geocoding error for {}: status {}", query, resp.status());
                return None;
            }
            Err(e) => {
                warn!("Geocoding error for {}: {}", query, e);
                return None;
            }
        };

        let entries: Vec<NominatimEntry> = match response.json().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to parse geocoding response for {}: {}", query, e);
                return None;
            }
        };

        let entry = entries.first()?;
        let latitude = entry.lat.parse::<f64>().ok()?;
        let longitude = entry.lon.parse::<f64>().ok()?;
        Some(Coordinates {
            latitude,
            longitude,
        })
    }
}
