// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

/// 默认的种子URL列表：公开的风筝冲浪点目录站点
const DEFAULT_SEED_URLS: [&str; 5] = [
    "https://globalkitespots.com/global-kitesurf-spots-and-regions/",
    "https://www.kitesurfingholidays.com/kitesurf-spots",
    "https://www.kiteboardingnomad.com/kitesurf-spots",
    "https://kitesurfculture.com/kitesurf-spots/",
    "https://www.thekitespot.com/",
];

/// 默认的主题关键词列表，用于URL和正文的相关性判断
const DEFAULT_KEYWORDS: [&str; 7] = [
    "kitesurf",
    "kitesurfing",
    "kite spot",
    "kitespot",
    "kiteboarding",
    "kite boarding",
    "kite surf",
];

/// 应用程序配置设置
///
/// 包含爬取限制、抓取引擎、地理编码和输出等所有配置项
#[derive(Debug, Deserialize, Validate)]
pub struct Settings {
    /// 爬取配置
    #[validate(nested)]
    pub crawl: CrawlSettings,
    /// 抓取引擎配置
    #[validate(nested)]
    pub fetch: FetchSettings,
    /// 地理编码配置
    #[validate(nested)]
    pub geocode: GeocodeSettings,
    /// 输出配置
    #[validate(nested)]
    pub output: OutputSettings,
}

/// 爬取配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct CrawlSettings {
    /// 种子URL列表
    #[validate(length(min = 1))]
    pub seed_urls: Vec<String>,
    /// 主题关键词列表
    #[validate(length(min = 1))]
    pub keywords: Vec<String>,
    /// 最大爬取深度（种子为0）
    pub max_depth: u32,
    /// 最大收集记录数
    #[validate(range(min = 1))]
    pub max_spots: usize,
    /// 最大爬取URL数
    #[validate(range(min = 1))]
    pub max_urls: usize,
    /// 每批并发抓取的URL数
    #[validate(range(min = 1))]
    pub batch_size: usize,
    /// 批次之间的礼貌延迟（毫秒）
    pub batch_delay_ms: u64,
}

/// 抓取引擎配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct FetchSettings {
    /// 单次请求超时时间（秒）
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
    /// User-Agent请求头
    #[validate(length(min = 1))]
    pub user_agent: String,
}

/// 地理编码配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct GeocodeSettings {
    /// 地理编码服务端点（Nominatim兼容）
    #[validate(url)]
    pub endpoint: String,
    /// 每次查询前的固定延迟（毫秒），遵守服务速率限制
    pub delay_ms: u64,
    /// 查询超时时间（秒）
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

/// 输出配置设置
#[derive(Debug, Deserialize, Validate)]
pub struct OutputSettings {
    /// JSON输出文件路径
    #[validate(length(min = 1))]
    pub json_path: String,
    /// CSV输出文件路径
    #[validate(length(min = 1))]
    pub csv_path: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let seed_urls: Vec<String> = DEFAULT_SEED_URLS.iter().map(|s| s.to_string()).collect();
        let keywords: Vec<String> = DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect();

        let builder = Config::builder()
            // Default crawl settings
            .set_default("crawl.seed_urls", seed_urls)?
            .set_default("crawl.keywords", keywords)?
            .set_default("crawl.max_depth", 3)?
            .set_default("crawl.max_spots", 500)?
            .set_default("crawl.max_urls", 1000)?
            .set_default("crawl.batch_size", 10)?
            .set_default("crawl.batch_delay_ms", 1000)?
            // Default fetch settings
            .set_default("fetch.timeout_secs", 30)?
            .set_default(
                "fetch.user_agent",
                "KitespotCrawler/1.0 (research project; contact: kitespotmap@example.com)",
            )?
            // Default geocode settings
            .set_default("geocode.endpoint", "https://nominatim.openstreetmap.org")?
            .set_default("geocode.delay_ms", 1000)?
            .set_default("geocode.timeout_secs", 5)?
            // Default output settings
            .set_default("output.json_path", "kitespots.json")?
            .set_default("output.csv_path", "kitespots.csv")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("KITESPOT").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
