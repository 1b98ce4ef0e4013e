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

use crate::domain::models::kitespot::{Kitespot, SpotCollection, SOURCE_TYPE_WEB_CRAWLER};
use crate::domain::services::field_extractors;
use crate::domain::vocab;
use crate::infrastructure::geocoding::Geocoder;
use crate::utils::sentences::segment_sentences;
use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// 主内容块的候选选择器，按优先级排列，首个命中即采用
const CONTENT_SELECTORS: [&str; 10] = [
    "main",
    "article",
    ".content",
    "#content",
    ".main",
    "#main",
    ".post",
    ".entry",
    ".page-content",
    "section",
];

/// 解析后的页面内容
///
/// HTML在任何await点之前一次性解析为自有字符串。
/// scraper::Html不是Send，不能跨越await点持有。
#[derive(Debug, Clone)]
pub struct PageContent {
    /// 页面标题
    pub title: String,
    /// 标题与正文拼接的全文
    pub full_text: String,
    /// 隔离出的主内容文本
    pub content_text: String,
}

impl PageContent {
    /// 解析HTML内容
    ///
    /// 主内容按候选选择器顺序尝试，均未命中时回退到整个body文本
    pub fn parse(html_content: &str) -> Self {
        let document = Html::parse_document(html_content);

        let title = Selector::parse("title")
            .ok()
            .and_then(|sel| document.select(&sel).next().map(|e| element_text(&e)))
            .unwrap_or_default();

        let body_text = Selector::parse("body")
            .ok()
            .and_then(|sel| document.select(&sel).next().map(|e| element_text(&e)))
            .unwrap_or_default();

        // The classifier sees the title as part of the page text; a page whose
        // only keyword mention sits in <title> is still relevant
        let full_text = format!("{} {}", title, body_text).trim().to_string();

        let mut content_text = String::new();
        for selector_str in CONTENT_SELECTORS {
            if let Ok(selector) = Selector::parse(selector_str) {
                if let Some(element) = document.select(&selector).next() {
                    content_text = element_text(&element);
                    break;
                }
            }
        }

        // If no content found via selectors, use the whole body
        if content_text.is_empty() {
            content_text = full_text.clone();
        }

        Self {
            title,
            full_text,
            content_text,
        }
    }
}

/// 提取元素的文本并折叠空白
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 记录提取器
///
/// 编排提取管线：句子切分 → 共现过滤 → 字段提取 → 接受门控 →
/// 身份去重 → 地理编码。只有name与country都提取成功才产出记录。
pub struct SpotExtractor<G> {
    /// 地理编码服务
    geocoder: Arc<G>,
    /// 主题关键词（小写）
    keywords: Vec<String>,
    /// 每次地理编码查询前的固定延迟
    geocode_delay: Duration,
}

impl<G: Geocoder> SpotExtractor<G> {
    /// 创建记录提取器实例
    pub fn new(geocoder: Arc<G>, keywords: &[String], geocode_delay: Duration) -> Self {
        Self {
            geocoder,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            geocode_delay,
        }
    }

    /// 对单个相关页面运行提取管线
    ///
    /// # 参数
    ///
    /// * `url` - 页面URL（记录来源）
    /// * `page` - 解析后的页面内容
    /// * `collection` - 已收集记录，用于身份去重
    ///
    /// # 返回值
    ///
    /// 提取成功且身份键未重复时返回新记录，否则返回None。
    /// 提取失败不是错误——该页面不产出记录而已。
    pub async fn extract(
        &self,
        url: &str,
        page: &PageContent,
        collection: &SpotCollection,
    ) -> Option<Kitespot> {
        // Sentences mentioning both a topical keyword and a country name
        let qualifying = self.qualifying_sentences(&page.content_text);
        if qualifying.is_empty() {
            return None;
        }

        let name = field_extractors::extract_name(&page.title, &qualifying, &self.keywords)?;
        let country = field_extractors::extract_country(&qualifying)?;
        let region = field_extractors::extract_region(&qualifying, &country);

        if collection.contains(&name, &country) {
            debug!("Skipping duplicate spot: {}, {}", name, country);
            return None;
        }

        let content_lower = page.content_text.to_lowercase();
        let wind_direction = field_extractors::extract_wind_direction(&content_lower);
        let avg_wind_speed = field_extractors::extract_wind_speed(&content_lower);
        let water_type = field_extractors::extract_water_type(&content_lower);
        let water_condition = field_extractors::extract_water_condition(&content_lower);
        let best_season = field_extractors::extract_best_season(&content_lower);

        // Fixed delay to respect the geocoding service's rate limits
        tokio::time::sleep(self.geocode_delay).await;
        let query = format!(
            "{}, {}, {}",
            name,
            region.as_deref().unwrap_or_default(),
            country
        );
        let coordinates = self.geocoder.geocode(&query).await;

        info!("Found new kitespot: {}, {}", name, country);

        Some(Kitespot {
            name,
            country,
            region,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            wind_direction,
            avg_wind_speed,
            water_type,
            water_condition,
            best_season,
            source: url.to_string(),
            source_type: SOURCE_TYPE_WEB_CRAWLER.to_string(),
        })
    }

    /// 同时包含主题关键词与国家名称的句子
    fn qualifying_sentences(&self, content: &str) -> Vec<String> {
        segment_sentences(content)
            .into_iter()
            .filter(|sentence| {
                let sentence_lower = sentence.to_lowercase();
                let has_keyword = self.keywords.iter().any(|k| sentence_lower.contains(k));
                has_keyword && vocab::contains_country(&sentence_lower)
            })
            .collect()
    }
}
