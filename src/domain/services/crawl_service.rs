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

use crate::utils::url_utils::resolve_url;
use anyhow::Result;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// 已知的二进制/媒体文件扩展名，此类链接不会被爬取
const BLOCKED_EXTENSIONS: [&str; 12] = [
    "pdf", "jpg", "jpeg", "png", "gif", "svg", "zip", "gz", "mp4", "mp3", "doc", "docx",
];

/// 已知的非内容域名（社交媒体），此类链接不会被爬取
const BLOCKED_DOMAINS: [&str; 5] = [
    "facebook.com",
    "twitter.com",
    "instagram.com",
    "youtube.com",
    "linkedin.com",
];

/// 链接发现器
///
/// 负责从HTML内容中提取和解析链接
pub struct LinkDiscoverer;

impl LinkDiscoverer {
    /// 从HTML内容中提取链接
    ///
    /// 相对href按页面基准URL解析为绝对URL；只保留http/https链接；
    /// 丢弃片段、mailto和javascript链接，并移除URL片段以提高去重率。
    /// 链接按文档出现顺序返回（去重保留首次出现），
    /// 配合FIFO队列保证遍历顺序可复现
    ///
    /// # 参数
    ///
    /// * `html_content` - HTML内容
    /// * `base_url` - 基准URL
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<String>)` - 按文档顺序去重后的链接列表
    /// * `Err(anyhow::Error)` - 提取过程中出现的错误
    pub fn extract_links(html_content: &str, base_url: &str) -> Result<Vec<String>> {
        let fragment = Html::parse_document(html_content);
        let selector =
            Selector::parse("a").map_err(|e| anyhow::anyhow!("Invalid selector: {:?}", e))?;
        let base = Url::parse(base_url)?;
        let mut links = Vec::new();
        let mut seen = HashSet::new();

        for element in fragment.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                // Ignore fragment identifiers, mailto and javascript links
                if href.starts_with('#')
                    || href.starts_with("mailto:")
                    || href.starts_with("javascript:")
                {
                    continue;
                }

                if let Ok(url) = resolve_url(&base, href) {
                    // Only keep http/https links
                    if url.scheme() == "http" || url.scheme() == "https" {
                        // Remove fragment to improve deduplication
                        let mut url_clean = url.clone();
                        url_clean.set_fragment(None);
                        let link = url_clean.to_string();
                        if seen.insert(link.clone()) {
                            links.push(link);
                        }
                    }
                }
            }
        }

        Ok(links)
    }
}

/// 链接接受策略
///
/// 在入队之前应用：要求URL为带网络authority的绝对URL，
/// 拒绝二进制/媒体扩展名、社交媒体域名，
/// 且URL字符串中必须出现主题关键词。关键词门控有意牺牲召回率
/// 以换取爬取预算的利用效率。
pub struct LinkPolicy {
    keywords: Vec<String>,
}

impl LinkPolicy {
    /// 创建链接接受策略
    ///
    /// # 参数
    ///
    /// * `keywords` - 主题关键词列表
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// 判断链接是否可接受
    ///
    /// 已访问/待访问去重由frontier负责，不在此处检查
    pub fn accepts(&self, link: &str) -> bool {
        let parsed = match Url::parse(link) {
            Ok(url) => url,
            Err(_) => return false,
        };

        // Must have a network authority
        let host = match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => return false,
        };

        // Binary/media extensions
        let path_lower = parsed.path().to_lowercase();
        if BLOCKED_EXTENSIONS
            .iter()
            .any(|ext| path_lower.ends_with(&format!(".{}", ext)))
        {
            return false;
        }

        // Non-content domains
        if BLOCKED_DOMAINS.iter().any(|domain| host.contains(domain)) {
            return false;
        }

        // Topical keyword gate on the URL string
        let link_lower = link.to_lowercase();
        self.keywords.iter().any(|k| link_lower.contains(k))
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
