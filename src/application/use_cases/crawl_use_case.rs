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

//! 爬取用例：批量抓取、主题判定与风筝冲浪点提取的主循环。

use crate::{
    config::settings::Settings,
    domain::{
        models::{kitespot::Kitespot, kitespot::SpotCollection, task::CrawlTask},
        services::{
            classifier::TopicClassifier,
            crawl_service::{LinkDiscoverer, LinkPolicy},
            spot_extractor::{PageContent, SpotExtractor},
        },
    },
    engines::traits::{EngineError, FetchEngine, FetchRequest, FetchResponse},
    infrastructure::geocoding::Geocoder,
    queue::frontier::Frontier,
    utils::robots::RobotsCheckerTrait,
};
use futures::future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use validator::Validate;

#[derive(Error, Debug)]
pub enum CrawlUseCaseError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// 爬取用例：从种子 URL 出发，逐批并发抓取页面，
/// 对相关页面执行字段提取，并按深度上限扩展待抓取队列。
///
/// 批内抓取并发执行；队列与结果集只在整合阶段串行修改。
pub struct CrawlUseCase<E, G, R>
where
    E: FetchEngine,
    G: Geocoder,
    R: RobotsCheckerTrait,
{
    settings: Arc<Settings>,
    engine: Arc<E>,
    robots: Arc<R>,
    classifier: TopicClassifier,
    link_policy: LinkPolicy,
    extractor: SpotExtractor<G>,
    frontier: Frontier,
}

impl<E, G, R> CrawlUseCase<E, G, R>
where
    E: FetchEngine,
    G: Geocoder,
    R: RobotsCheckerTrait,
{
    /// 创建爬取用例。配置校验失败即拒绝启动。
    pub fn new(
        settings: Arc<Settings>,
        engine: Arc<E>,
        geocoder: Arc<G>,
        robots: Arc<R>,
    ) -> Result<Self, CrawlUseCaseError> {
        settings
            .validate()
            .map_err(|e| CrawlUseCaseError::ValidationError(e.to_string()))?;

        let keywords = &settings.crawl.keywords;
        let classifier = TopicClassifier::new(keywords);
        let link_policy = LinkPolicy::new(keywords);
        let extractor = SpotExtractor::new(
            geocoder,
            keywords,
            Duration::from_millis(settings.geocode.delay_ms),
        );

        Ok(Self {
            settings,
            engine,
            robots,
            classifier,
            link_policy,
            extractor,
            frontier: Frontier::new(),
        })
    }

    /// 执行完整的爬取流程，返回发现的风筝冲浪点列表。
    ///
    /// 终止条件：结果数达到上限、抓取 URL 数达到上限或队列耗尽。
    pub async fn run(&self) -> Result<Vec<Kitespot>, CrawlUseCaseError> {
        let crawl = &self.settings.crawl;
        info!(
            "Starting crawl: {} seed URLs, max depth {}, max {} URLs",
            crawl.seed_urls.len(),
            crawl.max_depth,
            crawl.max_urls
        );

        for seed in &crawl.seed_urls {
            self.frontier.enqueue(CrawlTask::new(seed.clone(), 0));
        }

        let mut collection = SpotCollection::new();
        let mut crawled_count: usize = 0;
        let fetch_timeout = Duration::from_secs(self.settings.fetch.timeout_secs);

        loop {
            if collection.len() >= crawl.max_spots {
                info!("Reached spot limit ({}), stopping", crawl.max_spots);
                break;
            }
            if crawled_count >= crawl.max_urls {
                info!("Reached URL limit ({}), stopping", crawl.max_urls);
                break;
            }

            let batch = self.frontier.dequeue_batch(crawl.batch_size);
            if batch.is_empty() {
                info!("Queue exhausted, stopping");
                break;
            }

            // Count every dequeued URL as attempted, whatever the outcome
            for task in &batch {
                self.frontier.mark_visited(&task.url);
            }

            // Dispatch: fetches within a batch run concurrently
            let fetches = batch.iter().map(|task| self.fetch_task(task, fetch_timeout));
            let outcomes = future::join_all(fetches).await;

            // Integrate: frontier and collection are only touched here
            for (task, outcome) in batch.iter().zip(outcomes) {
                match outcome {
                    Ok(Some(response)) => self.integrate(task, &response, &mut collection).await,
                    Ok(None) => {}
                    Err(e) => warn!("Fetch failed for {}: {}", task.url, e),
                }
            }

            crawled_count += batch.len();
            info!(
                "Crawled {} URLs, found {} kite spots, {} URLs queued",
                crawled_count,
                collection.len(),
                self.frontier.pending_len()
            );

            tokio::time::sleep(Duration::from_millis(crawl.batch_delay_ms)).await;
        }

        info!("Crawl complete: {} kitesurfing spots found", collection.len());
        Ok(collection.into_inner())
    }

    /// 抓取单个任务。robots 拒绝或非 HTML 响应返回 `Ok(None)`。
    async fn fetch_task(
        &self,
        task: &CrawlTask,
        timeout: Duration,
    ) -> Result<Option<FetchResponse>, EngineError> {
        match self
            .robots
            .is_allowed(&task.url, &self.settings.fetch.user_agent)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                debug!("robots.txt disallows {}", task.url);
                return Ok(None);
            }
            // Unreadable robots.txt does not block crawling
            Err(e) => debug!("robots.txt check failed for {}: {}", task.url, e),
        }

        let request = FetchRequest {
            url: task.url.clone(),
            timeout,
        };
        let response = self.engine.fetch(&request).await?;

        if !(200..300).contains(&response.status_code) {
            return Err(EngineError::Other(format!(
                "HTTP status {}",
                response.status_code
            )));
        }
        if !response.is_html_success() {
            debug!("Skipping non-HTML response from {}", task.url);
            return Ok(None);
        }
        Ok(Some(response))
    }

    /// 整合阶段：提取风筝冲浪点并在深度允许时扩展队列。
    async fn integrate(
        &self,
        task: &CrawlTask,
        response: &FetchResponse,
        collection: &mut SpotCollection,
    ) {
        let page = PageContent::parse(&response.content);

        if self.classifier.is_relevant(&task.url, &page.full_text) {
            if let Some(spot) = self.extractor.extract(&task.url, &page, collection).await {
                collection.insert(spot);
            }
        } else {
            debug!("Page not kitesurfing-related: {}", task.url);
        }

        // Links found at the depth ceiling are never enqueued
        if task.depth < self.settings.crawl.max_depth {
            match LinkDiscoverer::extract_links(&response.content, &task.url) {
                Ok(links) => {
                    for link in links {
                        if self.link_policy.accepts(&link) {
                            self.frontier.enqueue(CrawlTask::new(link, task.depth + 1));
                        }
                    }
                }
                Err(e) => warn!("Link extraction failed for {}: {}", task.url, e),
            }
        }
    }
}
