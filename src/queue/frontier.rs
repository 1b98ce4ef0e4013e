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

use crate::domain::models::task::CrawlTask;
use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};

/// 爬取边界
///
/// 维护两个互斥的URL集合：已访问（已尝试抓取，无论结果）与
/// 待访问（排队未尝试）。不变量：同一URL不会同时出现在两个集合中，
/// 已访问的URL永远不会再次入队。单把互斥锁同时保护两个集合，
/// 保证出队与去重检查的原子性。
pub struct Frontier {
    inner: Mutex<FrontierState>,
}

struct FrontierState {
    /// 已访问URL集合
    visited: HashSet<String>,
    /// 待访问任务队列（FIFO）
    pending: VecDeque<CrawlTask>,
    /// 待访问URL集合，与pending同步维护
    pending_urls: HashSet<String>,
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontier {
    /// 创建空的爬取边界
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FrontierState {
                visited: HashSet::new(),
                pending: VecDeque::new(),
                pending_urls: HashSet::new(),
            }),
        }
    }

    /// 入队任务
    ///
    /// URL已访问或已在待访问集合中时不做任何操作。
    /// 首次发现的深度生效：后续以更浅深度再次发现同一URL不会改变其深度。
    ///
    /// # 返回值
    ///
    /// 任务被接受入队返回true，否则返回false
    pub fn enqueue(&self, task: CrawlTask) -> bool {
        let mut state = self.inner.lock();
        if state.visited.contains(&task.url) || state.pending_urls.contains(&task.url) {
            return false;
        }
        state.pending_urls.insert(task.url.clone());
        state.pending.push_back(task);
        true
    }

    /// 原子地取出最多n个待访问任务
    ///
    /// 取出即从待访问集合移除，防止重叠批次重复派发同一URL。
    /// 待访问数量不足n时返回全部。
    pub fn dequeue_batch(&self, n: usize) -> Vec<CrawlTask> {
        let mut state = self.inner.lock();
        let count = n.min(state.pending.len());
        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(task) = state.pending.pop_front() {
                state.pending_urls.remove(&task.url);
                batch.push(task);
            }
        }
        batch
    }

    /// 将URL记入已访问集合（幂等）
    pub fn mark_visited(&self, url: &str) {
        let mut state = self.inner.lock();
        state.pending_urls.remove(url);
        state.visited.insert(url.to_string());
        state.pending.retain(|t| t.url != url);
    }

    /// 待访问任务数量
    pub fn pending_len(&self) -> usize {
        self.inner.lock().pending.len()
    }

    /// 已访问URL数量
    pub fn visited_len(&self) -> usize {
        self.inner.lock().visited.len()
    }

    /// URL是否已访问
    pub fn is_visited(&self, url: &str) -> bool {
        self.inner.lock().visited.contains(url)
    }
}
