// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 爬取任务
///
/// (url, depth) 对。depth为距离种子URL的链接层数，种子为0。
/// 任务被抓取一次后即废弃，其URL从待访问集合转入已访问集合。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    /// 目标URL
    pub url: String,
    /// 爬取深度
    pub depth: u32,
}

impl CrawlTask {
    /// 创建新的爬取任务
    pub fn new(url: impl Into<String>, depth: u32) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}
