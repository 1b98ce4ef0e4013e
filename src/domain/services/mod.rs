// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务。
///
/// 包含的服务：
/// - 主题分类器（classifier）：判定页面与主题的相关性
/// - 爬取服务（crawl_service）：链接发现与链接接受策略
/// - 字段提取器（field_extractors）：从文本中提取候选字段值的纯函数
/// - 记录提取器（spot_extractor）：编排提取管线并产出结构化记录
pub mod classifier;
pub mod crawl_service;
pub mod field_extractors;
pub mod spot_extractor;
