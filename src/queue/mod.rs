// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 队列模块
///
/// 提供爬取边界（frontier）：已访问/待访问URL集合与出队调度
pub mod frontier;
