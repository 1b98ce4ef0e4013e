// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - 地理编码（geocoding）：地名到经纬度的查询服务
/// - 导出（export）：记录的JSON与CSV输出
pub mod export;
pub mod geocoding;
