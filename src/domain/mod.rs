// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
pub mod models;

/// 领域服务
pub mod services;

/// 词表：国家名称、月份、季节
pub mod vocab;
