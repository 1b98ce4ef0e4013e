// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 记录来源标识
pub const SOURCE_TYPE_WEB_CRAWLER: &str = "web-crawler";

/// 风筝冲浪点记录
///
/// 创建后不再修改。name与country为必填字段；
/// 经纬度要么同时存在要么同时缺失。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kitespot {
    /// 地点名称
    pub name: String,
    /// 国家
    pub country: String,
    /// 地区（可选）
    pub region: Option<String>,
    /// 纬度
    pub latitude: Option<f64>,
    /// 经度
    pub longitude: Option<f64>,
    /// 风向
    pub wind_direction: Option<String>,
    /// 平均风速（单位不保留）
    pub avg_wind_speed: Option<f64>,
    /// 水面类型
    pub water_type: Option<String>,
    /// 水面状况
    pub water_condition: Option<String>,
    /// 最佳季节
    pub best_season: Option<String>,
    /// 来源URL
    pub source: String,
    /// 来源类型
    pub source_type: String,
}

/// 已收集记录容器
///
/// 按插入顺序保存记录。身份键为 (name, country)（不区分大小写），
/// 同键记录只保留最先发现的一条，后续重复被丢弃而非合并。
#[derive(Debug, Default)]
pub struct SpotCollection {
    spots: Vec<Kitespot>,
}

impl SpotCollection {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录数量
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// 容器是否为空
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// 是否已存在相同身份键的记录
    pub fn contains(&self, name: &str, country: &str) -> bool {
        self.spots.iter().any(|s| {
            s.name.eq_ignore_ascii_case(name) && s.country.eq_ignore_ascii_case(country)
        })
    }

    /// 插入记录
    ///
    /// # 返回值
    ///
    /// 若身份键已存在返回false（记录被丢弃），否则插入并返回true
    pub fn insert(&mut self, spot: Kitespot) -> bool {
        if self.contains(&spot.name, &spot.country) {
            return false;
        }
        self.spots.push(spot);
        true
    }

    /// 按插入顺序访问记录
    pub fn spots(&self) -> &[Kitespot] {
        &self.spots
    }

    /// 取出全部记录
    pub fn into_inner(self) -> Vec<Kitespot> {
        self.spots
    }
}
