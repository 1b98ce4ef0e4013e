// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 主题分类器
///
/// 判断页面是否与主题相关的纯函数：任一主题关键词（不区分大小写）
/// 作为子串出现在URL或页面全文中即判定相关。
/// 这是一个偏召回的粗过滤，精确性工作由记录提取器完成。
pub struct TopicClassifier {
    keywords: Vec<String>,
}

impl TopicClassifier {
    /// 创建分类器实例
    ///
    /// # 参数
    ///
    /// * `keywords` - 主题关键词列表
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// 判定页面相关性
    ///
    /// # 参数
    ///
    /// * `url` - 页面URL
    /// * `text` - 页面渲染后的全文
    pub fn is_relevant(&self, url: &str, text: &str) -> bool {
        let url_lower = url.to_lowercase();
        let text_lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|k| url_lower.contains(k) || text_lower.contains(k))
    }
}
