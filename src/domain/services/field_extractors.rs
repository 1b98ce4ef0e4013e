// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 字段提取器
//!
//! 从小写化文本中提取候选字段值的纯函数集合。
//! 每个字段对应一组按优先级排列的提取规则，逐条尝试，首个命中即返回；
//! 规则之间不做结果合并。全部为启发式匹配，允许误报/漏报。

use crate::domain::vocab;
use once_cell::sync::Lazy;
use regex::Regex;

/// 标题提取规则：正则 + 捕获组序号
///
/// 捕获组序号显式声明，避免按"模式开头"猜测组号的歧义
struct TitleRule {
    regex: Regex,
    group: usize,
}

/// 标题解析规则，假定页面标题遵循常见命名惯例
static TITLE_RULES: Lazy<Vec<TitleRule>> = Lazy::new(|| {
    vec![
        // "Tarifa - best kitesurfing …"
        TitleRule {
            regex: Regex::new(r"(.+) - .* kitesurfing").unwrap(),
            group: 1,
        },
        // "Tarifa kitesurfing spot"
        TitleRule {
            regex: Regex::new(r"(.+) kitesurf(?:ing)? spot").unwrap(),
            group: 1,
        },
        // "Kitesurfing in Dakhla"
        TitleRule {
            regex: Regex::new(r"kitesurf(?:ing)? (?:in|at) (.+)").unwrap(),
            group: 1,
        },
        // "Tarifa - kite spot"
        TitleRule {
            regex: Regex::new(r"(.+) - kite spot").unwrap(),
            group: 1,
        },
    ]
});

/// 句子内 "in/at <地名>" 模式
static IN_AT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:in|at) ([^,.]+)").unwrap());

/// 风向模式：30个字符窗口内的方位词
static WIND_DIRECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"wind (?:direction|directions).{1,30}?\b(north|south|east|west|northeast|northwest|southeast|southwest|n|s|e|w|ne|nw|se|sw)\b",
    )
    .unwrap()
});

/// 风速模式："average/avg … wind … <数字> <单位>"
static WIND_SPEED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:average|avg).{1,20}?wind.{1,20}?(\d+)[^\d]*(?:knots|kts|kn|mph|km/h)").unwrap()
});

/// 水面类型词表
static WATER_TYPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(sea|ocean|lake|lagoon|flat water|flatwater|chop|choppy|waves|reef)").unwrap()
});

/// 水面状况词表
static WATER_CONDITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(flat|choppy|wavy|shallow|deep|reef|waves)").unwrap());

/// 季节模式："best time/season … <季节>"
static SEASON_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"best (?:time|season).{{1,30}}?({})",
        vocab::SEASONS.join("|")
    ))
    .unwrap()
});

/// 月份区间模式：两个月份都存在时优先
static MONTH_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"best (?:time|season|months).{{1,50}}?({m}).{{1,20}}?({m})",
        m = vocab::MONTHS.join("|")
    ))
    .unwrap()
});

/// 单月份模式
static MONTH_SINGLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"best (?:time|season|months).{{1,50}}?({m})",
        m = vocab::MONTHS.join("|")
    ))
    .unwrap()
});

/// 提取地点名称
///
/// 优先解析页面标题；标题不含主题关键词或无规则命中时，
/// 回退到在限定句子中围绕关键词取词；最后接受3-7个单词的原始标题。
pub fn extract_name(title: &str, sentences: &[String], keywords: &[String]) -> Option<String> {
    let title_lower = title.to_lowercase();

    if keywords.iter().any(|k| title_lower.contains(&k.to_lowercase())) {
        for rule in TITLE_RULES.iter() {
            if let Some(captures) = rule.regex.captures(&title_lower) {
                if let Some(m) = captures.get(rule.group) {
                    let name = m.as_str().trim();
                    if !name.is_empty() {
                        return Some(title_case(name));
                    }
                }
            }
        }
    }

    // Fall back to scanning qualifying sentences around a keyword
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        for keyword in keywords {
            let keyword_lower = keyword.to_lowercase();
            if let Some(idx) = sentence_lower.find(&keyword_lower) {
                // Two words immediately preceding the keyword
                if idx > 10 {
                    let pre_text = sentence_lower[..idx].trim();
                    let words: Vec<&str> = pre_text.split_whitespace().collect();
                    if words.len() >= 2 {
                        return Some(title_case(&words[words.len() - 2..].join(" ")));
                    }
                }

                // Phrase following "in"/"at" after the keyword
                let after_text = &sentence_lower[idx + keyword_lower.len()..];
                if let Some(captures) = IN_AT_RE.captures(after_text) {
                    return Some(title_case(captures.get(1)?.as_str().trim()));
                }
            }
        }
    }

    // Last resort: the raw title, if it is a plausible name length
    let word_count = title.split_whitespace().count();
    if (3..=7).contains(&word_count) {
        return Some(title.trim().to_string());
    }

    None
}

/// 提取国家：首个含国家名称的限定句子，按词表顺序取第一个命中
pub fn extract_country(sentences: &[String]) -> Option<String> {
    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        if let Some(country) = vocab::find_country(&sentence_lower) {
            return Some(title_case(country));
        }
    }
    None
}

/// 提取地区
///
/// 仅在已找到国家时尝试，在含该国家的句子中匹配
/// "<分隔词> <地区>, <国家>" 模式，分隔词为逗号、in、near、at
pub fn extract_region(sentences: &[String], country: &str) -> Option<String> {
    let country_lower = country.to_lowercase();
    let separators = [",", "in", "near", "at"];

    for sentence in sentences {
        let sentence_lower = sentence.to_lowercase();
        if !sentence_lower.contains(&country_lower) {
            continue;
        }

        for separator in separators {
            let pattern = format!(
                "{} ([^,]+), {}",
                regex::escape(separator),
                regex::escape(&country_lower)
            );
            let re = match Regex::new(&pattern) {
                Ok(re) => re,
                Err(_) => continue,
            };
            if let Some(captures) = re.captures(&sentence_lower) {
                return Some(title_case(captures.get(1)?.as_str().trim()));
            }
        }
    }

    None
}

/// 提取风向，结果大写（全称保持全称，如 NORTHEAST）
pub fn extract_wind_direction(content_lower: &str) -> Option<String> {
    WIND_DIRECTION_RE
        .captures(content_lower)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// 提取平均风速数值，单位不保留
pub fn extract_wind_speed(content_lower: &str) -> Option<f64> {
    WIND_SPEED_RE
        .captures(content_lower)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// 提取水面类型：内容中首次出现的词表项
pub fn extract_water_type(content_lower: &str) -> Option<String> {
    WATER_TYPE_RE
        .captures(content_lower)
        .and_then(|c| c.get(1))
        .map(|m| title_case(m.as_str()))
}

/// 提取水面状况
pub fn extract_water_condition(content_lower: &str) -> Option<String> {
    WATER_CONDITION_RE
        .captures(content_lower)
        .and_then(|c| c.get(1))
        .map(|m| title_case(m.as_str()))
}

/// 提取最佳季节
///
/// 规则顺序：季节名 → 月份区间（"June to September"）→ 单个月份
pub fn extract_best_season(content_lower: &str) -> Option<String> {
    if let Some(captures) = SEASON_RE.captures(content_lower) {
        return Some(title_case(captures.get(1)?.as_str()));
    }

    if let Some(captures) = MONTH_RANGE_RE.captures(content_lower) {
        let start = title_case(captures.get(1)?.as_str());
        let end = title_case(captures.get(2)?.as_str());
        return Some(format!("{} to {}", start, end));
    }

    if let Some(captures) = MONTH_SINGLE_RE.captures(content_lower) {
        return Some(title_case(captures.get(1)?.as_str()));
    }

    None
}

/// 词首大写（连字符等非字母边界后同样大写，其余小写）
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
