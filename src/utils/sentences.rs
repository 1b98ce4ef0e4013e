// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 句子切分
///
/// 将纯文本按句子切分，供提取管线逐句分析。
/// 规则：句末标点（. ! ?）之后紧跟空白与大写字母或数字视为句子边界；
/// 常见缩写（如 "e.g."、"Mt."）不产生边界。
pub fn segment_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    let mut i = 0;
    while i < len {
        let c = chars[i];
        current.push(c);

        if c == '.' || c == '!' || c == '?' {
            if c == '.' && is_abbreviation(&current) {
                i += 1;
                continue;
            }

            // Look ahead past whitespace
            let mut j = i + 1;
            let mut saw_space = false;
            while j < len && chars[j].is_whitespace() {
                saw_space = true;
                j += 1;
            }

            let at_end = j >= len;
            let next_starts_sentence =
                !at_end && (chars[j].is_uppercase() || chars[j].is_ascii_digit());

            if at_end || (saw_space && next_starts_sentence) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    sentences.push(trimmed.to_string());
                }
                current.clear();
                i = j;
                continue;
            }
        }

        i += 1;
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }

    sentences
}

/// 判断当前累积文本是否以常见缩写结尾
fn is_abbreviation(current: &str) -> bool {
    let trimmed = current.trim_end_matches('.');
    let last_word = trimmed.rsplit(|c: char| c.is_whitespace()).next().unwrap_or("");

    // Single letters ("U.", initials) and short known abbreviations
    if last_word.len() == 1 && last_word.chars().all(|c| c.is_alphabetic()) {
        return true;
    }

    const ABBREVIATIONS: [&str; 8] = ["mr", "mrs", "dr", "st", "mt", "vs", "etc", "approx"];
    ABBREVIATIONS
        .iter()
        .any(|a| last_word.eq_ignore_ascii_case(a))
}
