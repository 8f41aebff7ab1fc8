//! 原始文本拼装
//!
//! 把外部提取器的产出（按页文本或词框）整理成一段原始文本。
//! 每页之后追加一个换行，与逐页 OCR / 文本层读取再拼接的方式一致。

use std::collections::BTreeMap;

use crate::models::WordBox;

/// 纯文本文件中的分页符
pub const PAGE_BREAK: char = '\u{000C}';

/// 拼接多页文本，每页之后追加换行
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page.as_ref());
        text.push('\n');
    }
    text
}

/// 按分页符切分纯文本
pub fn split_pages(content: &str) -> Vec<String> {
    content.split(PAGE_BREAK).map(str::to_string).collect()
}

/// 把词框重建为按页文本
///
/// 同一页内先按基线 y 再按 x 排序；相邻词的 y 与当前行首词相差超过
/// `line_tolerance` 时另起一行，行内的词以空格连接。
/// `line_tolerance` 为无穷大时，每页的所有词会拼成一行。
///
/// # 参数
/// - `words`: 词框列表，顺序任意
/// - `line_tolerance`: 同一行允许的 y 偏差
///
/// # 返回
/// 按页码升序排列的每页文本
pub fn words_to_pages(words: &[WordBox], line_tolerance: f64) -> Vec<String> {
    let tolerance = if line_tolerance.is_nan() {
        0.0
    } else {
        line_tolerance.max(0.0)
    };

    let mut by_page: BTreeMap<u32, Vec<&WordBox>> = BTreeMap::new();
    for word in words.iter().filter(|w| !w.text.trim().is_empty()) {
        by_page.entry(word.page).or_default().push(word);
    }

    by_page
        .into_values()
        .map(|mut page_words| {
            page_words.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
            group_lines(&page_words, tolerance)
                .iter()
                .map(|line| render_line(line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

fn group_lines<'a>(sorted: &[&'a WordBox], tolerance: f64) -> Vec<Vec<&'a WordBox>> {
    let mut lines: Vec<Vec<&WordBox>> = Vec::new();
    let mut line_y = f64::NAN;

    for &word in sorted {
        match lines.last_mut() {
            Some(line) if (word.y - line_y).abs() <= tolerance => line.push(word),
            _ => {
                line_y = word.y;
                lines.push(vec![word]);
            }
        }
    }

    lines
}

fn render_line(line: &[&WordBox]) -> String {
    let mut words = line.to_vec();
    words.sort_by(|a, b| a.x.total_cmp(&b.x));
    words
        .iter()
        .map(|w| w.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}
