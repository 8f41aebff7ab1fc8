//! 选项切分
//!
//! 在一行文字里找出 `a.` `B)` `c:` `d]` `A®` 这样的选项标记，
//! 把行切成"标记前的文字 + 有序选项列表"。
//!
//! 标记必须位于行首或紧跟空白，这样 `Lyon.` 这类单词结尾不会被误认。
//! 扫描是显式的从左到右扫描，不依赖正则引擎的回溯行为。

use crate::models::{OptionLetter, QuestionOption};

/// 紧跟在选项字母后的分隔符
const MARKER_SEPARATORS: [char; 5] = ['.', ':', ')', ']', '®'];

/// 行内的一个选项标记，偏移量为字节下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    letter: OptionLetter,
    start: usize,
    end: usize,
}

/// 切分结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedLine {
    /// 第一个标记之前的文字（已去空白）；没有标记时为整行
    pub leading_text: String,
    pub options: Vec<QuestionOption>,
}

impl TokenizedLine {
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}

/// 切分一行文字
///
/// 内容为空的选项会被直接丢弃，字母统一转为大写。
pub fn tokenize(line: &str) -> TokenizedLine {
    let markers = find_markers(line);

    let Some(first) = markers.first() else {
        return TokenizedLine {
            leading_text: line.trim().to_string(),
            options: Vec::new(),
        };
    };

    let options = markers
        .iter()
        .enumerate()
        .filter_map(|(i, marker)| {
            let body_end = markers.get(i + 1).map_or(line.len(), |next| next.start);
            QuestionOption::new(marker.letter, &line[marker.end..body_end])
        })
        .collect();

    TokenizedLine {
        leading_text: line[..first.start].trim().to_string(),
        options,
    }
}

/// 整行是一个选项（`A. 内容`）时返回该选项
///
/// 行首必须是标记，之后的全部文字都是选项内容，其中再出现的
/// `a)` `b)` 等不会再被切开。内容不能为空。
pub fn parse_single_option(line: &str) -> Option<QuestionOption> {
    let line = line.trim();
    let marker = find_markers(line).into_iter().next()?;
    if marker.start != 0 {
        return None;
    }
    QuestionOption::new(marker.letter, &line[marker.end..])
}

fn find_markers(line: &str) -> Vec<Marker> {
    let mut markers = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let at_boundary = prev.map_or(true, char::is_whitespace);

        if at_boundary {
            if let Some(letter) = OptionLetter::from_char(c) {
                if let Some(&(sep_idx, sep)) = chars.peek() {
                    if MARKER_SEPARATORS.contains(&sep) {
                        chars.next();
                        markers.push(Marker {
                            letter,
                            start: idx,
                            end: sep_idx + sep.len_utf8(),
                        });
                        prev = Some(sep);
                        continue;
                    }
                }
            }
        }

        prev = Some(c);
    }

    markers
}
