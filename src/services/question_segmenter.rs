//! 题目切分状态机
//!
//! 状态只有两种：`Idle`（尚未遇到题目）和 `Collecting`（正在收集一道题）。
//! [`step`] 是纯转移函数：(状态, 行) → (新状态, 效果)，
//! [`segment`] 负责逐行驱动并把完成的题目写入 [`QuestionMap`]。
//!
//! 每一行按以下顺序判断：
//! 1. 收集中且整行恰好是一个选项 → 追加选项
//! 2. 题目开头（`12.` `Q3)` `Question 4:` …）→ 落盘上一题，开始新题
//! 3. 收集中 → 行内切分选项，或作为题干续行
//! 4. 其余情况丢弃

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

use crate::models::{QuestionMap, QuestionRecord};
use crate::services::option_tokenizer::{parse_single_option, tokenize};

/// 题干续行的最小长度（不含）
const MIN_CONTINUATION_LEN: usize = 5;

/// 落盘时题干的最小长度（不含）
const MIN_QUESTION_LEN: usize = 8;

/// 题目开头：可选空白、可选 `Q` / `Question` 标签、数字、分隔符
static QUESTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:q(?:uestion)?\s*)?\d+[.):\-]").expect("题目开头正则无效")
});

/// 状态机状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SegmenterState {
    #[default]
    Idle,
    Collecting(QuestionRecord),
}

/// 处理一行后产生的效果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEffect {
    /// 行被丢弃
    Dropped,
    /// 行被并入当前题目（题干或选项）
    Absorbed,
    /// 新题目开始；`previous` 是需要落盘的上一题
    Started { previous: Option<QuestionRecord> },
}

/// 如果行以题目编号开头，返回去掉编号后的剩余部分
pub fn strip_question_start(line: &str) -> Option<&str> {
    QUESTION_START.find(line).map(|m| &line[m.end()..])
}

/// 状态转移函数
///
/// # 参数
/// - `state`: 当前状态
/// - `line`: 已去空白的非空行
///
/// # 返回
/// 新状态以及该行产生的效果
pub fn step(state: SegmenterState, line: &str) -> (SegmenterState, LineEffect) {
    match state {
        SegmenterState::Idle => match strip_question_start(line) {
            Some(rest) => (
                SegmenterState::Collecting(start_record(rest)),
                LineEffect::Started { previous: None },
            ),
            None => (SegmenterState::Idle, LineEffect::Dropped),
        },
        SegmenterState::Collecting(mut record) => {
            // 选项行优先于题目开头判断
            if let Some(option) = parse_single_option(line) {
                record.options.push(option);
                return (SegmenterState::Collecting(record), LineEffect::Absorbed);
            }

            if let Some(rest) = strip_question_start(line) {
                return (
                    SegmenterState::Collecting(start_record(rest)),
                    LineEffect::Started {
                        previous: Some(record),
                    },
                );
            }

            let effect = if continue_record(&mut record, line) {
                LineEffect::Absorbed
            } else {
                LineEffect::Dropped
            };
            (SegmenterState::Collecting(record), effect)
        }
    }
}

/// 把题目写入映射
///
/// 题干压缩空白后长度不超过 8 时整条丢弃；相同题干覆盖旧值。
///
/// # 返回
/// 是否写入
pub fn flush_into(map: &mut QuestionMap, record: QuestionRecord) -> bool {
    let question = record.normalized_text();
    if question.chars().count() <= MIN_QUESTION_LEN {
        trace!("丢弃过短题目: {:?}", question);
        return false;
    }
    if map.insert(question.clone(), record.options).is_some() {
        debug!("重复题干，覆盖旧选项: {}", question);
    }
    true
}

/// 把过滤后的文本切分为题目映射
pub fn segment(text: &str) -> QuestionMap {
    let mut map = QuestionMap::new();
    let mut state = SegmenterState::Idle;

    for line in text.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        let (next, effect) = step(state, line);
        if let LineEffect::Started {
            previous: Some(record),
        } = effect
        {
            flush_into(&mut map, record);
        }
        state = next;
    }

    if let SegmenterState::Collecting(record) = state {
        flush_into(&mut map, record);
    }

    map
}

fn start_record(rest: &str) -> QuestionRecord {
    let tokenized = tokenize(rest);
    if tokenized.has_options() {
        QuestionRecord::with_options(tokenized.leading_text, tokenized.options)
    } else {
        QuestionRecord::new(rest.trim())
    }
}

/// 处理收集状态下的普通行，返回该行是否被采用
fn continue_record(record: &mut QuestionRecord, line: &str) -> bool {
    let tokenized = tokenize(line);

    if tokenized.has_options() {
        if !record.has_options() && !tokenized.leading_text.is_empty() {
            record.append_text(&tokenized.leading_text);
        }
        record.options.extend(tokenized.options);
        return true;
    }

    if !record.has_options()
        && line.chars().count() > MIN_CONTINUATION_LEN
        && !is_page_or_section_heading(line)
    {
        record.append_text(line);
        return true;
    }

    false
}

/// 行是否以单词 `page` / `section` 开头（忽略大小写）
///
/// 单词后紧跟的不能是字母或数字，所以 `Page-2`、`Section-B:` 算，`Pages` 不算。
fn is_page_or_section_heading(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    ["page", "section"].iter().any(|word| {
        lower
            .strip_prefix(word)
            .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OptionLetter, QuestionOption};

    fn opts(pairs: &[(OptionLetter, &str)]) -> Vec<QuestionOption> {
        pairs
            .iter()
            .map(|&(letter, body)| QuestionOption::new(letter, body).unwrap())
            .collect()
    }

    #[test]
    fn test_question_start_patterns() {
        assert_eq!(strip_question_start("1. What"), Some(" What"));
        assert_eq!(strip_question_start("  12) Name"), Some(" Name"));
        assert_eq!(strip_question_start("Q3: Define"), Some(" Define"));
        assert_eq!(strip_question_start("q 4- Define"), Some(" Define"));
        assert_eq!(strip_question_start("Question 5. Explain"), Some(" Explain"));
        assert_eq!(strip_question_start("2+2 is four"), None);
        assert_eq!(strip_question_start("A. Paris"), None);
        assert_eq!(strip_question_start("Quiz 1. intro"), None);
    }

    #[test]
    fn test_inline_question_and_options() {
        let map = segment("1. What is 2+2? a. 3 b. 4 c. 5 d. 6");
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("What is 2+2?"),
            Some(
                opts(&[
                    (OptionLetter::A, "3"),
                    (OptionLetter::B, "4"),
                    (OptionLetter::C, "5"),
                    (OptionLetter::D, "6"),
                ])
                .as_slice()
            )
        );
    }

    #[test]
    fn test_stacked_options() {
        let map = segment("2) Capital of France?\nA. Paris\nB. Lyon");
        assert_eq!(
            map.get("Capital of France?"),
            Some(opts(&[(OptionLetter::A, "Paris"), (OptionLetter::B, "Lyon")]).as_slice())
        );
    }

    #[test]
    fn test_multi_line_question_text() {
        let text = "3. Which of the following\nstatements about photosynthesis\nis correct?\nA. It releases oxygen\nB. It needs no light";
        let map = segment(text);
        assert_eq!(map.len(), 1);
        let (question, options) = map.iter().next().unwrap();
        assert_eq!(
            question,
            "Which of the following statements about photosynthesis is correct?"
        );
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_options_freeze_question_text() {
        let text = "4. Pick the mammal here\nA. Shark\nsome stray trailing words\nB. Whale";
        let map = segment(text);
        assert_eq!(
            map.get("Pick the mammal here"),
            Some(opts(&[(OptionLetter::A, "Shark"), (OptionLetter::B, "Whale")]).as_slice())
        );
    }

    #[test]
    fn test_leading_text_before_inline_options_is_appended() {
        let text = "5. Choose the prime\nnumber below: a) 4 b) 7";
        let map = segment(text);
        assert_eq!(
            map.get("Choose the prime number below:"),
            Some(opts(&[(OptionLetter::A, "4"), (OptionLetter::B, "7")]).as_slice())
        );
    }

    #[test]
    fn test_short_and_heading_continuations_dropped() {
        let text = "6. Name the gas we breathe\nok\nPage 2 of 4\nSection: Science";
        let map = segment(text);
        assert_eq!(map.questions().collect::<Vec<_>>(), vec!["Name the gas we breathe"]);
    }

    #[test]
    fn test_text_before_first_question_discarded() {
        let map = segment("Name: ______________\nClass: ___\n1. First real question?");
        assert_eq!(map.questions().collect::<Vec<_>>(), vec!["First real question?"]);
    }

    #[test]
    fn test_short_questions_discarded() {
        let map = segment("1. Short\n2. Long enough question?");
        assert_eq!(map.questions().collect::<Vec<_>>(), vec!["Long enough question?"]);
    }

    #[test]
    fn test_question_without_options_kept() {
        let map = segment("7. Explain the water cycle.");
        assert_eq!(map.get("Explain the water cycle."), Some(&[][..]));
    }

    #[test]
    fn test_duplicate_question_last_write_wins() {
        let text = "1. Same question text\nA. first\n2. Same   question text\nB. second";
        let map = segment(text);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.get("Same question text"),
            Some(opts(&[(OptionLetter::B, "second")]).as_slice())
        );
    }

    #[test]
    fn test_step_transitions() {
        let (state, effect) = step(SegmenterState::Idle, "random header");
        assert_eq!(state, SegmenterState::Idle);
        assert_eq!(effect, LineEffect::Dropped);

        let (state, effect) = step(SegmenterState::Idle, "1. Opening question");
        assert_eq!(effect, LineEffect::Started { previous: None });

        let (state, effect) = step(state, "A. answer");
        assert_eq!(effect, LineEffect::Absorbed);

        let (_, effect) = step(state, "2. Next question");
        assert_eq!(
            effect,
            LineEffect::Started {
                previous: Some(QuestionRecord::with_options(
                    "Opening question",
                    opts(&[(OptionLetter::A, "answer")])
                ))
            }
        );
    }

    #[test]
    fn test_empty_input_yields_empty_map() {
        assert!(segment("").is_empty());
        assert!(segment("   \n\n  ").is_empty());
    }

    #[test]
    fn test_page_heading_detection() {
        assert!(is_page_or_section_heading("Page 3"));
        assert!(is_page_or_section_heading("SECTION: B"));
        assert!(!is_page_or_section_heading("Pages of history are long"));
        assert!(!is_page_or_section_heading("The page is blank"));
    }

    #[test]
    fn test_stacked_option_body_mentions_other_options() {
        let map = segment("3. Which statements are correct?\nA. Only one\nD. Both a) and b)");
        assert_eq!(
            map.get("Which statements are correct?"),
            Some(opts(&[(OptionLetter::A, "Only one"), (OptionLetter::D, "Both a) and b)")]).as_slice())
        );
    }

    #[test]
    fn test_page_and_section_headings_with_punctuation() {
        assert!(is_page_or_section_heading("Page-2 of 4"));
        assert!(is_page_or_section_heading("Section-B: Physics"));
        assert!(is_page_or_section_heading("page"));
        assert!(!is_page_or_section_heading("Pages of the book are torn"));
        assert!(!is_page_or_section_heading("Sectional sofa sizes"));

        let map = segment(
            "1. Name the largest ocean on Earth\nPage-2 of 4\n2. Name the smallest ocean\nSection-B: Physics",
        );
        assert_eq!(
            map.questions().collect::<Vec<_>>(),
            vec!["Name the largest ocean on Earth", "Name the smallest ocean"]
        );
    }
}
