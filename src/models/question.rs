//! 题目数据模型
//!
//! 选项、正在构建的题目记录，以及按文档顺序排列的题目映射

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// 选项字母，只接受 A-D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// 从字符解析选项字母（大小写均可）
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OptionLetter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 单个选项：(字母, 内容)
///
/// 内容已去除首尾空白且不为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub letter: OptionLetter,
    pub body: String,
}

impl QuestionOption {
    /// 创建选项
    ///
    /// # 返回
    /// 内容去除空白后为空时返回 `None`
    pub fn new(letter: OptionLetter, body: &str) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        Some(Self {
            letter,
            body: body.to_string(),
        })
    }
}

/// JSON 中序列化为 `["A", "内容"]`
impl Serialize for QuestionOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.letter)?;
        pair.serialize_element(&self.body)?;
        pair.end()
    }
}

/// 正在构建中的题目
///
/// 一旦出现选项，题干就不再追加续行
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionRecord {
    pub text: String,
    pub options: Vec<QuestionOption>,
}

impl QuestionRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(text: impl Into<String>, options: Vec<QuestionOption>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// 以空格拼接一段续行文字
    pub fn append_text(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(fragment);
    }

    /// 合并连续空白后的题干，作为映射的 key
    pub fn normalized_text(&self) -> String {
        collapse_whitespace(&self.text)
    }
}

/// 把任意连续空白压缩为单个空格，并去除首尾空白
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 题干 → 选项列表的有序映射
///
/// 顺序为题目在文档中首次出现的顺序。重复的题干会覆盖旧的选项，
/// 但保留首次出现时的位置。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionMap {
    entries: Vec<(String, Vec<QuestionOption>)>,
    positions: HashMap<String, usize>,
}

impl QuestionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入题目，返回被覆盖的旧选项（如果有）
    pub fn insert(
        &mut self,
        question: String,
        options: Vec<QuestionOption>,
    ) -> Option<Vec<QuestionOption>> {
        if let Some(&pos) = self.positions.get(&question) {
            return Some(std::mem::replace(&mut self.entries[pos].1, options));
        }
        self.positions.insert(question.clone(), self.entries.len());
        self.entries.push((question, options));
        None
    }

    pub fn get(&self, question: &str) -> Option<&[QuestionOption]> {
        self.positions
            .get(question)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn contains(&self, question: &str) -> bool {
        self.positions.contains_key(question)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[QuestionOption])> {
        self.entries
            .iter()
            .map(|(question, options)| (question.as_str(), options.as_slice()))
    }

    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(question, _)| question.as_str())
    }

    /// 所有题目的选项总数
    pub fn option_count(&self) -> usize {
        self.entries.iter().map(|(_, options)| options.len()).sum()
    }

    /// 只保留满足条件的题目，顺序不变
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &[QuestionOption]) -> bool) {
        self.entries
            .retain(|(question, options)| keep(question.as_str(), options.as_slice()));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, (question, _))| (question.clone(), pos))
            .collect();
    }
}

impl Serialize for QuestionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (question, options) in &self.entries {
            map.serialize_entry(question, options)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(letter: OptionLetter, body: &str) -> QuestionOption {
        QuestionOption::new(letter, body).unwrap()
    }

    #[test]
    fn test_option_letter_from_char() {
        assert_eq!(OptionLetter::from_char('a'), Some(OptionLetter::A));
        assert_eq!(OptionLetter::from_char('D'), Some(OptionLetter::D));
        assert_eq!(OptionLetter::from_char('e'), None);
        assert_eq!(OptionLetter::from_char('1'), None);
    }

    #[test]
    fn test_empty_option_body_rejected() {
        assert!(QuestionOption::new(OptionLetter::A, "   ").is_none());
        assert_eq!(option(OptionLetter::B, "  Lyon ").body, "Lyon");
    }

    #[test]
    fn test_append_text_joins_with_space() {
        let mut record = QuestionRecord::new("Which of the");
        record.append_text("  following is true?");
        assert_eq!(record.text, "Which of the following is true?");

        let mut empty = QuestionRecord::default();
        empty.append_text("first line");
        assert_eq!(empty.text, "first line");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_duplicate_question_keeps_first_position() {
        let mut map = QuestionMap::new();
        map.insert("first question".into(), vec![option(OptionLetter::A, "x")]);
        map.insert("second question".into(), vec![]);
        let replaced = map.insert("first question".into(), vec![option(OptionLetter::B, "y")]);

        assert_eq!(replaced, Some(vec![option(OptionLetter::A, "x")]));
        assert_eq!(
            map.questions().collect::<Vec<_>>(),
            vec!["first question", "second question"]
        );
        assert_eq!(
            map.get("first question"),
            Some(&[option(OptionLetter::B, "y")][..])
        );
    }

    #[test]
    fn test_retain_rebuilds_positions() {
        let mut map = QuestionMap::new();
        map.insert("drop me please".into(), vec![]);
        map.insert("keep me please".into(), vec![option(OptionLetter::C, "z")]);
        map.retain(|question, _| question.starts_with("keep"));

        assert_eq!(map.len(), 1);
        assert!(!map.contains("drop me please"));
        map.insert("keep me please".into(), vec![]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.option_count(), 0);
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut map = QuestionMap::new();
        map.insert("zebra question".into(), vec![option(OptionLetter::A, "1")]);
        map.insert("apple question".into(), vec![]);

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zebra question":[["A","1"]],"apple question":[]}"#);
    }
}
