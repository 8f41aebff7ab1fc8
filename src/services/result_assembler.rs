//! 结果整理与格式化
//!
//! 去掉漏网的页眉/章节标题，统计数量，并输出为列表、Python 字典、
//! JSON、Python 模块或预览文本。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppResult, ExtractError};
use crate::models::{QuestionMap, QuestionOption};

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 编号题干列表
    List,
    /// Python 字典字面量
    Dict,
    Json,
    /// 可直接 import 的 Python 模块
    Python,
    /// 带选项的预览文本
    Preview,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::List,
        OutputFormat::Dict,
        OutputFormat::Json,
        OutputFormat::Python,
        OutputFormat::Preview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::List => "list",
            OutputFormat::Dict => "dict",
            OutputFormat::Json => "json",
            OutputFormat::Python => "python",
            OutputFormat::Preview => "preview",
        }
    }

    /// 输出文件的扩展名
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::List => "list.txt",
            OutputFormat::Dict => "dict.txt",
            OutputFormat::Json => "json",
            OutputFormat::Python => "py",
            OutputFormat::Preview => "preview.txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExtractError::config_value("OUTPUT_FORMATS", s, "输出格式"))
    }
}

/// 提取统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub questions: usize,
    pub options: usize,
    pub watermarks_filtered: usize,
}

impl ExtractionStats {
    pub fn new(questions: &QuestionMap, watermarks_filtered: usize) -> Self {
        Self {
            questions: questions.len(),
            options: questions.option_count(),
            watermarks_filtered,
        }
    }
}

impl std::ops::AddAssign for ExtractionStats {
    fn add_assign(&mut self, other: Self) {
        self.questions += other.questions;
        self.options += other.options;
        self.watermarks_filtered += other.watermarks_filtered;
    }
}

/// 去掉题干中含 `page` / `section`（忽略大小写）的条目
pub fn finalize(mut questions: QuestionMap) -> QuestionMap {
    questions.retain(|question, _| !is_page_or_section(question));
    questions
}

fn is_page_or_section(question: &str) -> bool {
    let lower = question.to_lowercase();
    lower.contains("page") || lower.contains("section")
}

/// 按格式渲染
pub fn render(questions: &QuestionMap, format: OutputFormat) -> AppResult<String> {
    Ok(match format {
        OutputFormat::List => to_list(questions),
        OutputFormat::Dict => to_python_dict(questions),
        OutputFormat::Json => to_json(questions)?,
        OutputFormat::Python => to_python_module(questions),
        OutputFormat::Preview => to_preview(questions),
    })
}

/// `1. 题干`，条目之间空一行
pub fn to_list(questions: &QuestionMap) -> String {
    questions
        .questions()
        .enumerate()
        .map(|(i, question)| format!("{}. {}", i + 1, question))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Python 字典字面量：`{"题干": [("A", "内容"), ...]}`
pub fn to_python_dict(questions: &QuestionMap) -> String {
    let entries = questions
        .iter()
        .map(|(question, options)| {
            format!(
                "    \"{}\": {}",
                escape_quotes(question),
                format_option_tuples(options)
            )
        })
        .collect::<Vec<_>>();

    format!("{{\n{}\n}}", entries.join(",\n"))
}

fn format_option_tuples(options: &[QuestionOption]) -> String {
    let tuples = options
        .iter()
        .map(|o| format!("(\"{}\", \"{}\")", o.letter, escape_quotes(&o.body)))
        .collect::<Vec<_>>();
    format!("[{}]", tuples.join(", "))
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// 缩进两格的 JSON 对象，顺序与文档一致
pub fn to_json(questions: &QuestionMap) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(questions)?)
}

pub fn to_python_module(questions: &QuestionMap) -> String {
    format!(
        "# Extracted Questions from Worksheet\n# Format: {{\"question\": [(\"A\", \"option\"), (\"B\", \"option\"), ...]}}\n\nquestions = {}\n",
        to_python_dict(questions)
    )
}

pub fn to_preview(questions: &QuestionMap) -> String {
    let mut out = String::new();
    for (i, (question, options)) in questions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, question));
        if options.is_empty() {
            out.push_str("   (no options detected)\n");
        }
        for option in options {
            out.push_str(&format!("   {}. {}\n", option.letter, option.body));
        }
        out.push('\n');
    }
    out
}
