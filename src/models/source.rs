//! 文本来源模型
//!
//! OCR 引擎和 PDF 文本层都被视为外部协作方，这里只描述它们的产出：
//! 按页的纯文本，或者带坐标的词框。

use serde::{Deserialize, Serialize};

use crate::services::text_assembler;

/// 文本来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// OCR 或文本层导出的纯文本（`.txt`）
    PlainText,
    /// 带位置信息的词框（`.json`）
    WordBoxes,
}

/// PDF 文本层或 OCR 输出的单个词
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    /// 页码（从 1 开始）
    #[serde(default = "default_page")]
    pub page: u32,
    pub x: f64,
    /// 基线纵坐标，同一行的词 y 值接近
    pub y: f64,
    pub text: String,
}

fn default_page() -> u32 {
    1
}

/// 一份待解析的文档
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// 文档名（不含扩展名），用于输出文件命名
    pub name: String,
    pub kind: SourceKind,
    /// 每页的原始文本
    pub pages: Vec<String>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, kind: SourceKind, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            pages,
        }
    }

    /// 直接由一段文本构造单页文档
    pub fn from_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, SourceKind::PlainText, vec![text.into()])
    }

    /// 拼接所有页面，得到送入过滤器的原始文本
    pub fn raw_text(&self) -> String {
        text_assembler::join_pages(&self.pages)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
