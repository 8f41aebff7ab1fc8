//! 文档处理上下文
//!
//! 封装"我正在处理第几份文档、它叫什么"这一信息

use std::fmt::Display;

/// 文档处理上下文
#[derive(Debug, Clone)]
pub struct ExtractionCtx {
    /// 文档在本次运行中的序号（从1开始，仅用于日志显示）
    pub document_index: usize,

    /// 文档名
    pub document_name: String,
}

impl ExtractionCtx {
    pub fn new(document_index: usize, document_name: impl Into<String>) -> Self {
        Self {
            document_index,
            document_name: document_name.into(),
        }
    }
}

impl Display for ExtractionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 #{} {}]", self.document_index, self.document_name)
    }
}
