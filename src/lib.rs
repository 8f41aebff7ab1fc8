//! # Worksheet Extract
//!
//! 从扫描件 / PDF 练习卷的提取文本中识别选择题的 Rust 库和命令行程序
//!
//! OCR 引擎和 PDF 文本层读取器是外部协作方，本库只消费它们产出的
//! 纯文本（`.txt`）或词框（`.json`），输出"题干 → 选项列表"的有序映射。
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 选项、题目记录、题目映射、文档来源，以及异步加载器
//!
//! ### ② 业务能力层（Services）
//! - `NoiseFilter` - 两遍扫描的水印/噪声行过滤
//! - `option_tokenizer` - 行内选项标记切分
//! - `question_segmenter` - Idle / Collecting 状态机
//! - `result_assembler` - 结果整理与格式化
//! - `ResultWriter` - 写出结果文件
//!
//! ### ③ 流程层（Workflow）
//! - `ExtractionFlow` - 一份文档的完整流程（过滤 → 切分 → 整理）
//! - `extract` - 纯函数形式的解析核心
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量加载、并发调度、全局统计
//! - `orchestrator/document_processor` - 单个文档处理与结果写出
//!
//! ## 示例
//!
//! ```
//! use worksheet_extract::extract;
//!
//! let extraction = extract("1. What is 2+2? a. 3 b. 4 c. 5 d. 6", 0.5);
//! let options = extraction.questions.get("What is 2+2?").unwrap();
//! assert_eq!(options.len(), 4);
//! assert_eq!(options[1].body, "4");
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppResult, ExtractError};
pub use models::{OptionLetter, QuestionMap, QuestionOption, QuestionRecord, SourceDocument};
pub use orchestrator::{App, RunSummary};
pub use services::{ExtractionStats, NoiseFilter, OutputFormat};
pub use workflow::{extract, Extraction, ExtractionCtx, ExtractionFlow, ExtractionOutcome};
