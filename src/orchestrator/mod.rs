//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载文档（Vec<SourceDocument>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 运行提取流程
//! - 写出结果文件
//! - 追加运行日志
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<SourceDocument>)
//!     ↓
//! document_processor (处理单个 SourceDocument)
//!     ↓
//! workflow::ExtractionFlow (过滤 → 切分 → 整理)
//!     ↓
//! services (能力层：noise_filter / option_tokenizer / question_segmenter / result_assembler)
//! ```

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::{App, RunSummary};
pub use document_processor::process_document;
