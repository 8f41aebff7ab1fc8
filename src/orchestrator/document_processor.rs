//! 单个文档处理器 - 编排层
//!
//! 职责：对一份文档跑完提取流程，写出结果，记录运行日志

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::models::SourceDocument;
use crate::services::{OutputFormat, ResultWriter};
use crate::utils::logging;
use crate::workflow::{ExtractionCtx, ExtractionFlow, ExtractionOutcome};

/// 处理单个文档
///
/// # 参数
/// - `flow`: 提取流程
/// - `writer`: 结果写出服务
/// - `source`: 文档
/// - `document_index`: 文档序号（用于日志）
/// - `formats`: 需要写出的格式
/// - `log_file_path`: 运行日志文件
///
/// # 返回
/// 文档的提取结果
pub async fn process_document(
    flow: &ExtractionFlow,
    writer: &ResultWriter,
    source: SourceDocument,
    document_index: usize,
    formats: &[OutputFormat],
    log_file_path: &str,
) -> Result<ExtractionOutcome> {
    let ctx = ExtractionCtx::new(document_index, source.name.clone());
    info!("{} 开始处理", ctx);

    let outcome = flow.run(&source, &ctx);

    if outcome.questions.is_empty() {
        warn!("{} ⚠️ 没有识别到任何题目", ctx);
    }

    let written = writer
        .write(&outcome.document_name, &outcome.questions, formats)
        .await
        .with_context(|| format!("{} 写出结果失败", ctx))?;

    for path in &written {
        info!("{} 💾 已写出: {}", ctx, path.display());
    }

    let summary = format!(
        "{} | 题目 {} | 选项 {} | 过滤水印行 {}",
        outcome.document_name,
        outcome.stats.questions,
        outcome.stats.options,
        outcome.stats.watermarks_filtered
    );
    if let Err(e) = logging::append_log_line(log_file_path, &summary) {
        warn!("{} 写入运行日志失败: {}", ctx, e);
    }

    info!("{} ✅ 文档处理完成", ctx);
    Ok(outcome)
}
