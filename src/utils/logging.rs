//! 日志工具模块
//!
//! 初始化 tracing 订阅器，写运行日志文件，并提供批处理各阶段的日志输出

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 订阅器
///
/// 优先使用 `RUST_LOG`；未设置时默认 `info`，详细模式下为 `debug`。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n题目提取日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加一行
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(max_concurrent: usize, sensitivity: f64) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量题目提取模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!("🧹 水印过滤灵敏度: {:.2}", sensitivity);
    info!("{}", "=".repeat(60));
}

/// 记录文档加载信息
pub fn log_documents_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的文档", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
}

/// 记录批次开始信息，列出本批文档名
pub fn log_batch_start(batch_num: usize, total_batches: usize, document_names: &[&str]) {
    info!("\n{}", "=".repeat(60));
    info!(
        "📦 批次 {}/{}: {} 份文档",
        batch_num,
        total_batches,
        document_names.len()
    );
    for name in document_names {
        debug!("   · {}", name);
    }
}

/// 记录批次完成信息，逐个文档给出题目数和选项数
///
/// # 参数
/// - `documents`: 成功的文档 (名称, 题目数, 选项数)
/// - `failed`: 失败的文档数
pub fn log_batch_complete(batch_num: usize, documents: &[(String, usize, usize)], failed: usize) {
    let questions: usize = documents.iter().map(|(_, questions, _)| questions).sum();
    info!(
        "✓ 批次 {} 结束: 成功 {} 份, 失败 {} 份, 共 {} 道题",
        batch_num,
        documents.len(),
        failed,
        questions
    );
    for (name, questions, options) in documents {
        info!("   · {:<24} 题目 {:>3} | 选项 {:>3}", name, questions, options);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    questions: usize,
    options: usize,
    watermarks_filtered: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("📝 题目: {} | 选项: {} | 过滤水印行: {}", questions, options, watermarks_filtered);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 日志里显示的题干预览，超过 `max_chars` 个字符时截断并加 `…`
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
