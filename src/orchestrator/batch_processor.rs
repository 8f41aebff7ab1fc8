//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的加载、并发调度和统计。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：写运行日志头、准备输出目录、创建提取流程
//! 2. **批量加载**：扫描并加载所有待处理的文档（`Vec<SourceDocument>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将文档分批次处理，每批完成后再开始下一批
//! 5. **全局统计**：汇总所有文档的处理结果
//!
//! 每个任务各自持有自己的文档和计数，任务之间不共享可变状态。

use crate::config::Config;
use crate::models::SourceDocument;
use crate::orchestrator::document_processor;
use crate::services::{ExtractionStats, ResultWriter};
use crate::utils::logging;
use crate::workflow::ExtractionFlow;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<ExtractionFlow>,
    writer: Arc<ResultWriter>,
}

/// 一次运行的汇总
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub stats: ExtractionStats,
}

impl RunSummary {
    fn absorb(&mut self, other: RunSummary) {
        self.total += other.total;
        self.success += other.success;
        self.failed += other.failed;
        self.stats += other.stats;
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        logging::init_log_file(&config.output_log_file)
            .with_context(|| format!("无法创建日志文件: {}", config.output_log_file))?;

        logging::log_startup(config.concurrency(), config.sensitivity());

        let writer = ResultWriter::new(&config.output_folder);
        writer.prepare().await.context("无法创建输出目录")?;

        let flow = ExtractionFlow::new(&config);

        Ok(Self {
            config,
            flow: Arc::new(flow),
            writer: Arc::new(writer),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        // 加载所有待处理的文档
        let documents = self.load_documents().await?;

        if documents.is_empty() {
            warn!("⚠️ 没有找到待处理的文档，程序结束");
            return Ok(RunSummary::default());
        }

        logging::log_documents_loaded(documents.len(), self.config.concurrency());

        let summary = self.process_all_documents(documents).await?;

        logging::print_final_stats(
            summary.success,
            summary.failed,
            summary.total,
            summary.stats.questions,
            summary.stats.options,
            summary.stats.watermarks_filtered,
            &self.config.output_log_file,
        );

        Ok(summary)
    }

    /// 加载文档
    async fn load_documents(&self) -> Result<Vec<SourceDocument>> {
        tracing::info!("\n📁 正在扫描待处理的文档...");
        crate::models::load_all_sources(&self.config.input_folder, self.config.line_tolerance)
            .await
            .with_context(|| format!("无法加载输入目录: {}", self.config.input_folder))
    }

    /// 处理所有文档
    pub async fn process_all_documents(
        &self,
        documents: Vec<SourceDocument>,
    ) -> Result<RunSummary> {
        let batch_size = self.config.concurrency();
        let semaphore = Arc::new(Semaphore::new(batch_size));
        let total = documents.len();
        let total_batches = total.div_ceil(batch_size);

        let mut summary = RunSummary::default();
        let mut remaining = documents.into_iter();
        let mut batch_start = 0;

        // 分批处理
        loop {
            let batch: Vec<SourceDocument> = remaining.by_ref().take(batch_size).collect();
            if batch.is_empty() {
                break;
            }

            let batch_num = batch_start / batch_size + 1;
            let batch_len = batch.len();
            let names: Vec<&str> = batch.iter().map(|doc| doc.name.as_str()).collect();
            logging::log_batch_start(batch_num, total_batches, &names);

            let batch_summary = self
                .process_batch(batch, batch_num, batch_start, semaphore.clone())
                .await?;

            summary.absorb(batch_summary);
            batch_start += batch_len;
        }

        Ok(summary)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch: Vec<SourceDocument>,
        batch_num: usize,
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<RunSummary> {
        let mut handles = Vec::with_capacity(batch.len());

        // 为本批创建并发任务
        for (idx, source) in batch.into_iter().enumerate() {
            let document_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let flow = Arc::clone(&self.flow);
            let writer = Arc::clone(&self.writer);
            let formats = self.config.output_formats.clone();
            let log_file = self.config.output_log_file.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                document_processor::process_document(
                    &flow,
                    &writer,
                    source,
                    document_index,
                    &formats,
                    &log_file,
                )
                .await
            });
            handles.push((document_index, handle));
        }

        let (indices, handles): (Vec<usize>, Vec<_>) = handles.into_iter().unzip();

        // 等待本批所有任务完成
        let mut summary = RunSummary {
            total: indices.len(),
            ..Default::default()
        };

        let mut finished = Vec::new();

        for (document_index, joined) in indices.into_iter().zip(join_all(handles).await) {
            match joined {
                Ok(Ok(outcome)) => {
                    summary.success += 1;
                    summary.stats += outcome.stats;
                    finished.push((
                        outcome.document_name,
                        outcome.stats.questions,
                        outcome.stats.options,
                    ));
                }
                Ok(Err(e)) => {
                    error!("[文档 #{}] ❌ 处理过程中发生错误: {:#}", document_index, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("[文档 #{}] 任务执行失败: {}", document_index, e);
                    summary.failed += 1;
                }
            }
        }

        logging::log_batch_complete(batch_num, &finished, summary.failed);
        Ok(summary)
    }
}
