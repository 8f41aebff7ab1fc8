//! 文档提取流程 - 流程层
//!
//! 核心职责：定义"一份文档"的完整处理流程
//!
//! 流程顺序：
//! 1. 拼接各页原始文本
//! 2. 水印过滤（统计过滤行数）
//! 3. 题目切分
//! 4. 结果整理（去掉页眉/章节标题）

use tracing::{debug, info};

use crate::config::Config;
use crate::models::{QuestionMap, SourceDocument};
use crate::services::question_segmenter;
use crate::services::result_assembler::{self, ExtractionStats};
use crate::services::NoiseFilter;
use crate::utils::preview;
use crate::workflow::extraction_ctx::ExtractionCtx;

/// 解析核心的输出
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub questions: QuestionMap,
    /// 被水印过滤器移除的行数
    pub filtered_lines: usize,
}

/// 解析核心：(原始文本, 灵敏度) → (题目映射, 过滤行数)
///
/// 纯函数，不会失败；空输入得到空映射。
/// 返回的映射尚未去掉页眉/章节条目，见 [`result_assembler::finalize`]。
pub fn extract(raw_text: &str, sensitivity: f64) -> Extraction {
    extract_with(&NoiseFilter::new(sensitivity), raw_text)
}

fn extract_with(noise_filter: &NoiseFilter, raw_text: &str) -> Extraction {
    let filtered = noise_filter.filter(raw_text);
    Extraction {
        questions: question_segmenter::segment(&filtered.clean_text),
        filtered_lines: filtered.removed,
    }
}

/// 一份文档的处理结果
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub document_name: String,
    /// 整理后的题目
    pub questions: QuestionMap,
    pub stats: ExtractionStats,
}

/// 文档提取流程
///
/// - 不持有任何文档数据，每次 `run` 的状态互不共享
/// - 只做同步计算，不做 IO
#[derive(Debug, Clone)]
pub struct ExtractionFlow {
    noise_filter: NoiseFilter,
    verbose_logging: bool,
}

impl ExtractionFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            noise_filter: NoiseFilter::new(config.sensitivity()),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn with_sensitivity(sensitivity: f64) -> Self {
        Self {
            noise_filter: NoiseFilter::new(sensitivity),
            verbose_logging: false,
        }
    }

    pub fn run(&self, source: &SourceDocument, ctx: &ExtractionCtx) -> ExtractionOutcome {
        let raw_text = source.raw_text();
        info!(
            "{} 📄 共 {} 页, 原始文本 {} 行",
            ctx,
            source.page_count(),
            raw_text.lines().count()
        );

        let extraction = extract_with(&self.noise_filter, &raw_text);
        info!("{} 🧹 过滤水印行: {}", ctx, extraction.filtered_lines);

        let segmented = extraction.questions.len();
        let questions = result_assembler::finalize(extraction.questions);
        if questions.len() < segmented {
            debug!(
                "{} 去掉 {} 条页眉/章节标题",
                ctx,
                segmented - questions.len()
            );
        }

        let stats = ExtractionStats::new(&questions, extraction.filtered_lines);
        info!(
            "{} ✓ 识别题目 {} 道, 选项 {} 个",
            ctx, stats.questions, stats.options
        );

        if self.verbose_logging {
            self.log_questions(ctx, &questions);
        }

        ExtractionOutcome {
            document_name: source.name.clone(),
            questions,
            stats,
        }
    }

    fn log_questions(&self, ctx: &ExtractionCtx, questions: &QuestionMap) {
        for (i, (question, options)) in questions.iter().enumerate() {
            info!(
                "{}   {}. {} ({} 个选项)",
                ctx,
                i + 1,
                preview(question, 80),
                options.len()
            );
        }
    }
}
