//! 水印 / 噪声行过滤
//!
//! 两遍处理：
//! 1. 先对整篇文本统计每行（小写、去空白、长度 > 3）出现的次数
//! 2. 再逐行判断，依次检查关键字、重复次数、短全大写行
//!
//! 重复次数的阈值依赖全文统计，不能改成单遍流式处理。

use phf::phf_set;
use std::collections::HashMap;
use tracing::{debug, trace};

/// 默认过滤灵敏度
pub const DEFAULT_SENSITIVITY: f64 = 0.5;

/// 出现即视为水印的关键字（子串匹配）
static WATERMARK_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "watermark",
    "copy",
    "sample",
    "preview",
    "demo",
    "trial",
    "confidential",
    "draft",
};

/// 单行的过滤结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineVerdict {
    /// 空行或过短，不计数
    Blank,
    /// 含水印关键字
    Keyword,
    /// 全文重复次数超过阈值
    Repeated,
    /// 短的全大写行
    ShortCaps,
    Keep,
}

impl LineVerdict {
    /// 是否计入过滤行数
    pub fn is_counted(self) -> bool {
        matches!(
            self,
            LineVerdict::Keyword | LineVerdict::Repeated | LineVerdict::ShortCaps
        )
    }
}

/// 一次过滤的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 保留的原始行，以换行连接
    pub clean_text: String,
    /// 被判定为水印/噪声而移除的行数
    pub removed: usize,
}

/// 水印过滤器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseFilter {
    sensitivity: f64,
}

impl NoiseFilter {
    /// 创建过滤器，灵敏度会被限制在 [0, 1]
    pub fn new(sensitivity: f64) -> Self {
        let sensitivity = if sensitivity.is_nan() {
            DEFAULT_SENSITIVITY
        } else {
            sensitivity.clamp(0.0, 1.0)
        };
        Self { sensitivity }
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// 重复行阈值：`max(2, 5 × 灵敏度)`
    ///
    /// 灵敏度 0 时阈值为 2（最激进），灵敏度 1 时为 5（最宽松）
    pub fn repeat_threshold(&self) -> f64 {
        (5.0 * self.sensitivity).max(2.0)
    }

    /// 过滤整段文本
    pub fn filter(&self, text: &str) -> FilterOutcome {
        let frequencies = line_frequencies(text);
        let threshold = self.repeat_threshold();

        let mut kept = Vec::new();
        let mut removed = 0;

        for line in text.split('\n') {
            let verdict = classify_line(line, &frequencies, threshold);
            match verdict {
                LineVerdict::Keep => kept.push(line),
                LineVerdict::Blank => {}
                _ => {
                    removed += 1;
                    trace!("过滤行 ({:?}): {}", verdict, line.trim());
                }
            }
        }

        debug!(
            "水印过滤完成: 保留 {} 行, 移除 {} 行 (阈值 {:.1})",
            kept.len(),
            removed,
            threshold
        );

        FilterOutcome {
            clean_text: kept.join("\n"),
            removed,
        }
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVITY)
    }
}

/// 以给定灵敏度过滤文本
pub fn filter(text: &str, sensitivity: f64) -> FilterOutcome {
    NoiseFilter::new(sensitivity).filter(text)
}

fn line_frequencies(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for line in text.split('\n') {
        let normalized = line.trim().to_lowercase();
        if normalized.chars().count() > 3 {
            *counts.entry(normalized).or_insert(0) += 1;
        }
    }
    counts
}

fn classify_line(line: &str, frequencies: &HashMap<String, usize>, threshold: f64) -> LineVerdict {
    let normalized = line.trim().to_lowercase();

    if normalized.chars().count() < 2 {
        return LineVerdict::Blank;
    }

    if WATERMARK_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        return LineVerdict::Keyword;
    }

    if frequencies
        .get(&normalized)
        .is_some_and(|&count| count as f64 > threshold)
    {
        return LineVerdict::Repeated;
    }

    if is_short_caps(line) {
        return LineVerdict::ShortCaps;
    }

    LineVerdict::Keep
}

/// 未去空白的长度在 (4, 25) 之间，且没有小写字母
fn is_short_caps(line: &str) -> bool {
    let len = line.chars().count();
    len > 4 && len < 25 && line == line.to_uppercase()
}
