use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{AppResult, ExtractError};
use crate::services::noise_filter::DEFAULT_SENSITIVITY;
use crate::services::OutputFormat;

/// 指定 TOML 配置文件路径的环境变量
pub const CONFIG_PATH_VAR: &str = "EXTRACT_CONFIG";

/// 程序配置
///
/// 优先级：环境变量 > TOML 文件 > 默认值
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待解析文档目录（`.txt` 文本 / `.json` 词框）
    pub input_folder: String,
    /// 结果输出目录
    pub output_folder: String,
    /// 水印过滤灵敏度，0 最激进，1 最宽松
    pub filter_sensitivity: f64,
    /// 同时处理的文档数量
    pub max_concurrent_documents: usize,
    /// 需要写出的结果格式
    pub output_formats: Vec<OutputFormat>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 运行日志文件
    pub output_log_file: String,
    /// 词框重建行时允许的 y 偏差
    pub line_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "input".to_string(),
            output_folder: "output".to_string(),
            filter_sensitivity: DEFAULT_SENSITIVITY,
            max_concurrent_documents: 8,
            output_formats: vec![OutputFormat::List, OutputFormat::Dict, OutputFormat::Json],
            verbose_logging: false,
            output_log_file: "extract_log.txt".to_string(),
            line_tolerance: 3.0,
        }
    }
}

impl Config {
    /// 加载配置：设置了 `EXTRACT_CONFIG` 时先读 TOML 文件，再叠加环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_toml_file(&path)?.with_env_overrides(),
            Err(_) => Self::from_env(),
        }
    }

    /// 默认值 + 环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content).map_err(|source| ExtractError::ConfigParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 缺省字段使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖已有配置，值无法解析时报错
    pub fn with_env_overrides(mut self) -> AppResult<Self> {
        if let Some(v) = env_string("INPUT_FOLDER") {
            self.input_folder = v;
        }
        if let Some(v) = env_string("OUTPUT_FOLDER") {
            self.output_folder = v;
        }
        if let Some(v) = env_parse("FILTER_SENSITIVITY", "0 到 1 之间的小数")? {
            self.filter_sensitivity = v;
        }
        if let Some(v) = env_parse("MAX_CONCURRENT_DOCUMENTS", "正整数")? {
            self.max_concurrent_documents = v;
        }
        if let Some(v) = env_string("OUTPUT_FORMATS") {
            self.output_formats = parse_formats(&v)?;
        }
        if let Some(v) = env_parse("VERBOSE_LOGGING", "布尔值")? {
            self.verbose_logging = v;
        }
        if let Some(v) = env_string("OUTPUT_LOG_FILE") {
            self.output_log_file = v;
        }
        if let Some(v) = env_parse("LINE_TOLERANCE", "小数")? {
            self.line_tolerance = v;
        }
        Ok(self)
    }

    /// 限制在 [0, 1] 内的过滤灵敏度
    pub fn sensitivity(&self) -> f64 {
        if self.filter_sensitivity.is_nan() {
            return DEFAULT_SENSITIVITY;
        }
        self.filter_sensitivity.clamp(0.0, 1.0)
    }

    /// 至少为 1 的并发数
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_documents.max(1)
    }
}

/// 解析逗号分隔的格式列表，如 `list,json`
pub fn parse_formats(value: &str) -> AppResult<Vec<OutputFormat>> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(OutputFormat::from_str)
        .collect()
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match env_string(var_name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ExtractError::config_value(var_name, value.clone(), expected_type)),
        None => Ok(None),
    }
}
