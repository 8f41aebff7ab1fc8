//! 错误类型
//!
//! 解析核心（过滤、切分、分段）对任何输入都不会失败；
//! 这里的错误只来自外部协作方：读取文档、解析词框、写出结果、加载配置。

use thiserror::Error;

/// 提取流程中的错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 输入目录不存在
    #[error("目录不存在: {path}")]
    FolderNotFound { path: String },

    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 不支持的文档类型
    #[error("不支持的文件类型: {path}")]
    UnsupportedSource { path: String },

    /// 词框 JSON 解析失败
    #[error("词框 JSON 解析失败 ({path}): {source}")]
    WordBoxDecodeFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 配置解析失败
    #[error("TOML 配置解析失败 ({path}): {source}")]
    ConfigParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// 配置值无法解析
    #[error("配置项 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    ConfigValue {
        var_name: String,
        value: String,
        expected_type: String,
    },

    /// 结果序列化失败
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl ExtractError {
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        ExtractError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        ExtractError::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_value(
        var_name: impl Into<String>,
        value: impl Into<String>,
        expected_type: impl Into<String>,
    ) -> Self {
        ExtractError::ConfigValue {
            var_name: var_name.into(),
            value: value.into(),
            expected_type: expected_type.into(),
        }
    }
}

/// 库内统一的结果类型
pub type AppResult<T> = Result<T, ExtractError>;
