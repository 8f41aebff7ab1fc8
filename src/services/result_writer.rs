//! 结果写出服务
//!
//! 只负责把一份文档的题目映射按格式写到输出目录，不关心流程

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppResult, ExtractError};
use crate::models::QuestionMap;
use crate::services::result_assembler::{self, OutputFormat};

/// 结果写出服务
///
/// 输出文件名为 `<文档名>.<格式扩展名>`
pub struct ResultWriter {
    output_folder: PathBuf,
}

impl ResultWriter {
    pub fn new(output_folder: impl Into<PathBuf>) -> Self {
        Self {
            output_folder: output_folder.into(),
        }
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// 确保输出目录存在
    pub async fn prepare(&self) -> AppResult<()> {
        fs::create_dir_all(&self.output_folder)
            .await
            .map_err(|e| ExtractError::write_failed(self.output_folder.display().to_string(), e))
    }

    /// 按格式写出一份文档的结果
    ///
    /// # 参数
    /// - `document_name`: 文档名（不含扩展名）
    /// - `questions`: 整理后的题目映射
    /// - `formats`: 要写出的格式
    ///
    /// # 返回
    /// 写出的文件路径，顺序与 `formats` 一致
    pub async fn write(
        &self,
        document_name: &str,
        questions: &QuestionMap,
        formats: &[OutputFormat],
    ) -> AppResult<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(formats.len());

        for &format in formats {
            let path = self.output_path(document_name, format);
            let content = result_assembler::render(questions, format)?;

            debug!(
                "写入结果: {} ({} 道题, {} 字节)",
                path.display(),
                questions.len(),
                content.len()
            );

            fs::write(&path, content)
                .await
                .map_err(|e| ExtractError::write_failed(path.display().to_string(), e))?;
            written.push(path);
        }

        Ok(written)
    }

    pub fn output_path(&self, document_name: &str, format: OutputFormat) -> PathBuf {
        self.output_folder
            .join(format!("{}.{}", document_name, format.extension()))
    }
}
