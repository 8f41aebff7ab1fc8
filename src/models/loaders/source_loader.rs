use crate::error::{AppResult, ExtractError};
use crate::models::source::{SourceDocument, SourceKind, WordBox};
use crate::services::text_assembler;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 根据扩展名判断文档类型
pub fn source_kind(path: &Path) -> Option<SourceKind> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("txt") => Some(SourceKind::PlainText),
        Some("json") => Some(SourceKind::WordBoxes),
        _ => None,
    }
}

/// 加载单个文档
///
/// `.txt` 按分页符切成多页；`.json` 是词框数组，按 `line_tolerance` 重建行。
pub async fn load_source(path: &Path, line_tolerance: f64) -> AppResult<SourceDocument> {
    let display = path.display().to_string();
    let kind = source_kind(path).ok_or_else(|| ExtractError::UnsupportedSource {
        path: display.clone(),
    })?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ExtractError::read_failed(display.clone(), e))?;

    let pages = match kind {
        SourceKind::PlainText => text_assembler::split_pages(&content),
        SourceKind::WordBoxes => {
            let words: Vec<WordBox> = serde_json::from_str(&content).map_err(|source| {
                ExtractError::WordBoxDecodeFailed {
                    path: display.clone(),
                    source,
                }
            })?;
            text_assembler::words_to_pages(&words, line_tolerance)
        }
    };

    let name = path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    Ok(SourceDocument::new(name, kind, pages))
}

/// 加载目录中所有支持的文档（按文件名排序）
///
/// 单个文件加载失败只记录警告，不影响其他文件。
pub async fn load_all_sources(
    folder_path: &str,
    line_tolerance: f64,
) -> AppResult<Vec<SourceDocument>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(ExtractError::FolderNotFound {
            path: folder_path.to_string(),
        });
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| ExtractError::read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ExtractError::read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.is_file() && source_kind(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_source(&path, line_tolerance).await {
            Ok(document) => {
                tracing::info!("成功加载 {} 页", document.page_count());
                documents.push(document);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(documents)
}
