use crate::error::{AppError, AppResult};
use std::path::Path;
use tokio::fs;

/// 读取题库导出 XML 的文本内容
///
/// 去掉 UTF-8 BOM，其余内容原样返回，解析交给 [`crate::orchestrator::DocumentWalker`]。
pub async fn load_xml_text(xml_path: &Path) -> AppResult<String> {
    let content = fs::read_to_string(xml_path)
        .await
        .map_err(|e| AppError::file_read_failed(xml_path.display().to_string(), e))?;

    tracing::info!(
        "正在加载: {} ({} 字节)",
        xml_path.file_name().unwrap_or_default().to_string_lossy(),
        content.len()
    );

    Ok(content
        .strip_prefix('\u{FEFF}')
        .map(str::to_string)
        .unwrap_or(content))
}
