//! JSON 写入服务 - 业务能力层
//!
//! 只负责"把题目列表写成 JSON 文件"，不关心列表从哪来

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::QuestionRecord;

/// JSON 写入服务
pub struct JsonWriter {
    output_path: PathBuf,
}

impl JsonWriter {
    /// 使用输出文件路径创建
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 写入题目列表（UTF-8，缩进 2 格）
    ///
    /// # 返回
    /// 返回写入的字节数
    pub async fn write(&self, questions: &[QuestionRecord]) -> AppResult<usize> {
        let json = serde_json::to_string_pretty(questions)?;

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::file_write_failed(parent.display().to_string(), e))?;
        }

        fs::write(&self.output_path, json.as_bytes())
            .await
            .map_err(|e| AppError::file_write_failed(self.output_path.display().to_string(), e))?;

        debug!(
            "写入 {} 道题到 {} ({} 字节)",
            questions.len(),
            self.output_path.display(),
            json.len()
        );

        Ok(json.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Payload, QuestionType};

    #[tokio::test]
    async fn test_writes_unescaped_utf8_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("questions.json");
        let writer = JsonWriter::with_path(&path);

        let records = vec![QuestionRecord {
            id: 1,
            section: "Sin sección".to_string(),
            question_type: QuestionType::ShortAnswer,
            question: "¿Qué es?".to_string(),
            payload: Payload::Answers {
                correct_answers: vec!["Árbol".to_string()],
            },
        }];

        writer.write(&records).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"section\": \"Sin sección\""));
        assert!(written.contains("Árbol"));
        let parsed: Vec<QuestionRecord> = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, records);
    }
}
