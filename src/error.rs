use thiserror::Error;

use crate::models::question_type::QuestionType;

/// 应用程序错误类型
///
/// 只用于整个转换无法继续的情况；单道题目的问题见 [`SkipReason`]。
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// XML 文档本身无法解析
    #[error("XML解析失败: {0}")]
    Xml(#[from] roxmltree::Error),
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 单道题目被跳过的原因
///
/// 这些错误都不会中断整个文档的遍历。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// 没有题型元数据
    #[error("未找到题型")]
    MissingTypeTag,
    /// 没有 presentation/flow
    #[error("未找到 presentation/flow")]
    MissingPresentation,
    /// 题型不在支持范围内
    #[error("未知题型 '{tag}'")]
    UnrecognizedType { tag: String },
    /// 提取器认为题目结构不完整
    #[error("解析失败 ({question_type})")]
    ExtractorReturnedAbsent { question_type: QuestionType },
    /// 提取过程中出现的其他错误
    #[error("{message}")]
    ExtractorException { message: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return AppError::File(FileError::NotFound { path: path.into() });
        }
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
