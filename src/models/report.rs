use std::collections::BTreeMap;
use std::fmt;

use crate::error::SkipReason;
use crate::models::question::QuestionRecord;

/// 题型未知时使用的标签
pub const UNKNOWN_TYPE: &str = "unknown";

/// 被跳过的题目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedQuestion {
    pub id: usize,
    /// 题型标签，读不到时为 `unknown`
    pub question_type: String,
    pub reason: SkipReason,
}

impl fmt::Display for SkippedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "题目 {} ({}): {}", self.id, self.question_type, self.reason)
    }
}

/// 一次文档转换的结果
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// 成功解析的题目（文档顺序）
    pub questions: Vec<QuestionRecord>,
    /// 被跳过的题目（文档顺序）
    pub skipped: Vec<SkippedQuestion>,
    /// 题型标签 → 成功数量
    pub type_counts: BTreeMap<String, usize>,
}

impl ConversionReport {
    /// 遇到的题目总数（成功 + 跳过）
    pub fn total_seen(&self) -> usize {
        self.questions.len() + self.skipped.len()
    }

    pub fn record_ids(&self) -> Vec<usize> {
        self.questions.iter().map(|q| q.id).collect()
    }

    pub fn skipped_ids(&self) -> Vec<usize> {
        self.skipped.iter().map(|s| s.id).collect()
    }

    /// 题干或选项中含图片的题目数
    pub fn image_question_count(&self) -> usize {
        self.questions.iter().filter(|q| q.has_image()).count()
    }
}
