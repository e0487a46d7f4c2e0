use serde::{Deserialize, Serialize};

use crate::models::question_type::QuestionType;

/// 连线题的一组配对
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingPair {
    pub premise: String,
    pub response: String,
}

/// 各题型特有的内容
///
/// 序列化时直接展开到题目记录中，字段名是下游导入工具依赖的格式。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    /// 单选、多选、判断
    Choice {
        options: Vec<String>,
        correct_answers: Vec<String>,
    },
    /// 连线
    Matching { matching_pairs: Vec<MatchingPair> },
    /// 排序（正确顺序）
    Ordering { ordered_items: Vec<String> },
    /// 填空（与题干中的 `___` 顺序一致）、简答
    Answers { correct_answers: Vec<String> },
}

impl Payload {
    /// 选项列表（非选择题为空）
    pub fn options(&self) -> &[String] {
        match self {
            Payload::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// 正确答案列表（连线、排序为空）
    pub fn correct_answers(&self) -> &[String] {
        match self {
            Payload::Choice { correct_answers, .. } | Payload::Answers { correct_answers } => {
                correct_answers
            }
            _ => &[],
        }
    }
}

/// 一道题目的规范化记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// 按遇到顺序分配的序号，从 1 开始
    pub id: usize,
    pub section: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(flatten)]
    pub payload: Payload,
}

impl QuestionRecord {
    /// 题干或选项中是否包含图片
    pub fn has_image(&self) -> bool {
        self.question.contains("<img") || self.payload.options().iter().any(|o| o.contains("<img"))
    }
}
