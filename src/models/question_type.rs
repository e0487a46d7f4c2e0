use serde::{Deserialize, Serialize};
use std::fmt;

/// 题型枚举，序列化值即导出文件中的题型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestionType {
    /// 单选题
    #[serde(rename = "Multiple Choice")]
    MultipleChoice,
    /// 多选题
    #[serde(rename = "Multi-Select")]
    MultiSelect,
    /// 判断题
    #[serde(rename = "True/False")]
    TrueFalse,
    /// 填空题
    #[serde(rename = "Fill in the Blanks")]
    FillInTheBlanks,
    /// 连线题
    #[serde(rename = "Matching")]
    Matching,
    /// 排序题
    #[serde(rename = "Ordering")]
    Ordering,
    /// 简答题
    #[serde(rename = "Short Answer")]
    ShortAnswer,
}

impl QuestionType {
    pub const ALL: [QuestionType; 7] = [
        QuestionType::MultipleChoice,
        QuestionType::MultiSelect,
        QuestionType::TrueFalse,
        QuestionType::FillInTheBlanks,
        QuestionType::Matching,
        QuestionType::Ordering,
        QuestionType::ShortAnswer,
    ];

    /// 导出文件中的题型标签
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::MultiSelect => "Multi-Select",
            QuestionType::TrueFalse => "True/False",
            QuestionType::FillInTheBlanks => "Fill in the Blanks",
            QuestionType::Matching => "Matching",
            QuestionType::Ordering => "Ordering",
            QuestionType::ShortAnswer => "Short Answer",
        }
    }

    /// 从题型标签解析，标签必须完全一致
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trips_through_serde() {
        for t in QuestionType::ALL {
            assert_eq!(QuestionType::from_tag(t.tag()), Some(t));
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{}\"", t.tag()));
        }
    }

    #[test]
    fn test_unknown_tags() {
        assert_eq!(QuestionType::from_tag("Essay"), None);
        assert_eq!(QuestionType::from_tag("multiple choice"), None);
    }
}
