//! 题型提取器
//!
//! 每种题型一个提取器，都实现 [`QuestionExtractor`]。
//! 共用的"找选项 / 找正分规则 / 按标识取文本"在 `common` 中，
//! 各题型只保留自己的"哪个算正确"的判断。

mod common;
mod fill_blank;
mod matching;
mod multi_select;
mod multiple_choice;
mod ordering;
mod short_answer;
mod true_false;

pub use fill_blank::{FillBlankExtractor, BLANK_MARKER};
pub use matching::MatchingExtractor;
pub use multi_select::MultiSelectExtractor;
pub use multiple_choice::MultipleChoiceExtractor;
pub use ordering::OrderingExtractor;
pub use short_answer::ShortAnswerExtractor;
pub use true_false::TrueFalseExtractor;

use anyhow::Result;
use roxmltree::Node;

use crate::models::{Payload, QuestionType};
use crate::services::scoring::{scoring_rules, ScoringRule};
use crate::services::TextNormalizer;

/// 提取器需要的题目节点
#[derive(Debug, Clone, Copy)]
pub struct ItemNodes<'a, 'input> {
    /// `item` 节点（评分规则在其下）
    pub item: Node<'a, 'input>,
    /// `item/presentation/flow` 节点
    pub flow: Node<'a, 'input>,
}

impl<'a, 'input: 'a> ItemNodes<'a, 'input> {
    pub fn new(item: Node<'a, 'input>, flow: Node<'a, 'input>) -> Self {
        Self { item, flow }
    }

    /// 题目的全部评分规则
    pub fn rules(&self) -> Vec<ScoringRule<'a>> {
        scoring_rules(self.item)
    }
}

/// 提取结果：题干 + 题型内容
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub question: String,
    pub payload: Payload,
}

/// 题型提取能力
pub trait QuestionExtractor {
    /// 负责的题型
    fn question_type(&self) -> QuestionType;

    /// 提取一道题
    ///
    /// # 返回
    /// - `Ok(Some(_))`: 成功
    /// - `Ok(None)`: 结构不完整，无法生成记录
    /// - `Err(_)`: 提取过程中出现的其他错误
    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>>;
}

/// 按题型取对应的提取器
pub fn extractor_for(question_type: QuestionType) -> &'static dyn QuestionExtractor {
    match question_type {
        QuestionType::MultipleChoice => &MultipleChoiceExtractor,
        QuestionType::MultiSelect => &MultiSelectExtractor,
        QuestionType::TrueFalse => &TrueFalseExtractor,
        QuestionType::FillInTheBlanks => &FillBlankExtractor,
        QuestionType::Matching => &MatchingExtractor,
        QuestionType::Ordering => &OrderingExtractor,
        QuestionType::ShortAnswer => &ShortAnswerExtractor,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::infrastructure::xml_query::select;
    use crate::services::PublicBucketStore;
    use roxmltree::Document;

    pub const BASE: &str = "https://cdn.example.com/img";

    pub fn normalizer() -> TextNormalizer {
        TextNormalizer::new(PublicBucketStore::new(BASE)).unwrap()
    }

    /// 解析 `<item>` 片段并运行提取器
    pub fn run(extractor: &dyn QuestionExtractor, item_xml: &str) -> Result<Option<Extracted>> {
        let doc = Document::parse(item_xml).unwrap();
        let item = doc.root_element();
        let flow = select(item, &["presentation", "flow"]).expect("fixture needs presentation/flow");
        extractor.extract(&ItemNodes::new(item, flow), &normalizer())
    }

    /// 单选/多选/判断题的选项部分
    pub fn choice_flow(question: &str, options: &[(&str, &str)]) -> String {
        let labels: String = options
            .iter()
            .map(|(ident, text)| {
                format!(
                    r#"<flow_label class="Block"><response_label ident="{ident}"><flow_mat><material><mattext texttype="text/html">{text}</mattext></material></flow_mat></response_label></flow_label>"#
                )
            })
            .collect();
        format!(
            r#"<presentation><flow><material><mattext texttype="text/html">{question}</mattext></material><response_lid ident="RESP" rcardinality="Single"><render_choice shuffle="yes">{labels}</render_choice></response_lid></flow></presentation>"#
        )
    }

    /// 以单个 `varequal` 为条件的评分规则
    pub fn rule(ident: &str, score: &str) -> String {
        format!(
            r#"<respcondition title="Scoring"><conditionvar><varequal respident="RESP">{ident}</varequal></conditionvar><setvar action="Set">{score}</setvar></respcondition>"#
        )
    }

    pub fn item(body: &str, rules: &str) -> String {
        format!("<item ident=\"Q\">{body}<resprocessing>{rules}</resprocessing></item>")
    }
}
