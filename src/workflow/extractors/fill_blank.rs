//! 填空题
//!
//! `flow` 的子节点按文档顺序交替出现文字（`material`）和空（`response_str`），
//! 题干由它们拼接而成，每个空写成 `___`。答案列表与空的出现顺序一一对应，
//! 找不到答案的空填空串，不会省略。
//!
//! 一个空的答案来自第一条"第一个相等判断引用了这个空"的正分规则，答案文字保留原文。

use anyhow::Result;
use roxmltree::Node;

use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::infrastructure::xml_query::{child, element_children, select_any, tag};
use crate::models::{Payload, QuestionType};
use crate::services::scoring::ScoringRule;
use crate::services::TextNormalizer;

/// 题干中代表一个空的标记
pub const BLANK_MARKER: &str = "___";

/// 空内部答案标识可能的位置
const BLANK_LABEL_PATHS: &[&[&str]] = &[&["render_fib", "response_label"], &["response_label"]];

pub struct FillBlankExtractor;

impl QuestionExtractor for FillBlankExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::FillInTheBlanks
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let mut question = String::new();
        let mut blanks: Vec<&str> = Vec::new();

        for part in element_children(nodes.flow) {
            match tag(part) {
                "material" => question.push_str(&material_text_of(part, normalizer)),
                "response_str" => {
                    blanks.push(blank_ident(part));
                    question.push_str(BLANK_MARKER);
                }
                // response_extension 等扩展信息不参与题干
                _ => {}
            }
        }

        let rules = nodes.rules();
        let correct_answers = blanks
            .iter()
            .map(|blank| answer_for(&rules, blank).unwrap_or_default().to_string())
            .collect();

        Ok(Some(Extracted {
            question,
            payload: Payload::Answers { correct_answers },
        }))
    }
}

/// `material` 节点自身的 `mattext`
fn material_text_of(material: Node<'_, '_>, normalizer: &TextNormalizer) -> String {
    normalizer.mattext(child(material, "mattext"))
}

/// 空的答案标识：优先取内部 `response_label@ident`，否则取自身 `ident`
fn blank_ident<'a>(response_str: Node<'a, '_>) -> &'a str {
    match select_any(response_str, BLANK_LABEL_PATHS) {
        Some(label) => label.attribute("ident").unwrap_or(""),
        None => response_str.attribute("ident").unwrap_or(""),
    }
}

/// 第一条引用该空的正分规则中的比较值
fn answer_for<'a>(rules: &[ScoringRule<'a>], blank: &str) -> Option<&'a str> {
    rules
        .iter()
        .filter(|rule| rule.is_positive())
        .filter_map(|rule| rule.first_test())
        .find(|test| test.respident == Some(blank))
        .map(|test| test.value.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{item, run};
    use super::*;

    fn text(t: &str) -> String {
        format!(r#"<material><mattext texttype="text/html">{t}</mattext></material>"#)
    }

    fn blank(ident: &str, label: Option<&str>) -> String {
        match label {
            Some(l) => format!(
                r#"<response_str ident="{ident}" rcardinality="Single"><render_fib fibtype="String" rows="1"><response_label ident="{l}"/></render_fib></response_str>"#
            ),
            None => format!(r#"<response_str ident="{ident}" rcardinality="Single"/>"#),
        }
    }

    fn answer(respident: &str, value: &str, score: &str) -> String {
        format!(
            r#"<respcondition><conditionvar><varequal respident="{respident}" case="no">{value}</varequal></conditionvar><setvar action="Add">{score}</setvar></respcondition>"#
        )
    }

    #[test]
    fn test_blanks_interleave_with_text_and_align_answers() {
        let flow = [
            text("La capital de "),
            blank("RESP_1", Some("RESP_1_A1")),
            text(" es "),
            blank("RESP_2", None),
            r#"<response_extension><grading>x</grading></response_extension>"#.to_string(),
            text("."),
        ]
        .concat();
        let rules = [
            answer("RESP_2", "París", "50"),
            answer("RESP_1_A1", "Galia", "0"),
            answer("RESP_1_A1", "Francia", "50"),
            answer("RESP_1_A1", "France", "50"),
        ]
        .concat();
        let xml = item(
            &format!("<presentation><flow>{flow}</flow></presentation>"),
            &rules,
        );

        let extracted = run(&FillBlankExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.question, "La capital de ___ es ___.");
        assert_eq!(extracted.payload.correct_answers(), ["Francia", "París"]);
    }

    #[test]
    fn test_only_first_test_of_a_rule_names_the_blank() {
        let flow = [blank("B1", None), text(" y "), blank("B2", None)].concat();
        let rules = r#"<respcondition><conditionvar><varequal respident="B1">uno</varequal><varequal respident="B2">dos</varequal></conditionvar><setvar action="Add">100</setvar></respcondition>"#;
        let xml = item(&format!("<presentation><flow>{flow}</flow></presentation>"), rules);

        let extracted = run(&FillBlankExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["uno", ""]);
    }

    #[test]
    fn test_answer_whitespace_is_kept() {
        let xml = item(
            &format!("<presentation><flow>{}</flow></presentation>", blank("B1", None)),
            &answer("B1", " GROUP BY ", "100"),
        );

        let extracted = run(&FillBlankExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), [" GROUP BY "]);
    }

    #[test]
    fn test_unanswered_blank_keeps_its_slot() {
        let flow = [blank("B1", None), text(" y "), blank("B2", None)].concat();
        let xml = item(
            &format!("<presentation><flow>{flow}</flow></presentation>"),
            &answer("B2", "dos", "100"),
        );

        let extracted = run(&FillBlankExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.question, "___ y ___");
        assert_eq!(extracted.payload.correct_answers(), ["", "dos"]);
    }
}
