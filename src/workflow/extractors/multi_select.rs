//! 多选题
//!
//! 只看第一条正分规则：其 `conditionvar` 下直接的 `varequal` 是必须选中的选项，
//! `not` 中的 `varequal` 是不能选的选项，不计入答案。
//! 后面的正分规则（部分得分的变体）不处理。

use anyhow::Result;

use super::common::{option_group, question_text, read_labels, resolve, CHOICE_LABEL_PATHS};
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::models::{Payload, QuestionType};
use crate::services::TextNormalizer;

pub struct MultiSelectExtractor;

impl QuestionExtractor for MultiSelectExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::MultiSelect
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let Some(group) = option_group(nodes.flow) else {
            return Ok(None);
        };

        let question = question_text(nodes.flow, normalizer);
        let options = read_labels(group, CHOICE_LABEL_PATHS, normalizer)?;

        let rules = nodes.rules();
        let correct_answers = match rules.iter().find(|rule| rule.is_positive()) {
            Some(rule) => rule
                .required_tests()
                .filter_map(|test| test.ident())
                .filter_map(|ident| resolve(&options, ident))
                .map(|option| option.text.clone())
                .collect(),
            None => Vec::new(),
        };

        Ok(Some(Extracted {
            question,
            payload: Payload::Choice {
                options: options.into_iter().map(|o| o.text).collect(),
                correct_answers,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{choice_flow, item, run};
    use super::*;

    const OPTIONS: [(&str, &str); 4] = [("A", "Rojo"), ("B", "Verde"), ("C", "Azul"), ("D", "Negro")];

    fn select_rule(conditions: &str, score: &str) -> String {
        format!(
            r#"<respcondition><conditionvar>{conditions}</conditionvar><setvar action="Set">{score}</setvar></respcondition>"#
        )
    }

    fn eq(ident: &str) -> String {
        format!(r#"<varequal respident="RESP">{ident}</varequal>"#)
    }

    fn not_eq(ident: &str) -> String {
        format!("<not>{}</not>", eq(ident))
    }

    #[test]
    fn test_negated_options_are_excluded_regardless_of_position() {
        let layouts = [
            [eq("A"), eq("B"), not_eq("C")].concat(),
            [not_eq("C"), eq("A"), eq("B")].concat(),
            [eq("A"), not_eq("C"), eq("B")].concat(),
        ];

        for conditions in layouts {
            let xml = item(&choice_flow("Colores primarios", &OPTIONS), &select_rule(&conditions, "100"));
            let extracted = run(&MultiSelectExtractor, &xml).unwrap().unwrap();
            assert_eq!(extracted.payload.correct_answers(), ["Rojo", "Verde"]);
            assert_eq!(extracted.payload.options().len(), 4);
        }
    }

    #[test]
    fn test_only_first_positive_rule_is_used() {
        let rules = [
            select_rule(&eq("D"), "0"),
            select_rule(&[eq("A"), not_eq("B")].concat(), "100"),
            select_rule(&[eq("B"), eq("C")].concat(), "50"),
        ]
        .concat();
        let xml = item(&choice_flow("q", &OPTIONS), &rules);

        let extracted = run(&MultiSelectExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["Rojo"]);
    }

    #[test]
    fn test_no_positive_rule_gives_empty_answers() {
        let xml = item(&choice_flow("q", &OPTIONS), &select_rule(&eq("A"), "0"));
        let extracted = run(&MultiSelectExtractor, &xml).unwrap().unwrap();
        assert!(extracted.payload.correct_answers().is_empty());
    }
}
