//! 单选题
//!
//! 每条正分规则的第一个 `varequal` 指向一个正确选项，
//! 正确答案按规则顺序（而不是选项顺序）排列。

use anyhow::Result;

use super::common::{option_group, question_text, read_labels, resolve, CHOICE_LABEL_PATHS};
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::models::{Payload, QuestionType};
use crate::services::TextNormalizer;

pub struct MultipleChoiceExtractor;

impl QuestionExtractor for MultipleChoiceExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::MultipleChoice
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let Some(group) = option_group(nodes.flow) else {
            return Ok(None);
        };

        let question = question_text(nodes.flow, normalizer);
        let options = read_labels(group, CHOICE_LABEL_PATHS, normalizer)?;

        let correct_answers = nodes
            .rules()
            .iter()
            .filter(|rule| rule.is_positive())
            .filter_map(|rule| rule.first_test()?.ident())
            .filter_map(|ident| resolve(&options, ident))
            .map(|option| option.text.clone())
            .collect();

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
    use super::super::test_support::{choice_flow, item, rule, run};
    use super::*;

    const OPTIONS: [(&str, &str); 4] = [("1", "Norte"), ("2", "Sur"), ("3", "Este"), ("4", "Oeste")];

    #[test]
    fn test_single_correct_answer() {
        let rules = [rule("1", "0"), rule("2", "0"), rule("3", "100"), rule("4", "0")].concat();
        let xml = item(&choice_flow("¿Dónde sale el sol?", &OPTIONS), &rules);

        let extracted = run(&MultipleChoiceExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.question, "¿Dónde sale el sol?");
        assert_eq!(extracted.payload.options(), ["Norte", "Sur", "Este", "Oeste"]);
        assert_eq!(extracted.payload.correct_answers(), ["Este"]);
    }

    #[test]
    fn test_correct_answers_follow_rule_order() {
        let rules = [rule("4", "50"), rule("1", "100"), rule("9", "100")].concat();
        let xml = item(&choice_flow("q", &OPTIONS), &rules);

        let extracted = run(&MultipleChoiceExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["Oeste", "Norte"]);
    }

    #[test]
    fn test_missing_option_group_is_absent() {
        let xml = item(
            "<presentation><flow><material><mattext>q</mattext></material></flow></presentation>",
            &rule("1", "100"),
        );
        assert_eq!(run(&MultipleChoiceExtractor, &xml).unwrap(), None);
    }

    #[test]
    fn test_option_without_ident_keeps_its_text() {
        let body = r#"<presentation><flow><material><mattext>q</mattext></material><response_lid><render_choice>
            <flow_label><response_label ident="A"><flow_mat><material><mattext>Uno</mattext></material></flow_mat></response_label></flow_label>
            <flow_label><response_label><flow_mat><material><mattext>Dos</mattext></material></flow_mat></response_label></flow_label>
          </render_choice></response_lid></flow></presentation>"#;
        let xml = item(body, &rule("A", "100"));

        let extracted = run(&MultipleChoiceExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.options(), ["Uno", "Dos"]);
        assert_eq!(extracted.payload.correct_answers(), ["Uno"]);
    }

    #[test]
    fn test_duplicate_option_ident_is_error() {
        let xml = item(&choice_flow("q", &[("A", "Uno"), ("A", "Dos")]), &rule("A", "100"));
        assert!(run(&MultipleChoiceExtractor, &xml).is_err());
    }
}
