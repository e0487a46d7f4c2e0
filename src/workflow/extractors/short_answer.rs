//! 简答题：每条正分规则的比较值都是一个可接受的答案

use anyhow::Result;

use super::common::question_text;
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::models::{Payload, QuestionType};
use crate::services::TextNormalizer;

pub struct ShortAnswerExtractor;

impl QuestionExtractor for ShortAnswerExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::ShortAnswer
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let correct_answers = nodes
            .rules()
            .iter()
            .filter(|rule| rule.is_positive())
            .filter_map(|rule| rule.first_test()?.literal())
            .map(str::to_string)
            .collect();

        Ok(Some(Extracted {
            question: question_text(nodes.flow, normalizer),
            payload: Payload::Answers { correct_answers },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{item, run};
    use super::*;

    fn answer(value: &str, score: &str) -> String {
        format!(
            r#"<respcondition><conditionvar><varequal respident="RESP_1" case="no">{value}</varequal></conditionvar><setvar action="Set">{score}</setvar></respcondition>"#
        )
    }

    const BODY: &str = r#"<presentation><flow><material><mattext texttype="text/plain">¿Qué significa SQL?</mattext></material><response_str ident="RESP_1"><render_fib rows="1"/></response_str></flow></presentation>"#;

    #[test]
    fn test_collects_every_positive_literal_in_rule_order() {
        let rules = [
            answer("Structured Query Language", "100"),
            answer("Lenguaje de consulta", "0"),
            answer("structured query language", "100"),
            answer("", "100"),
        ]
        .concat();

        let extracted = run(&ShortAnswerExtractor, &item(BODY, &rules)).unwrap().unwrap();
        assert_eq!(extracted.question, "¿Qué significa SQL?");
        assert_eq!(
            extracted.payload.correct_answers(),
            ["Structured Query Language", "structured query language"]
        );
    }

    #[test]
    fn test_answer_text_is_kept_verbatim() {
        let extracted = run(&ShortAnswerExtractor, &item(BODY, &answer(" SELECT * ", "100")))
            .unwrap()
            .unwrap();
        assert_eq!(extracted.payload.correct_answers(), [" SELECT * "]);
    }

    #[test]
    fn test_no_rules_gives_empty_answers() {
        let extracted = run(&ShortAnswerExtractor, &item(BODY, "")).unwrap().unwrap();
        assert!(extracted.payload.correct_answers().is_empty());
    }
}
