//! 判断题
//!
//! 选项固定为 `["True", "False"]`。
//! 第一条能解析到源选项的正分规则决定答案：按源选项的文字（去掉标签后忽略大小写，
//! 支持 true/false 与 verdadero/falso）映射到固定选项；
//! 文字无法识别时才按位置映射（第一个源选项对应 "True"，第二个对应 "False"）。

use anyhow::Result;

use super::common::{option_group, position_of, question_text, read_labels, LabeledText, CHOICE_LABEL_PATHS};
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::models::{Payload, QuestionType};
use crate::services::TextNormalizer;
use crate::utils::logging::strip_html_tags;

/// 判断题的固定选项
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

const TRUE_WORDS: [&str; 2] = ["true", "verdadero"];
const FALSE_WORDS: [&str; 2] = ["false", "falso"];

pub struct TrueFalseExtractor;

impl QuestionExtractor for TrueFalseExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::TrueFalse
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let Some(group) = option_group(nodes.flow) else {
            return Ok(None);
        };

        let question = question_text(nodes.flow, normalizer);
        let source_options = read_labels(group, CHOICE_LABEL_PATHS, normalizer)?;

        let correct_answers = nodes
            .rules()
            .iter()
            .filter(|rule| rule.is_positive())
            .filter_map(|rule| rule.first_test()?.ident())
            .find_map(|ident| answer_for(&source_options, ident))
            .map(|answer| vec![answer.to_string()])
            .unwrap_or_default();

        Ok(Some(Extracted {
            question,
            payload: Payload::Choice {
                options: TRUE_FALSE_OPTIONS.iter().map(|o| o.to_string()).collect(),
                correct_answers,
            },
        }))
    }
}

/// 源选项标识 → 固定选项
fn answer_for(source_options: &[LabeledText], ident: &str) -> Option<&'static str> {
    let position = position_of(source_options, ident)?;
    let label = strip_html_tags(&source_options[position].text).to_lowercase();

    if TRUE_WORDS.contains(&label.as_str()) {
        Some(TRUE_FALSE_OPTIONS[0])
    } else if FALSE_WORDS.contains(&label.as_str()) {
        Some(TRUE_FALSE_OPTIONS[1])
    } else {
        TRUE_FALSE_OPTIONS.get(position).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{choice_flow, item, rule, run};
    use super::*;

    const SOURCE: [(&str, &str); 2] = [("T1", "Verdadero"), ("F1", "Falso")];

    #[test]
    fn test_false_is_correct() {
        let rules = [rule("T1", "0"), rule("F1", "100")].concat();
        let xml = item(&choice_flow("La tierra es plana", &SOURCE), &rules);

        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.options(), ["True", "False"]);
        assert_eq!(extracted.payload.correct_answers(), ["False"]);
    }

    #[test]
    fn test_at_most_one_answer() {
        let rules = [rule("T1", "100"), rule("F1", "100")].concat();
        let xml = item(&choice_flow("q", &SOURCE), &rules);

        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["True"]);
    }

    #[test]
    fn test_answer_follows_label_text_not_position() {
        let reversed = [("A", "False"), ("B", "True")];
        let xml = item(&choice_flow("q", &reversed), &rule("A", "100"));
        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["False"]);

        let spanish = [("A", "&lt;p&gt; VERDADERO &lt;/p&gt;"), ("B", "Falso")];
        let xml = item(&choice_flow("q", &spanish), &rule("B", "100"));
        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["False"]);
    }

    #[test]
    fn test_unknown_label_falls_back_to_position() {
        let source = [("A", "Sí"), ("B", "No")];
        let xml = item(&choice_flow("q", &source), &rule("B", "100"));
        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert_eq!(extracted.payload.correct_answers(), ["False"]);
    }

    #[test]
    fn test_unresolved_rule_gives_empty_answers() {
        let xml = item(&choice_flow("q", &SOURCE), &rule("X9", "100"));
        let extracted = run(&TrueFalseExtractor, &xml).unwrap().unwrap();
        assert!(extracted.payload.correct_answers().is_empty());
        assert_eq!(extracted.payload.options().len(), 2);
    }
}
