//! 连线题
//!
//! 每个 `response_grp` 是一个前提，组内自带一套候选答案（标识只在组内有效）。
//! 正确答案来自"答对"信号的规则：规则引用本组的 `respident`，比较值是组内候选的标识。

use anyhow::Result;

use super::common::{material_text, question_text, read_labels, resolve, CHOICE_LABEL_PATHS};
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::infrastructure::xml_query::children_named;
use crate::models::{MatchingPair, Payload, QuestionType};
use crate::services::TextNormalizer;

pub struct MatchingExtractor;

impl QuestionExtractor for MatchingExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::Matching
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let groups: Vec<_> = children_named(nodes.flow, "response_grp").collect();
        if groups.is_empty() {
            return Ok(None);
        }

        let rules = nodes.rules();
        let mut matching_pairs = Vec::with_capacity(groups.len());

        for group in groups {
            let candidates = read_labels(group, CHOICE_LABEL_PATHS, normalizer)?;
            if candidates.is_empty() {
                // 没有候选答案的前提无法配对
                return Ok(None);
            }

            let group_ident = group.attribute("respident").unwrap_or("");
            let response = rules
                .iter()
                .filter(|rule| rule.is_affirmative())
                .filter_map(|rule| rule.first_test())
                .filter(|test| test.respident == Some(group_ident))
                .filter_map(|test| resolve(&candidates, test.ident()?))
                .map(|candidate| candidate.text.clone())
                .next()
                .unwrap_or_default();

            matching_pairs.push(MatchingPair {
                premise: material_text(group, normalizer),
                response,
            });
        }

        Ok(Some(Extracted {
            question: question_text(nodes.flow, normalizer),
            payload: Payload::Matching { matching_pairs },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{item, run};
    use super::*;

    fn group(respident: &str, premise: &str, candidates: &[(&str, &str)]) -> String {
        let labels: String = candidates
            .iter()
            .map(|(ident, text)| {
                format!(
                    r#"<flow_label class="Block"><response_label ident="{ident}"><flow_mat><material><mattext>{text}</mattext></material></flow_mat></response_label></flow_label>"#
                )
            })
            .collect();
        let choice = if candidates.is_empty() {
            String::new()
        } else {
            format!(r#"<render_choice shuffle="yes">{labels}</render_choice>"#)
        };
        format!(
            r#"<response_grp respident="{respident}" rcardinality="Single"><material><mattext>{premise}</mattext></material>{choice}</response_grp>"#
        )
    }

    fn signal(respident: &str, ident: &str, varname: &str) -> String {
        format!(
            r#"<respcondition><conditionvar><varequal respident="{respident}">{ident}</varequal></conditionvar><setvar varname="{varname}" action="Add">1</setvar></respcondition>"#
        )
    }

    fn flow(groups: &[String]) -> String {
        format!(
            "<presentation><flow><material><mattext>Relacione los conceptos</mattext></material>{}</flow></presentation>",
            groups.concat()
        )
    }

    const CANDIDATES: [(&str, &str); 2] = [("C1", "Lenguaje de consultas"), ("C2", "Base de datos documental")];

    #[test]
    fn test_pairs_follow_group_order() {
        let body = flow(&[
            group("G1", "SQL", &CANDIDATES),
            group("G2", "MongoDB", &CANDIDATES),
        ]);
        let rules = [
            signal("G2", "C1", "D2L_Incorrect"),
            signal("G2", "C2", "D2L_Correct"),
            signal("G1", "C2", "D2L_Incorrect"),
            signal("G1", "C1", "D2L_Correct"),
        ]
        .concat();

        let extracted = run(&MatchingExtractor, &item(&body, &rules)).unwrap().unwrap();
        assert_eq!(extracted.question, "Relacione los conceptos");
        let Payload::Matching { matching_pairs } = extracted.payload else {
            panic!("expected matching payload");
        };
        assert_eq!(
            matching_pairs,
            vec![
                MatchingPair { premise: "SQL".to_string(), response: "Lenguaje de consultas".to_string() },
                MatchingPair { premise: "MongoDB".to_string(), response: "Base de datos documental".to_string() },
            ]
        );
    }

    #[test]
    fn test_unresolved_group_has_empty_response() {
        let body = flow(&[group("G1", "SQL", &CANDIDATES)]);
        let rules = signal("G1", "C1", "D2L_Incorrect");

        let extracted = run(&MatchingExtractor, &item(&body, &rules)).unwrap().unwrap();
        let Payload::Matching { matching_pairs } = extracted.payload else {
            panic!("expected matching payload");
        };
        assert_eq!(matching_pairs.len(), 1);
        assert_eq!(matching_pairs[0].response, "");
    }

    #[test]
    fn test_missing_candidates_is_absent() {
        let body = flow(&[group("G1", "SQL", &CANDIDATES), group("G2", "Redis", &[])]);
        let rules = signal("G1", "C1", "D2L_Correct");
        assert_eq!(run(&MatchingExtractor, &item(&body, &rules)).unwrap(), None);

        let no_groups = flow(&[]);
        assert_eq!(run(&MatchingExtractor, &item(&no_groups, "")).unwrap(), None);
    }
}
