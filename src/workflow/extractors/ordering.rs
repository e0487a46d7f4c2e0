//! 排序题
//!
//! `D2L_Correct` 规则的 `varequal` 中，`respident` 是项目标识，比较值是它的正确位置。
//! 一个位置都解析不出来时按文档顺序输出全部项目（结果可用但顺序不可信）。

use anyhow::Result;
use std::collections::BTreeMap;
use tracing::debug;

use super::common::{question_text, read_labels, resolve, CHOICE_LABEL_PATHS};
use super::{Extracted, ItemNodes, QuestionExtractor};
use crate::infrastructure::xml_query::child;
use crate::models::{Payload, QuestionType};
use crate::services::TextNormalizer;

/// 排序项目可能的位置（相对 `response_grp`）
const ORDERING_LABEL_PATHS: &[&[&str]] = &[
    &["render_extension", "ims_render_object", "flow_label", "response_label"],
    &["render_extension", "ims_render_object", "response_label"],
];

pub struct OrderingExtractor;

impl QuestionExtractor for OrderingExtractor {
    fn question_type(&self) -> QuestionType {
        QuestionType::Ordering
    }

    fn extract(&self, nodes: &ItemNodes<'_, '_>, normalizer: &TextNormalizer) -> Result<Option<Extracted>> {
        let Some(group) = child(nodes.flow, "response_grp") else {
            return Ok(None);
        };

        let mut items = read_labels(group, ORDERING_LABEL_PATHS, normalizer)?;
        if items.is_empty() {
            items = read_labels(group, CHOICE_LABEL_PATHS, normalizer)?;
        }

        let mut by_position: BTreeMap<i64, String> = BTreeMap::new();
        for rule in nodes.rules().iter().filter(|rule| rule.sets_correct_var()) {
            let Some(test) = rule.first_test() else {
                continue;
            };
            let Some(position) = test.ident().and_then(|v| v.parse::<i64>().ok()) else {
                continue;
            };
            if let Some(item) = test.respident.and_then(|ident| resolve(&items, ident)) {
                by_position.insert(position, item.text.clone());
            }
        }

        let ordered_items: Vec<String> = if by_position.is_empty() {
            debug!("排序题没有可用的位置规则，按文档顺序输出 {} 个项目", items.len());
            items.into_iter().map(|item| item.text).collect()
        } else {
            by_position.into_values().collect()
        };

        Ok(Some(Extracted {
            question: question_text(nodes.flow, normalizer),
            payload: Payload::Ordering { ordered_items },
        }))
    }
}
