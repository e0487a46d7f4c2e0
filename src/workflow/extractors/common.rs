//! 各题型共用的结构读取

use anyhow::{bail, Result};
use roxmltree::Node;
use tracing::warn;

use crate::infrastructure::xml_query::{select, select_all_any, select_any};
use crate::services::TextNormalizer;

/// 题干、前提等文本所在路径（相对 `presentation/flow` 或 `response_grp`）
const MATERIAL_TEXT_PATH: &[&str] = &["material", "mattext"];

/// 选项组（`response_lid`）可能的位置
const OPTION_GROUP_PATHS: &[&[&str]] = &[&["response_lid"], &["flow", "response_lid"]];

/// 选项/候选项（`response_label`）可能的位置
pub const CHOICE_LABEL_PATHS: &[&[&str]] = &[
    &["render_choice", "flow_label", "response_label"],
    &["render_choice", "response_label"],
    &["flow_label", "response_label"],
];

/// 选项文本可能的位置（相对 `response_label`）
const LABEL_TEXT_PATHS: &[&[&str]] = &[
    &["flow_mat", "material", "mattext"],
    &["material", "mattext"],
    &["flow_mat", "flow_mat", "material", "mattext"],
];

/// 一个带标识的选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledText {
    pub ident: String,
    pub text: String,
}

/// 读取题干
pub fn question_text(flow: Node<'_, '_>, normalizer: &TextNormalizer) -> String {
    material_text(flow, normalizer)
}

/// 读取一个节点下 `material/mattext` 的文本
pub fn material_text(node: Node<'_, '_>, normalizer: &TextNormalizer) -> String {
    normalizer.mattext(select(node, MATERIAL_TEXT_PATH))
}

/// 查找选项组
pub fn option_group<'a, 'input: 'a>(flow: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    select_any(flow, OPTION_GROUP_PATHS)
}

/// 按给定的候选路径读取全部带标识的选项（文档顺序）
///
/// 缺少 `ident` 的选项仍保留文字，只是无法被评分规则引用（标识为空串）。
/// 同一组内标识重复时无法确定规则指向哪个选项，视为错误。
pub fn read_labels(
    container: Node<'_, '_>,
    paths: &[&[&str]],
    normalizer: &TextNormalizer,
) -> Result<Vec<LabeledText>> {
    let mut labels = Vec::new();
    for label in select_all_any(container, paths) {
        let text = normalizer.mattext(select_any(label, LABEL_TEXT_PATHS));
        let ident = match label.attribute("ident").map(str::trim) {
            Some(ident) if !ident.is_empty() => {
                if resolve(&labels, ident).is_some() {
                    bail!("response_label 的 ident 重复: {}", ident);
                }
                ident.to_string()
            }
            _ => {
                warn!("⚠️ 选项缺少 ident，无法被评分规则引用: {}", text);
                String::new()
            }
        };
        labels.push(LabeledText { ident, text });
    }
    Ok(labels)
}

/// 按标识查找选项文本
pub fn resolve<'l>(labels: &'l [LabeledText], ident: &str) -> Option<&'l LabeledText> {
    labels.iter().find(|l| l.ident == ident)
}

/// 按标识查找选项的位置
pub fn position_of(labels: &[LabeledText], ident: &str) -> Option<usize> {
    labels.iter().position(|l| l.ident == ident)
}
