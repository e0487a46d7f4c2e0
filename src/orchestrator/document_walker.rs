//! 文档遍历器 - 编排层
//!
//! ## 职责
//!
//! 负责一份题库导出文档的全部题目：
//!
//! 1. **遍历分区**：按文档顺序（先父分区、后子分区）找出所有 `section`
//! 2. **分配序号**：每遇到一个 `item` 分配下一个序号，失败的题目也占用序号
//! 3. **流程调度**：委托 `QuestionFlow` 处理单道题
//! 4. **统计汇总**：成功记录、跳过记录、题型计数
//!
//! 单道题的任何问题都不会中断遍历。

use anyhow::Result;
use roxmltree::{Document, Node};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::xml_query::{children_named, element_children, tag};
use crate::models::ConversionReport;
use crate::services::{AssetStore, PublicBucketStore, TextNormalizer};
use crate::utils::logging::log_section;
use crate::workflow::{ProcessResult, QuestionCtx, QuestionFlow};

/// 没有 `title` 的分区使用的名称
pub const DEFAULT_SECTION_TITLE: &str = "Sin sección";

/// 分区嵌套的最大层数
const MAX_SECTION_DEPTH: usize = 8;

/// 文档遍历器
pub struct DocumentWalker {
    question_flow: QuestionFlow,
}

impl DocumentWalker {
    /// 按配置创建（图片地址来自配置中的存储桶）
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_asset_store(PublicBucketStore::from_config(config), config.verbose_logging)
    }

    /// 使用指定的资源存储创建
    pub fn with_asset_store(
        asset_store: impl AssetStore + Send + Sync + 'static,
        verbose_logging: bool,
    ) -> Result<Self> {
        let normalizer = TextNormalizer::new(asset_store)?;
        Ok(Self {
            question_flow: QuestionFlow::new(normalizer, verbose_logging),
        })
    }

    /// 解析 XML 文本并遍历
    ///
    /// 只有文档本身无法解析时返回错误。
    pub fn parse_document(&self, xml: &str) -> AppResult<ConversionReport> {
        let doc = Document::parse(xml)?;
        Ok(self.walk(&doc))
    }

    /// 遍历已解析的文档
    pub fn walk(&self, doc: &Document<'_>) -> ConversionReport {
        let mut report = ConversionReport::default();
        let mut next_id = 0usize;

        for section in sections(doc.root_element()) {
            let title = section.attribute("title").unwrap_or(DEFAULT_SECTION_TITLE);
            let items: Vec<_> = children_named(section, "item").collect();
            log_section(title, items.len());

            for item in items {
                next_id += 1;
                let ctx = QuestionCtx::new(next_id, title);

                match self.question_flow.run(item, &ctx) {
                    ProcessResult::Parsed(record) => {
                        *report
                            .type_counts
                            .entry(record.question_type.tag().to_string())
                            .or_insert(0) += 1;
                        report.questions.push(record);
                    }
                    ProcessResult::Skipped(skipped) => report.skipped.push(skipped),
                }
            }
        }

        report
    }
}

/// 按先序收集所有分区
///
/// 只经过 `objectbank` / `assessment` / `section` 这几种容器。
fn sections<'a, 'input: 'a>(root: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let mut found = Vec::new();
    if tag(root) == "section" {
        found.push(root);
    }
    collect_sections(root, 0, &mut found);
    found
}

fn collect_sections<'a, 'input: 'a>(node: Node<'a, 'input>, depth: usize, found: &mut Vec<Node<'a, 'input>>) {
    if depth >= MAX_SECTION_DEPTH {
        return;
    }

    for child in element_children(node) {
        match tag(child) {
            "section" => {
                found.push(child);
                collect_sections(child, depth + 1, found);
            }
            "objectbank" | "assessment" => collect_sections(child, depth + 1, found),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, SkipReason};

    fn walker() -> DocumentWalker {
        DocumentWalker::with_asset_store(PublicBucketStore::new("https://cdn.example.com"), false).unwrap()
    }

    fn short_answer(answer: &str) -> String {
        format!(
            r#"<item><itemmetadata><qtimetadata><qti_metadatafield><fieldlabel>qmd_questiontype</fieldlabel><fieldentry>Short Answer</fieldentry></qti_metadatafield></qtimetadata></itemmetadata><presentation><flow><material><mattext>q</mattext></material></flow></presentation><resprocessing><respcondition><conditionvar><varequal respident="R">{answer}</varequal></conditionvar><setvar>1</setvar></respcondition></resprocessing></item>"#
        )
    }

    const BROKEN: &str = "<item><presentation><flow/></presentation></item>";

    #[test]
    fn test_ids_are_stable_around_malformed_question() {
        for k in 1..=5 {
            let items: String = (1..=5)
                .map(|i| if i == k { BROKEN.to_string() } else { short_answer(&i.to_string()) })
                .collect();
            let xml = format!(r#"<questestinterop><objectbank><section title="S">{items}</section></objectbank></questestinterop>"#);

            let report = walker().parse_document(&xml).unwrap();
            let expected: Vec<usize> = (1..=5).filter(|i| *i != k).collect();
            assert_eq!(report.record_ids(), expected);
            assert_eq!(report.skipped_ids(), vec![k]);
            assert_eq!(report.skipped[0].reason, SkipReason::MissingTypeTag);
            assert_eq!(report.total_seen(), 5);
        }
    }

    #[test]
    fn test_nested_sections_walk_parent_items_first() {
        let xml = format!(
            r#"<questestinterop><objectbank>
                 <section title="A">{a1}<section title="B">{b1}</section>{a2}</section>
                 <section>{c1}</section>
               </objectbank></questestinterop>"#,
            a1 = short_answer("a1"),
            b1 = short_answer("b1"),
            a2 = short_answer("a2"),
            c1 = short_answer("c1"),
        );

        let report = walker().parse_document(&xml).unwrap();
        let seen: Vec<(usize, &str, &str)> = report
            .questions
            .iter()
            .map(|q| (q.id, q.section.as_str(), q.payload.correct_answers()[0].as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                (1, "A", "a1"),
                (2, "A", "a2"),
                (3, "B", "b1"),
                (4, DEFAULT_SECTION_TITLE, "c1"),
            ]
        );
        assert_eq!(report.type_counts.get("Short Answer"), Some(&4));
    }

    #[test]
    fn test_invalid_xml_is_fatal() {
        let err = walker().parse_document("<questestinterop><section>").unwrap_err();
        assert!(matches!(err, AppError::Xml(_)));
    }

    #[test]
    fn test_document_without_sections_is_empty() {
        let report = walker().parse_document("<questestinterop/>").unwrap();
        assert_eq!(report.total_seen(), 0);
        assert!(report.type_counts.is_empty());
    }
}
