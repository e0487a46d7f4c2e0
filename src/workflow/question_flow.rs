//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 读取题型元数据
//! 2. 定位 presentation/flow
//! 3. 按题型分派给提取器
//! 4. 组装记录，或记录跳过原因

use roxmltree::Node;
use tracing::{debug, warn};

use crate::error::SkipReason;
use crate::infrastructure::xml_query::select;
use crate::models::report::UNKNOWN_TYPE;
use crate::models::{QuestionRecord, QuestionType, SkippedQuestion};
use crate::services::{metadata_reader, TextNormalizer};
use crate::utils::logging::{strip_html_tags, truncate_text};
use crate::workflow::extractors::{extractor_for, ItemNodes};
use crate::workflow::question_ctx::QuestionCtx;

/// presentation/flow 所在路径（相对 `item`）
const FLOW_PATH: &[&str] = &["presentation", "flow"];

/// 题目处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// 解析成功
    Parsed(QuestionRecord),
    /// 跳过（附原因）
    Skipped(SkippedQuestion),
}

/// 题目处理流程
///
/// - 只处理单个 `item`
/// - 任何一步失败都转成跳过记录，不向上抛错
pub struct QuestionFlow {
    normalizer: TextNormalizer,
    verbose_logging: bool,
}

impl QuestionFlow {
    /// 创建新的题目处理流程
    pub fn new(normalizer: TextNormalizer, verbose_logging: bool) -> Self {
        Self {
            normalizer,
            verbose_logging,
        }
    }

    pub fn run(&self, item: Node<'_, '_>, ctx: &QuestionCtx) -> ProcessResult {
        let Some(tag) = metadata_reader::question_type(item) else {
            return self.skip(ctx, UNKNOWN_TYPE, SkipReason::MissingTypeTag);
        };

        let Some(flow) = select(item, FLOW_PATH) else {
            return self.skip(ctx, tag, SkipReason::MissingPresentation);
        };

        let Some(question_type) = QuestionType::from_tag(tag) else {
            return self.skip(
                ctx,
                tag,
                SkipReason::UnrecognizedType {
                    tag: tag.to_string(),
                },
            );
        };

        let extractor = extractor_for(question_type);
        match extractor.extract(&ItemNodes::new(item, flow), &self.normalizer) {
            Ok(Some(extracted)) => {
                if self.verbose_logging {
                    debug!(
                        "{} ✓ {}: {}",
                        ctx,
                        question_type,
                        truncate_text(&strip_html_tags(&extracted.question), 80)
                    );
                }
                ProcessResult::Parsed(QuestionRecord {
                    id: ctx.id,
                    section: ctx.section.clone(),
                    question_type,
                    question: extracted.question,
                    payload: extracted.payload,
                })
            }
            Ok(None) => self.skip(ctx, tag, SkipReason::ExtractorReturnedAbsent { question_type }),
            Err(e) => self.skip(
                ctx,
                tag,
                SkipReason::ExtractorException {
                    message: format!("{:#}", e),
                },
            ),
        }
    }

    fn skip(&self, ctx: &QuestionCtx, question_type: &str, reason: SkipReason) -> ProcessResult {
        warn!("{} ⚠️ 跳过 ({}): {}", ctx, question_type, reason);
        ProcessResult::Skipped(SkippedQuestion {
            id: ctx.id,
            question_type: question_type.to_string(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PublicBucketStore;
    use roxmltree::Document;

    fn flow() -> QuestionFlow {
        let normalizer = TextNormalizer::new(PublicBucketStore::new("https://cdn.example.com")).unwrap();
        QuestionFlow::new(normalizer, true)
    }

    fn metadata(question_type: &str) -> String {
        format!(
            "<itemmetadata><qtimetadata><qti_metadatafield><fieldlabel>qmd_questiontype</fieldlabel><fieldentry>{question_type}</fieldentry></qti_metadatafield></qtimetadata></itemmetadata>"
        )
    }

    fn run(xml: &str) -> ProcessResult {
        let doc = Document::parse(xml).unwrap();
        flow().run(doc.root_element(), &QuestionCtx::new(4, "Tema 2"))
    }

    fn reason(result: ProcessResult) -> (usize, String, SkipReason) {
        match result {
            ProcessResult::Skipped(s) => (s.id, s.question_type, s.reason),
            ProcessResult::Parsed(r) => panic!("expected skip, got {r:?}"),
        }
    }

    #[test]
    fn test_missing_type_tag() {
        let (id, t, r) = reason(run("<item><presentation><flow/></presentation></item>"));
        assert_eq!((id, t.as_str(), r), (4, "unknown", SkipReason::MissingTypeTag));
    }

    #[test]
    fn test_missing_presentation() {
        let xml = format!("<item>{}</item>", metadata("Multiple Choice"));
        let (_, t, r) = reason(run(&xml));
        assert_eq!((t.as_str(), r), ("Multiple Choice", SkipReason::MissingPresentation));
    }

    #[test]
    fn test_unrecognized_type() {
        let xml = format!("<item>{}<presentation><flow/></presentation></item>", metadata("Essay"));
        let (_, _, r) = reason(run(&xml));
        assert_eq!(r, SkipReason::UnrecognizedType { tag: "Essay".to_string() });
    }

    #[test]
    fn test_absent_and_exception_results() {
        let xml = format!("<item>{}<presentation><flow/></presentation></item>", metadata("Ordering"));
        let (_, _, r) = reason(run(&xml));
        assert_eq!(
            r,
            SkipReason::ExtractorReturnedAbsent {
                question_type: QuestionType::Ordering
            }
        );

        let xml = format!(
            r#"<item>{}<presentation><flow><response_lid><render_choice><flow_label><response_label ident="A"/></flow_label><flow_label><response_label ident="A"/></flow_label></render_choice></response_lid></flow></presentation></item>"#,
            metadata("Multiple Choice")
        );
        let (_, _, r) = reason(run(&xml));
        assert!(matches!(r, SkipReason::ExtractorException { .. }));
    }

    #[test]
    fn test_parsed_record_carries_context() {
        let xml = format!(
            "<item>{}<presentation><flow><material><mattext>¿Capital?</mattext></material></flow></presentation></item>",
            metadata("Short Answer")
        );
        match run(&xml) {
            ProcessResult::Parsed(record) => {
                assert_eq!(record.id, 4);
                assert_eq!(record.section, "Tema 2");
                assert_eq!(record.question_type, QuestionType::ShortAnswer);
                assert_eq!(record.question, "¿Capital?");
            }
            other => panic!("expected record, got {other:?}"),
        }
    }
}
