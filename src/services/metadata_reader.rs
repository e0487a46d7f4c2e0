//! 题目元数据读取
//!
//! 只负责从 `itemmetadata` 中找出题型字段。

use roxmltree::Node;

use crate::infrastructure::xml_query::{child, select_all, text};

/// 题型字段的标签名
pub const QUESTION_TYPE_LABEL: &str = "qmd_questiontype";

const METADATA_FIELD_PATH: &[&str] = &["itemmetadata", "qtimetadata", "qti_metadatafield"];

/// 读取题目声明的题型标签，原样返回；找不到时返回 `None`
pub fn question_type<'a>(item: Node<'a, '_>) -> Option<&'a str> {
    select_all(item, METADATA_FIELD_PATH)
        .into_iter()
        .find(|field| child(*field, "fieldlabel").and_then(text) == Some(QUESTION_TYPE_LABEL))
        .and_then(|field| child(field, "fieldentry"))
        .and_then(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_reads_question_type_field() {
        let xml = r#"
            <item>
              <itemmetadata><qtimetadata>
                <qti_metadatafield><fieldlabel>qmd_computerscored</fieldlabel><fieldentry>Yes</fieldentry></qti_metadatafield>
                <qti_metadatafield><fieldlabel>qmd_questiontype</fieldlabel><fieldentry>Multi-Select</fieldentry></qti_metadatafield>
              </qtimetadata></itemmetadata>
            </item>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(question_type(doc.root_element()), Some("Multi-Select"));
    }

    #[test]
    fn test_missing_type_is_none() {
        let doc = Document::parse(
            "<item><itemmetadata><qtimetadata><qti_metadatafield><fieldlabel>qmd_questiontype</fieldlabel></qti_metadatafield></qtimetadata></itemmetadata></item>",
        )
        .unwrap();
        assert_eq!(question_type(doc.root_element()), None);

        let doc = Document::parse("<item><presentation/></item>").unwrap();
        assert_eq!(question_type(doc.root_element()), None);
    }
}
