//! 文本规范化服务 - 业务能力层
//!
//! 负责把 `mattext` 中的转义文本还原成可直接展示的内容：
//! - 解码字符实体
//! - 把本地图片文件名替换为存储服务上的公开地址

use anyhow::Result;
use regex::{Captures, Regex};
use roxmltree::Node;

use crate::infrastructure::entities::decode_entities_fully;
use crate::services::asset_store::AssetStore;

/// 文本类型，对应 `mattext@texttype`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// 富文本（`text/html`），需要改写图片地址
    Html,
    /// 纯文本，只解码实体
    Plain,
}

impl TextKind {
    /// 按 `texttype` 属性判断，缺省视为 `text/html`
    pub fn from_texttype(texttype: Option<&str>) -> Self {
        match texttype {
            None => TextKind::Html,
            Some(t) if t.trim().eq_ignore_ascii_case("text/html") => TextKind::Html,
            Some(_) => TextKind::Plain,
        }
    }
}

/// 文本规范化服务
///
/// 对同一段文本重复调用结果不变：
/// 实体会一次解码到底，已经是绝对地址的图片不会再次加前缀。
pub struct TextNormalizer {
    asset_store: Box<dyn AssetStore + Send + Sync>,
    image_src: Regex,
}

impl TextNormalizer {
    pub fn new(asset_store: impl AssetStore + Send + Sync + 'static) -> Result<Self> {
        Ok(Self {
            asset_store: Box::new(asset_store),
            image_src: Regex::new(r#"(?i)src="([^"]+)""#)?,
        })
    }

    /// 规范化一段文本，`None` 返回空串
    pub fn normalize(&self, raw: Option<&str>, kind: TextKind) -> String {
        let Some(raw) = raw else {
            return String::new();
        };

        let decoded = decode_entities_fully(raw);
        match kind {
            TextKind::Html => self.rewrite_image_urls(&decoded),
            TextKind::Plain => decoded,
        }
    }

    /// 读取 `mattext` 节点并规范化，节点不存在时返回空串
    pub fn mattext(&self, node: Option<Node<'_, '_>>) -> String {
        match node {
            Some(n) => self.normalize(n.text(), TextKind::from_texttype(n.attribute("texttype"))),
            None => String::new(),
        }
    }

    /// 把 `src="本地图片"` 改写为公开地址
    pub fn rewrite_image_urls(&self, html: &str) -> String {
        self.image_src
            .replace_all(html, |caps: &Captures| {
                let src = &caps[1];
                if is_absolute(src) || !self.asset_store.is_image_file(src) {
                    return caps[0].to_string();
                }
                format!(r#"src="{}""#, self.asset_store.public_url(&reencode(src)))
            })
            .into_owned()
    }
}

/// 已经带协议或是内联数据的地址不再改写
fn is_absolute(src: &str) -> bool {
    src.contains("://") || src.starts_with("//") || src.starts_with("data:")
}

/// 先百分号解码再逐段重新编码，`My%20Diagram.png` 与 `My Diagram.png` 结果相同
fn reencode(src: &str) -> String {
    let decoded = urlencoding::decode(src)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| src.to_string());

    decoded
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::asset_store::PublicBucketStore;

    const BASE: &str = "https://cdn.example.com/bank/images";

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new(PublicBucketStore::new(BASE)).unwrap()
    }

    #[test]
    fn test_absent_text_is_empty() {
        assert_eq!(normalizer().normalize(None, TextKind::Html), "");
    }

    #[test]
    fn test_image_src_is_rewritten_with_encoding() {
        let n = normalizer();
        let expected = format!(r#"<img src="{}/My%20Diagram.png">"#, BASE);

        assert_eq!(n.normalize(Some(r#"<img src="My Diagram.png">"#), TextKind::Html), expected);
        assert_eq!(n.normalize(Some(r#"<img src="My%20Diagram.png">"#), TextKind::Html), expected);
        // 转义过的标签先解码再改写
        assert_eq!(
            n.normalize(Some("&lt;img src=\"My Diagram.png\"&gt;"), TextKind::Html),
            expected
        );
    }

    #[test]
    fn test_multiple_images_and_case_insensitive_extension() {
        let n = normalizer();
        let out = n.normalize(
            Some(r#"<img src="a.SVG"> text <img src="dir/b c.JpEg">"#),
            TextKind::Html,
        );
        assert_eq!(
            out,
            format!(r#"<img src="{0}/a.SVG"> text <img src="{0}/dir/b%20c.JpEg">"#, BASE)
        );
    }

    #[test]
    fn test_non_image_src_untouched() {
        let n = normalizer();
        let html = r#"<script src="app.js"></script><iframe src="page.html"></iframe>"#;
        assert_eq!(n.normalize(Some(html), TextKind::Html), html);
    }

    #[test]
    fn test_plain_text_never_rewritten() {
        let n = normalizer();
        assert_eq!(
            n.normalize(Some(r#"src="x.png" &amp; more"#), TextKind::Plain),
            r#"src="x.png" & more"#
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let n = normalizer();
        let samples = [
            r#"&lt;p&gt;Ver &lt;img src="Fig 1.png"&gt;&lt;/p&gt;"#,
            r#"<img src="https://other.example.com/x.png">"#,
            "&amp;amp;lt;b&amp;gt;",
            "sin imágenes &nbsp; aquí",
            r#"<img src="a%2520b.gif">"#,
            "",
        ];
        for raw in samples {
            for kind in [TextKind::Html, TextKind::Plain] {
                let once = n.normalize(Some(raw), kind);
                let twice = n.normalize(Some(&once), kind);
                assert_eq!(once, twice, "not idempotent for {raw:?}");
            }
        }
    }

    #[test]
    fn test_texttype_detection() {
        assert_eq!(TextKind::from_texttype(None), TextKind::Html);
        assert_eq!(TextKind::from_texttype(Some("text/HTML")), TextKind::Html);
        assert_eq!(TextKind::from_texttype(Some("text/plain")), TextKind::Plain);
    }
}
