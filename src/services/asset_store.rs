//! 图片资源地址服务 - 业务能力层
//!
//! 只负责"文件名 → 公开 URL"，不上传、不鉴权、不发网络请求。

use crate::config::Config;

/// 可识别的图片扩展名（小写，不含点）
pub const IMAGE_EXTENSIONS: [&str; 6] = ["svg", "png", "jpg", "jpeg", "gif", "webp"];

/// 资源存储的公开地址能力
pub trait AssetStore {
    /// 根据已编码的文件名生成公开访问地址
    fn public_url(&self, filename: &str) -> String;

    /// 文件名是否是可识别的图片
    fn is_image_file(&self, filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .map(|(_, ext)| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }
}

/// 公开存储桶中某个目录下的资源
#[derive(Debug, Clone)]
pub struct PublicBucketStore {
    base_url: String,
}

impl PublicBucketStore {
    /// 使用完整的目录地址创建
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 从配置创建
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.asset_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl AssetStore for PublicBucketStore {
    fn public_url(&self, filename: &str) -> String {
        format!("{}/{}", self.base_url, filename.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_joins_without_double_slash() {
        let store = PublicBucketStore::new("https://cdn.example.com/public/images/");
        assert_eq!(
            store.public_url("a%20b.png"),
            "https://cdn.example.com/public/images/a%20b.png"
        );
        assert_eq!(
            store.public_url("/c.svg"),
            "https://cdn.example.com/public/images/c.svg"
        );
    }

    #[test]
    fn test_is_image_file() {
        let store = PublicBucketStore::new("https://x");
        assert!(store.is_image_file("Diagram.PNG"));
        assert!(store.is_image_file("foto.jpeg"));
        assert!(!store.is_image_file("notes.pdf"));
        assert!(!store.is_image_file("png"));
    }

    #[test]
    fn test_from_config_builds_bucket_path() {
        let config = Config {
            storage_url: "https://store.example.com".to_string(),
            storage_bucket: "exam-materials".to_string(),
            storage_path: "question-images".to_string(),
            ..Config::default()
        };
        let store = PublicBucketStore::from_config(&config);
        assert_eq!(
            store.base_url(),
            "https://store.example.com/storage/v1/object/public/exam-materials/question-images"
        );
    }
}
