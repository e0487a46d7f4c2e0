use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 题库导出 XML 文件路径
    pub xml_path: String,
    /// 输出 JSON 文件路径
    pub output_json: String,
    // --- 图片存储配置 ---
    /// 存储服务根地址
    pub storage_url: String,
    /// 存储桶名称
    pub storage_bucket: String,
    /// 桶内图片目录
    pub storage_path: String,
    /// 汇总时最多打印的错误条数
    pub max_reported_errors: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            xml_path: "questiondb.xml".to_string(),
            output_json: "questions.json".to_string(),
            storage_url: "http://localhost:54321".to_string(),
            storage_bucket: "exam-materials".to_string(),
            storage_path: "question-images".to_string(),
            max_reported_errors: 20,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值，然后再应用环境变量
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
        Ok(config.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            xml_path: std::env::var("QTI_XML_PATH").unwrap_or(self.xml_path),
            output_json: std::env::var("QTI_OUTPUT_JSON").unwrap_or(self.output_json),
            storage_url: std::env::var("STORAGE_URL").unwrap_or(self.storage_url),
            storage_bucket: std::env::var("STORAGE_BUCKET").unwrap_or(self.storage_bucket),
            storage_path: std::env::var("STORAGE_PATH").unwrap_or(self.storage_path),
            max_reported_errors: std::env::var("MAX_REPORTED_ERRORS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_reported_errors),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 图片公开访问的目录地址
    pub fn asset_base_url(&self) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.storage_url.trim_end_matches('/'),
            self.storage_bucket,
            self.storage_path
        )
    }
}
