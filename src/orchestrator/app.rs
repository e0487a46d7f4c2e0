//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：根据配置创建 `DocumentWalker`
//! 2. **加载文档**：读取题库导出 XML
//! 3. **转换**：委托 `DocumentWalker` 遍历全部题目
//! 4. **输出**：写入 JSON 并打印统计

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::config::Config;
use crate::models::{load_xml_text, ConversionReport};
use crate::orchestrator::document_walker::DocumentWalker;
use crate::services::JsonWriter;
use crate::utils::logging::{log_startup, print_summary};

/// 应用主结构
pub struct App {
    config: Config,
    walker: DocumentWalker,
    writer: JsonWriter,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let walker = DocumentWalker::new(&config).context("无法创建文档遍历器")?;
        let writer = JsonWriter::with_path(&config.output_json);

        Ok(Self {
            config,
            walker,
            writer,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ConversionReport> {
        log_startup(&self.config.xml_path, &self.config.output_json);

        let xml = load_xml_text(Path::new(&self.config.xml_path)).await?;
        let report = self
            .walker
            .parse_document(&xml)
            .with_context(|| format!("无法解析题库文件: {}", self.config.xml_path))?;

        info!(
            "\n💾 写入 {} 道题到: {}",
            report.questions.len(),
            self.writer.output_path().display()
        );
        self.writer.write(&report.questions).await?;

        print_summary(&report, self.config.max_reported_errors);

        Ok(report)
    }
}
