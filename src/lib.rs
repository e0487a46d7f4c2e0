//! # QTI Question Import
//!
//! 把题库导出文件（QTI 1.2 风格的 `questiondb.xml`）转换为统一格式的题目 JSON
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力，不认识题型
//! - `xml_query` - 按固定路径查询节点
//! - `entities` - 字符实体解码
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `TextNormalizer` - 文本解码 + 图片地址改写
//! - `AssetStore` - 文件名 → 公开地址
//! - `metadata_reader` / `scoring` - 题型元数据与评分规则
//! - `JsonWriter` - 写 JSON 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的完整处理流程
//! - `QuestionFlow` - 读题型 → 找 flow → 分派提取器 → 记录
//! - `extractors` - 七种题型各自的提取器
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/document_walker` - 遍历整个文档，分配序号，汇总统计
//! - `orchestrator/app` - 读文件、写文件、打印统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, SkipReason};
pub use models::{ConversionReport, MatchingPair, Payload, QuestionRecord, QuestionType, SkippedQuestion};
pub use orchestrator::{App, DocumentWalker};
pub use services::{AssetStore, PublicBucketStore, TextKind, TextNormalizer};
pub use workflow::{ProcessResult, QuestionCtx, QuestionFlow};
