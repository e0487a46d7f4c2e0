//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 读取 XML、写出 JSON、打印统计
//!
//! ### `document_walker` - 单个文档遍历器
//! - 遍历分区和题目，分配序号
//! - 委托 QuestionFlow 处理单道题
//! - 汇总成功/跳过/题型计数
//!
//! ## 层次关系
//!
//! ```text
//! app (文件 → 文件)
//!     ↓
//! document_walker (处理 Vec<item>)
//!     ↓
//! workflow::QuestionFlow (处理单个 item)
//!     ↓
//! workflow::extractors (按题型提取)
//!     ↓
//! services (能力层：文本规范化 / 元数据 / 评分规则)
//!     ↓
//! infrastructure (基础设施：XML 路径查询 / 实体解码)
//! ```

pub mod app;
pub mod document_walker;

// 重新导出主要类型
pub use app::App;
pub use document_walker::{DocumentWalker, DEFAULT_SECTION_TITLE};
