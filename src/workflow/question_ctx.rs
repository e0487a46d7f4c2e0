//! 题目处理上下文
//!
//! 封装"我正在处理哪个分区的第几题"这一信息

use std::fmt::Display;

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 题目序号（从1开始，按遇到顺序分配，解析失败也占用）
    pub id: usize,

    /// 所在分区标题
    pub section: String,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(id: usize, section: impl Into<String>) -> Self {
        Self {
            id,
            section: section.into(),
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[分区 {} 题目#{}]", self.section, self.id)
    }
}
