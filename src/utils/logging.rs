/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use regex::Regex;
use std::sync::LazyLock;
use tracing::{info, warn};

use crate::models::ConversionReport;

/// 记录程序启动信息
///
/// # 参数
/// - `xml_path`: 输入 XML 路径
/// - `output_json`: 输出 JSON 路径
pub fn log_startup(xml_path: &str, output_json: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 题库转换开始 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("📄 输入: {}", xml_path);
    info!("💾 输出: {}", output_json);
    info!("{}", "=".repeat(60));
}

/// 记录分区信息
///
/// # 参数
/// - `title`: 分区标题
/// - `question_count`: 分区内题目数
pub fn log_section(title: &str, question_count: usize) {
    info!("📂 分区: {} ({} 道题)", title, question_count);
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 转换结果
/// - `max_errors`: 最多打印的跳过记录条数
pub fn print_summary(report: &ConversionReport, max_errors: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 转换完成统计");
    info!("{}", "=".repeat(60));
    for (question_type, count) in &report.type_counts {
        info!("  {}: {}", question_type, count);
    }
    info!("✅ 共计: {}", report.questions.len());

    if !report.skipped.is_empty() {
        warn!("❌ 跳过 {} 道题:", report.skipped.len());
        for skipped in report.skipped.iter().take(max_errors) {
            warn!("  {}", skipped);
        }
        if report.skipped.len() > max_errors {
            warn!("  ... 还有 {} 条", report.skipped.len() - max_errors);
        }
    }

    info!("🖼️ 含图片的题目: {}", report.image_question_count());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// HTML 标签，只编译一次
static HTML_TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());

/// 去掉 HTML 标签，得到纯文本
pub fn strip_html_tags(html: &str) -> String {
    match HTML_TAG.as_ref() {
        Some(re) => re.replace_all(html, "").trim().to_string(),
        None => html.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("¿Qué es?", 3), "¿Qu...");
        assert_eq!(truncate_text("corto", 10), "corto");
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(
            strip_html_tags(r#" <p>Vea <img src="a.png"> la <b>figura</b></p> "#),
            "Vea  la figura"
        );
        // 重复调用共用同一个已编译的正则
        assert!(HTML_TAG.is_some());
        assert_eq!(strip_html_tags("<i>otra</i>"), "otra");
    }
}
