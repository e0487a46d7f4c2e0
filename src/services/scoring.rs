//! 评分规则解析
//!
//! 把 `resprocessing/respcondition` 转成带类型的规则列表，
//! 各题型的"哪个是正确答案"判断都基于这里的结构。

use roxmltree::Node;

use crate::infrastructure::xml_query::{child, element_children, select_all, tag, text};

/// 表示"答对"的评分变量
pub const CORRECT_VAR: &str = "D2L_Correct";
/// 表示"答错"的评分变量
pub const INCORRECT_VAR: &str = "D2L_Incorrect";

const RULE_PATH: &[&str] = &["resprocessing", "respcondition"];

/// `conditionvar` 中 `not` / `and` / `or` 的最大嵌套层数
const MAX_CONDITION_DEPTH: usize = 4;

/// 条件中的一个相等判断（`varequal`）
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityTest<'a> {
    /// 被判断的作答标识（`respident` 属性）
    pub respident: Option<&'a str>,
    /// 比较值原文：选项标识、填空答案或排序位置
    pub value: Option<&'a str>,
    /// 是否处于 `not` 之内
    pub negated: bool,
    /// 是否是 `conditionvar` 的直接子节点
    pub direct: bool,
}

impl<'a> EqualityTest<'a> {
    /// 作为标识使用的值（选项标识、排序位置）：去掉首尾空白，空值视为没有
    pub fn ident(&self) -> Option<&'a str> {
        self.value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// 作为答案文字使用的值：保留原文，只有全是空白时视为没有
    pub fn literal(&self) -> Option<&'a str> {
        self.value.filter(|v| !v.trim().is_empty())
    }
}

/// 规则的计分动作（`setvar`）
#[derive(Debug, Clone, PartialEq)]
pub struct SetVar<'a> {
    pub varname: &'a str,
    pub action: &'a str,
    /// 无法解析的分值按 0 处理
    pub score: f64,
}

/// 一条评分规则（`respcondition`）
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRule<'a> {
    pub setvar: Option<SetVar<'a>>,
    /// 文档顺序的全部相等判断
    pub tests: Vec<EqualityTest<'a>>,
}

impl<'a> ScoringRule<'a> {
    /// 从 `respcondition` 节点解析
    pub fn parse(node: Node<'a, '_>) -> Self {
        let setvar = child(node, "setvar").map(|sv| SetVar {
            varname: sv.attribute("varname").unwrap_or(""),
            action: sv.attribute("action").unwrap_or(""),
            score: parse_score(text(sv)),
        });

        let mut tests = Vec::new();
        for part in element_children(node) {
            match tag(part) {
                "conditionvar" => collect_tests(part, 0, false, &mut tests),
                "varequal" => tests.push(equality_test(part, false, false)),
                _ => {}
            }
        }

        Self { setvar, tests }
    }

    pub fn score(&self) -> f64 {
        self.setvar.as_ref().map(|sv| sv.score).unwrap_or(0.0)
    }

    /// 分值大于 0
    pub fn is_positive(&self) -> bool {
        self.score() > 0.0
    }

    /// 是否是"答对"信号：`D2L_Correct` 加分，或者非 `D2L_Incorrect` 的正分
    pub fn is_affirmative(&self) -> bool {
        match &self.setvar {
            Some(sv) => {
                (sv.varname == CORRECT_VAR && sv.action == "Add")
                    || (sv.score > 0.0 && sv.varname != INCORRECT_VAR)
            }
            None => false,
        }
    }

    /// 评分变量是否为 `D2L_Correct`
    pub fn sets_correct_var(&self) -> bool {
        self.setvar
            .as_ref()
            .map(|sv| sv.varname == CORRECT_VAR)
            .unwrap_or(false)
    }

    /// 文档顺序中的第一个相等判断（无论是否取反）
    pub fn first_test(&self) -> Option<&EqualityTest<'a>> {
        self.tests.first()
    }

    /// 直接、未取反的相等判断
    pub fn required_tests(&self) -> impl Iterator<Item = &EqualityTest<'a>> {
        self.tests.iter().filter(|t| t.direct && !t.negated)
    }
}

/// 读取题目下全部评分规则（规则顺序即文档顺序）
pub fn scoring_rules<'a>(item: Node<'a, '_>) -> Vec<ScoringRule<'a>> {
    select_all(item, RULE_PATH)
        .into_iter()
        .map(ScoringRule::parse)
        .collect()
}

fn collect_tests<'a>(node: Node<'a, '_>, depth: usize, negated: bool, tests: &mut Vec<EqualityTest<'a>>) {
    if depth > MAX_CONDITION_DEPTH {
        return;
    }

    for part in element_children(node) {
        match tag(part) {
            "varequal" => tests.push(equality_test(part, negated, depth == 0)),
            "not" => collect_tests(part, depth + 1, !negated, tests),
            "and" | "or" => collect_tests(part, depth + 1, negated, tests),
            _ => {}
        }
    }
}

fn equality_test<'a>(node: Node<'a, '_>, negated: bool, direct: bool) -> EqualityTest<'a> {
    EqualityTest {
        respident: node.attribute("respident"),
        value: text(node),
        negated,
        direct,
    }
}

fn parse_score(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse_rules(xml: &str) -> Vec<(f64, bool, usize)> {
        let doc = Document::parse(xml).unwrap();
        scoring_rules(doc.root_element())
            .iter()
            .map(|r| (r.score(), r.is_positive(), r.tests.len()))
            .collect()
    }

    #[test]
    fn test_scores_and_missing_setvar() {
        let xml = r#"
            <item><resprocessing>
              <respcondition><conditionvar><varequal respident="R">A</varequal></conditionvar><setvar>100.0000</setvar></respcondition>
              <respcondition><conditionvar><varequal respident="R">B</varequal></conditionvar><setvar>abc</setvar></respcondition>
              <respcondition><conditionvar><varequal respident="R">C</varequal></conditionvar></respcondition>
            </resprocessing></item>"#;
        assert_eq!(
            parse_rules(xml),
            vec![(100.0, true, 1), (0.0, false, 1), (0.0, false, 1)]
        );
    }

    #[test]
    fn test_negated_and_nested_tests() {
        let xml = r#"
            <item><resprocessing><respcondition>
              <conditionvar>
                <varequal respident="R">A</varequal>
                <not><varequal respident="R">C</varequal></not>
                <and><varequal respident="R">D</varequal></and>
                <varequal respident="R">B</varequal>
              </conditionvar>
              <setvar action="Set">1</setvar>
            </respcondition></resprocessing></item>"#;
        let doc = Document::parse(xml).unwrap();
        let rules = scoring_rules(doc.root_element());
        let rule = &rules[0];

        let values: Vec<_> = rule.tests.iter().map(|t| (t.ident().unwrap(), t.negated, t.direct)).collect();
        assert_eq!(
            values,
            vec![("A", false, true), ("C", true, false), ("D", false, false), ("B", false, true)]
        );
        let required: Vec<_> = rule.required_tests().filter_map(|t| t.ident()).collect();
        assert_eq!(required, vec!["A", "B"]);
        assert_eq!(rule.first_test().and_then(|t| t.ident()), Some("A"));
    }

    #[test]
    fn test_literal_keeps_surrounding_whitespace() {
        let xml = r#"
            <item><resprocessing><respcondition>
              <conditionvar><varequal respident="R"> Opt_1 </varequal><varequal respident="R">   </varequal></conditionvar>
              <setvar>1</setvar>
            </respcondition></resprocessing></item>"#;
        let doc = Document::parse(xml).unwrap();
        let rules = scoring_rules(doc.root_element());
        let tests = &rules[0].tests;

        assert_eq!(tests[0].value, Some(" Opt_1 "));
        assert_eq!(tests[0].ident(), Some("Opt_1"));
        assert_eq!(tests[0].literal(), Some(" Opt_1 "));
        assert_eq!(tests[1].ident(), None);
        assert_eq!(tests[1].literal(), None);
    }

    #[test]
    fn test_affirmative_signal() {
        let xml = r#"
            <item><resprocessing>
              <respcondition><setvar varname="D2L_Correct" action="Add">0</setvar></respcondition>
              <respcondition><setvar varname="D2L_Incorrect" action="Add">1</setvar></respcondition>
              <respcondition><setvar varname="que_score" action="Set">2</setvar></respcondition>
              <respcondition><setvar varname="que_score" action="Set">0</setvar></respcondition>
            </resprocessing></item>"#;
        let doc = Document::parse(xml).unwrap();
        let flags: Vec<_> = scoring_rules(doc.root_element())
            .iter()
            .map(|r| (r.is_affirmative(), r.sets_correct_var()))
            .collect();
        assert_eq!(
            flags,
            vec![(true, true), (false, false), (true, false), (false, false)]
        );
    }
}
