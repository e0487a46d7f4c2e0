//! XML 结构查询 - 基础设施层
//!
//! 只提供"按固定路径找节点"的能力。
//!
//! 所有查询都是显式的逐级路径（如 `["render_choice", "flow_label", "response_label"]`），
//! 不做"任意深度"的通配搜索：结构不符合预期时查询直接返回空，
//! 而不会误匹配到不相关的深层节点。

use roxmltree::Node;

/// 节点的本地标签名（忽略命名空间）
pub fn tag<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// 判断节点是否是指定名称的元素
pub fn is_element_named(node: Node<'_, '_>, name: &str) -> bool {
    node.is_element() && tag(node) == name
}

/// 按文档顺序返回所有元素子节点
pub fn element_children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(|n| n.is_element())
}

/// 第一个指定名称的直接子元素
pub fn child<'a, 'input: 'a>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_element_named(*n, name))
}

/// 所有指定名称的直接子元素（文档顺序）
pub fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |n| is_element_named(*n, name))
}

/// 沿路径查找第一个匹配节点
///
/// 每一级都会尝试所有同名子元素，因此
/// `["flow_label", "response_label"]` 在第一个 `flow_label` 为空时会继续尝试后面的。
pub fn select<'a, 'input: 'a>(node: Node<'a, 'input>, path: &[&str]) -> Option<Node<'a, 'input>> {
    match path.split_first() {
        None => Some(node),
        Some((head, rest)) => node
            .children()
            .filter(|n| is_element_named(*n, head))
            .find_map(|n| select(n, rest)),
    }
}

/// 沿路径收集所有匹配节点（文档顺序）
pub fn select_all<'a, 'input: 'a>(node: Node<'a, 'input>, path: &[&str]) -> Vec<Node<'a, 'input>> {
    let mut found = Vec::new();
    collect(node, path, &mut found);
    found
}

fn collect<'a, 'input: 'a>(node: Node<'a, 'input>, path: &[&str], found: &mut Vec<Node<'a, 'input>>) {
    match path.split_first() {
        None => found.push(node),
        Some((head, rest)) => {
            for n in node.children().filter(|n| is_element_named(*n, head)) {
                collect(n, rest, found);
            }
        }
    }
}

/// 依次尝试多条候选路径，返回第一条命中的结果
pub fn select_any<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    paths: &[&[&str]],
) -> Option<Node<'a, 'input>> {
    paths.iter().find_map(|path| select(node, path))
}

/// 依次尝试多条候选路径，返回第一条有结果的路径上的全部节点
pub fn select_all_any<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    paths: &[&[&str]],
) -> Vec<Node<'a, 'input>> {
    paths
        .iter()
        .map(|path| select_all(node, path))
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

/// 节点的直接文本内容
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text()
}
