//! Indented rendering of a question's reply forest

use std::collections::HashMap;
use crate::model::Reply;

/// Lay out replies depth-first, children indented under their parent.
///
/// Replies whose parent is not in `replies` are shown at the top level.
/// Sibling order follows the input order. Replies caught in a parent
/// cycle have no root and are not shown.
pub fn reply_tree_lines(replies: &[Reply]) -> Vec<String> {
    let known: HashMap<i64, &Reply> = replies
        .iter()
        .filter_map(|r| r.id.map(|id| (id, r)))
        .collect();

    let mut children: HashMap<i64, Vec<&Reply>> = HashMap::new();
    let mut roots = Vec::new();
    for reply in replies {
        match reply.reply_id {
            Some(parent) if known.contains_key(&parent) => {
                children.entry(parent).or_default().push(reply)
            }
            _ => roots.push(reply),
        }
    }

    let mut lines = Vec::new();
    let mut stack: Vec<(&Reply, usize)> = roots.into_iter().rev().map(|r| (r, 0)).collect();
    while let Some((reply, depth)) = stack.pop() {
        lines.push(format!(
            "{}[{}] user {}: {}",
            "  ".repeat(depth),
            reply.id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string()),
            reply.user_id,
            reply.body
        ));
        if let Some(kids) = reply.id.and_then(|id| children.get(&id)) {
            stack.extend(kids.iter().rev().map(|k| (*k, depth + 1)));
        }
    }
    lines
}
