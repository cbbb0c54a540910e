//! Text diagram of the code tree.
//!
//! ```text
//! weight:3
//! ┣━━weight:1    symbol:a code:0
//! ┗━━weight:2    symbol:b code:1
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::huffman::{Forest, Node, NodeId};

const VERT_LINE: &str = "┃";
const START_LEFT_CHILD: &str = "┣━━";
const START_RIGHT_CHILD: &str = "┗━━";
const INDENT: usize = 8;

impl Forest {
    /// Renders every root once, each tree followed by a blank line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut visited = HashSet::new();

        for &root in self.roots() {
            if visited.contains(&root) {
                continue;
            }
            render_node(self, root, &mut visited, &mut out);
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_node(forest: &Forest, id: NodeId, visited: &mut HashSet<NodeId>, out: &mut String) {
    let Some(node) = forest.node(id) else {
        return;
    };

    let mut line = ancestry(forest, node);

    if let Some(parent) = node.parent().and_then(|p| forest.node(p)) {
        if parent.left() == Some(id) && parent.right().is_some() {
            line.push_str(START_LEFT_CHILD);
        } else {
            line.push_str(START_RIGHT_CHILD);
        }
    }

    match node {
        Node::Leaf {
            symbol,
            weight,
            code,
            ..
        } => line.push_str(&format!("weight:{weight:<4} symbol:{symbol} code:{code}")),
        Node::Internal { weight, .. } => line.push_str(&format!("weight:{weight:<4}")),
    }

    visited.insert(id);
    out.push_str(&line);
    out.push('\n');

    if let Some(left) = node.left() {
        render_node(forest, left, visited, out);
    }
    if let Some(right) = node.right() {
        render_node(forest, right, visited, out);
    }
}

/// One column per ancestor below the root: a bar where that ancestor is a
/// left child, blank otherwise.
fn ancestry(forest: &Forest, node: &Node) -> String {
    let mut columns = Vec::new();
    let mut cur = node.parent();

    while let Some(cur_id) = cur {
        let Some(parent_id) = forest.node(cur_id).and_then(Node::parent) else {
            break;
        };
        let from_left = forest.node(parent_id).and_then(Node::left) == Some(cur_id);
        columns.push(if from_left { VERT_LINE } else { "" });
        cur = Some(parent_id);
    }

    columns
        .iter()
        .rev()
        .map(|column| format!("{column:<INDENT$}"))
        .collect()
}
