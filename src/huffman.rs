//! Huffman forest: leaf symbols, greedy merging and tree walks.
//!
//! Nodes live in an arena owned by the [`Forest`] and refer to each other by
//! [`NodeId`]. Children are owned top-down through the arena; `parent` is only
//! a back-reference used for ancestry lookups while rendering.
//!
//! Every [`Forest::append`] throws the previous tree away, rebuilds the flat
//! leaf list and merges from scratch. Merge order under equal weights is
//! decided by list position: the roots are kept in a stable ascending sort,
//! and the first two entries are always merged next.

use log::{debug, trace, warn};

use crate::error::{Error, Result};

pub const LEFT_CHILD: char = '0';
pub const RIGHT_CHILD: char = '1';

/// Index of a node inside its forest. Ids are invalidated by every rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: u64,
        parent: Option<NodeId>,
        code: String,
    },
    Internal {
        weight: u128,
        left: NodeId,
        right: NodeId,
        parent: Option<NodeId>,
    },
}

impl Node {
    fn leaf(symbol: char, weight: u64) -> Self {
        Node::Leaf {
            symbol,
            weight,
            parent: None,
            code: String::new(),
        }
    }

    /// Leaf weights are `u64`; internal sums are widened so they cannot
    /// overflow.
    pub fn weight(&self) -> u128 {
        match self {
            Node::Leaf { weight, .. } => u128::from(*weight),
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Root-to-leaf path. `None` on internal nodes.
    pub fn code(&self) -> Option<&str> {
        match self {
            Node::Leaf { code, .. } => Some(code),
            Node::Internal { .. } => None,
        }
    }

    pub fn left(&self) -> Option<NodeId> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, .. } => Some(*left),
        }
    }

    pub fn right(&self) -> Option<NodeId> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { right, .. } => Some(*right),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf { parent, .. } | Node::Internal { parent, .. } => *parent,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    fn set_parent(&mut self, id: NodeId) {
        match self {
            Node::Leaf { parent, .. } | Node::Internal { parent, .. } => *parent = Some(id),
        }
    }
}

/// Ordered collection of tree roots, ascending by weight.
///
/// Before the first append the forest is empty. After any append it holds
/// exactly one root from which every appended leaf is reachable.
#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of roots currently in the forest.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    pub fn root(&self) -> Option<&Node> {
        self.root_id().map(|id| self.at(id))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn total_weight(&self) -> u128 {
        self.roots.iter().map(|&id| self.at(id).weight()).sum()
    }

    /// All leaves reachable from the roots, in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots
            .iter()
            .flat_map(move |&root| self.preorder(root))
            .map(move |id| self.at(id))
            .filter(|node| node.is_leaf())
    }

    /// Unmerged leaves, as the forest looks between a reset and the merge loop.
    #[cfg(test)]
    pub(crate) fn flat(pairs: &[(char, u64)]) -> Self {
        let mut forest = Self::new();
        for &(symbol, weight) in pairs {
            let id = forest.push(Node::leaf(symbol, weight));
            forest.roots.push(id);
        }
        forest.sort();
        forest
    }

    pub(crate) fn preorder(&self, root: NodeId) -> Preorder<'_> {
        Preorder {
            forest: self,
            stack: vec![root],
        }
    }

    /// Adds a leaf and rebuilds the whole tree from the original leaf weights.
    ///
    /// Duplicate symbols are accepted; each append creates an independent
    /// leaf.
    pub fn append(&mut self, symbol: char, weight: u64) {
        self.reset();

        let id = self.push(Node::leaf(symbol, weight));
        self.roots.push(id);
        self.sort();

        self.huffman_code();
    }

    /// Drops every node. Previously handed out ids and codes are invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
    }

    /// Walks `input` from the root, emitting a symbol each time a leaf is
    /// reached. Trailing bits that do not complete a code are dropped.
    pub fn decode(&self, input: &str) -> Result<String> {
        let Some(root) = self.root_id() else {
            return Err(Error::EmptyTree);
        };
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut output = String::new();
        let mut cur = root;

        for (position, character) in input.chars().enumerate() {
            if character != LEFT_CHILD && character != RIGHT_CHILD {
                warn!("Decode stopped on illegal character {character:?} at {position}");
                return Err(Error::IllegalCharacter {
                    character,
                    position,
                    partial: output,
                });
            }

            let Some(next) = self.step(cur, character) else {
                warn!("Decode walked off the tree at {position}");
                return Err(Error::DecodeFailed {
                    position,
                    partial: output,
                });
            };

            if let Node::Leaf { symbol, .. } = self.at(next) {
                output.push(*symbol);
                cur = root;
            } else {
                cur = next;
            }
        }

        Ok(output)
    }

    fn step(&self, from: NodeId, bit: char) -> Option<NodeId> {
        match (self.at(from), bit) {
            (Node::Internal { left, .. }, LEFT_CHILD) => Some(*left),
            (Node::Internal { right, .. }, RIGHT_CHILD) => Some(*right),
            // The cursor only rests on a leaf when that leaf is the lone root,
            // whose code is "0".
            (Node::Leaf { .. }, LEFT_CHILD) => Some(from),
            _ => None,
        }
    }

    fn at(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn sort(&mut self) {
        let nodes = &self.nodes;
        self.roots.sort_by_key(|&id| nodes[id.0].weight());
    }

    /// Collapses the forest back to its leaves, in pre-order of the current
    /// tree(s). Internal nodes are discarded.
    fn reset(&mut self) {
        let leaves: Vec<(char, u64)> = self
            .leaves()
            .filter_map(|node| match node {
                Node::Leaf { symbol, weight, .. } => Some((*symbol, *weight)),
                Node::Internal { .. } => None,
            })
            .collect();

        self.clear();
        for (symbol, weight) in leaves {
            let id = self.push(Node::leaf(symbol, weight));
            self.roots.push(id);
        }
    }

    fn huffman_code(&mut self) {
        let leaves = self.roots.len();
        let mut merges = 0;
        while self.next_step() {
            merges += 1;
        }
        debug!("Rebuilt Huffman tree: {leaves} leaves, {merges} merges");

        let Some(root) = self.root_id() else {
            return;
        };
        match &mut self.nodes[root.0] {
            Node::Leaf { symbol, code, .. } => {
                trace!("Lone leaf {symbol:?} gets code '{LEFT_CHILD}'");
                *code = LEFT_CHILD.to_string();
            }
            Node::Internal { .. } => self.assign_codes(root, String::new()),
        }
    }

    /// Merges the two lightest roots. Returns false once fewer than two remain.
    fn next_step(&mut self) -> bool {
        if self.roots.len() < 2 {
            return false;
        }

        let a = self.roots.remove(0);
        let b = self.roots.remove(0);

        let weight = self.at(a).weight() + self.at(b).weight();
        let id = self.push(Node::Internal {
            weight,
            left: a,
            right: b,
            parent: None,
        });
        self.nodes[a.0].set_parent(id);
        self.nodes[b.0].set_parent(id);
        trace!(
            "Merged {} + {} into weight {weight}",
            self.at(a).weight(),
            self.at(b).weight()
        );

        self.roots.push(id);
        self.sort();
        true
    }

    fn assign_codes(&mut self, id: NodeId, path: String) {
        match &mut self.nodes[id.0] {
            Node::Leaf { symbol, code, .. } => {
                trace!("Assigning code to {symbol:?}: '{path}'");
                *code = path;
            }
            Node::Internal { left, right, .. } => {
                let (left, right) = (*left, *right);
                self.assign_codes(left, format!("{path}{LEFT_CHILD}"));
                self.assign_codes(right, format!("{path}{RIGHT_CHILD}"));
            }
        }
    }
}

/// Pre-order walk: node, then left subtree, then right subtree.
pub(crate) struct Preorder<'a> {
    forest: &'a Forest,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Node::Internal { left, right, .. } = self.forest.at(id) {
            self.stack.push(*right);
            self.stack.push(*left);
        }
        Some(id)
    }
}
