//! Canonical expand tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SubjectRef;
use crate::Error;

/// Operator of an expand tree node.
///
/// Mirrors the server's rewrite operators. The client does not interpret
/// them beyond knowing that [`NodeType::Leaf`] has no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Subjects of any child.
    Union,
    /// Subjects of the first child that are not in the others.
    Exclusion,
    /// Subjects present in every child.
    Intersection,
    /// A single subject, no children.
    Leaf,
    /// Subject set reached through a tuple-to-subject-set rewrite.
    TupleToSubjectSet,
    /// Subject set reached through a computed-subject-set rewrite.
    ComputedSubjectSet,
    /// Negation of the single child.
    Not,
    /// The server did not specify an operator.
    Unspecified,
}

impl NodeType {
    /// Returns the snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Union => "union",
            NodeType::Exclusion => "exclusion",
            NodeType::Intersection => "intersection",
            NodeType::Leaf => "leaf",
            NodeType::TupleToSubjectSet => "tuple_to_subject_set",
            NodeType::ComputedSubjectSet => "computed_subject_set",
            NodeType::Not => "not",
            NodeType::Unspecified => "unspecified",
        }
    }

    /// Returns `true` for [`NodeType::Leaf`].
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeType::Leaf)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(NodeType::Union),
            "exclusion" => Ok(NodeType::Exclusion),
            "intersection" => Ok(NodeType::Intersection),
            "leaf" => Ok(NodeType::Leaf),
            "tuple_to_subject_set" => Ok(NodeType::TupleToSubjectSet),
            "computed_subject_set" => Ok(NodeType::ComputedSubjectSet),
            "not" => Ok(NodeType::Not),
            "unspecified" => Ok(NodeType::Unspecified),
            other => Err(Error::conversion(format!("unknown node type {other:?}"))),
        }
    }
}

/// A node of the canonical expand tree.
///
/// The tree explains which subjects satisfy a relation on an object. Every
/// node carries an operator and the subject (or subject set) it stands for.
///
/// ## Invariant
///
/// A [`NodeType::Leaf`] node never has children. The constructors drop any
/// children passed for a leaf. Other node types may have zero children,
/// which denotes an empty resolution.
///
/// ## Example
///
/// ```rust
/// use keto_client::types::{ExpandTree, NodeType, SubjectRef};
///
/// let tree = ExpandTree::new(
///     NodeType::Union,
///     SubjectRef::set("documents", "doc1", "viewers"),
///     vec![
///         ExpandTree::leaf(SubjectRef::id("alice")),
///         ExpandTree::leaf(SubjectRef::id("bob")),
///     ],
/// );
/// assert_eq!(tree.children().len(), 2);
/// assert!(tree.children().iter().all(|c| c.children().is_empty()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandTree {
    #[serde(rename = "type")]
    node_type: NodeType,
    #[serde(flatten)]
    subject: SubjectRef,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<ExpandTree>,
}

impl ExpandTree {
    /// Creates a node. Children are discarded if `node_type` is a leaf.
    pub fn new(node_type: NodeType, subject: SubjectRef, children: Vec<ExpandTree>) -> Self {
        let children = if node_type.is_leaf() {
            Vec::new()
        } else {
            children
        };
        Self {
            node_type,
            subject,
            children,
        }
    }

    /// Creates a leaf node.
    pub fn leaf(subject: SubjectRef) -> Self {
        Self::new(NodeType::Leaf, subject, Vec::new())
    }

    /// Returns the node's operator.
    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the subject this node stands for.
    pub fn subject(&self) -> &SubjectRef {
        &self.subject
    }

    /// Returns the children, in the order the server sent them.
    pub fn children(&self) -> &[ExpandTree] {
        &self.children
    }

    /// Returns the number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the subject IDs of all leaves, depth first.
    pub fn leaf_subject_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        self.collect_leaf_ids(&mut ids);
        ids
    }

    fn collect_leaf_ids<'a>(&'a self, ids: &mut Vec<&'a str>) {
        if self.node_type.is_leaf()
            && let Some(id) = self.subject.as_id()
        {
            ids.push(id);
        }
        for child in &self.children {
            child.collect_leaf_ids(ids);
        }
    }
}
