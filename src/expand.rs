//! Reconstruction of expand trees from wire payloads.
//!
//! Both transports deliver the expand tree in their own encoding. Each
//! encoding implements [`WireTree`], and [`normalize`] turns any of them into
//! the canonical [`ExpandTree`]:
//!
//! 1. the node type is read from the wire tag,
//! 2. the subject is a subject set if the node carries one, otherwise the
//!    atomic subject ID,
//! 3. a leaf's children are discarded, even if the wire node lists some,
//! 4. any other node's children are normalized recursively, in order.
//!
//! The server bounds the tree depth by the requested max depth. Normalization
//! still refuses trees deeper than [`MAX_TREE_DEPTH`] so malformed input
//! cannot recurse without bound. The ceiling sits below the nesting limits of
//! both decoders: serde_json stops at 128 levels and each tree level costs two
//! (the node object and its `children` array), prost stops at 100 nested
//! messages. Transports report a tree that trips a decoder limit with the
//! same conversion error as a tree over the ceiling.

use crate::types::{ExpandTree, NodeType, SubjectRef};
use crate::Error;

/// Deepest tree [`normalize`] accepts, counted in edges from the root.
pub const MAX_TREE_DEPTH: usize = 48;

/// A node of an expand tree as received from a transport.
pub trait WireTree: Sized {
    /// Reads the node's operator from the wire tag.
    fn node_type(&self) -> Result<NodeType, Error>;

    /// Reads the subject or subject set this node stands for.
    fn subject(&self) -> Result<SubjectRef, Error>;

    /// Returns the child nodes as sent, including any sent for a leaf.
    fn children(&self) -> &[Self];
}

/// Converts a wire tree into the canonical tree.
///
/// Fails with [`ErrorKind::Conversion`](crate::ErrorKind::Conversion) if a
/// node has an unknown type or no subject, or if the tree is deeper than
/// [`MAX_TREE_DEPTH`].
pub fn normalize<W: WireTree>(root: &W) -> Result<ExpandTree, Error> {
    normalize_at(root, 0).map_err(|e| e.with_operation("expand"))
}

fn normalize_at<W: WireTree>(node: &W, depth: usize) -> Result<ExpandTree, Error> {
    if depth > MAX_TREE_DEPTH {
        return Err(tree_too_deep());
    }

    let node_type = node.node_type().map_err(into_conversion)?;
    let subject = node.subject().map_err(into_conversion)?;

    if node_type.is_leaf() {
        if !node.children().is_empty() {
            tracing::debug!(
                %subject,
                dropped = node.children().len(),
                "discarding children of leaf node"
            );
        }
        return Ok(ExpandTree::leaf(subject));
    }

    let children = node
        .children()
        .iter()
        .map(|child| normalize_at(child, depth + 1))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExpandTree::new(node_type, subject, children))
}

/// The conversion error for a tree deeper than [`MAX_TREE_DEPTH`].
pub(crate) fn tree_too_deep() -> Error {
    Error::conversion(format!(
        "could not convert received expand tree to internal format: \
         tree is deeper than {MAX_TREE_DEPTH} levels"
    ))
}

fn into_conversion(err: Error) -> Error {
    Error::conversion(format!(
        "could not convert received expand tree to internal format: {}",
        err.message()
    ))
    .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubjectSet;
    use crate::ErrorKind;
    use proptest::prelude::*;

    /// Minimal wire encoding for exercising the algorithm.
    #[derive(Debug, Clone)]
    struct Node {
        node_type: &'static str,
        subject_id: Option<String>,
        subject_set: Option<SubjectSet>,
        children: Vec<Node>,
    }

    impl Node {
        fn id(node_type: &'static str, id: &str, children: Vec<Node>) -> Self {
            Self {
                node_type,
                subject_id: Some(id.to_string()),
                subject_set: None,
                children,
            }
        }

        fn set(node_type: &'static str, set: SubjectSet, children: Vec<Node>) -> Self {
            Self {
                node_type,
                subject_id: None,
                subject_set: Some(set),
                children,
            }
        }
    }

    impl WireTree for Node {
        fn node_type(&self) -> Result<NodeType, Error> {
            self.node_type.parse()
        }

        fn subject(&self) -> Result<SubjectRef, Error> {
            match (&self.subject_set, &self.subject_id) {
                (Some(set), _) => Ok(SubjectRef::Set(set.clone())),
                (None, Some(id)) => Ok(SubjectRef::Id(id.clone())),
                (None, None) => Err(Error::conversion("node carries no subject")),
            }
        }

        fn children(&self) -> &[Self] {
            &self.children
        }
    }

    fn viewers() -> SubjectSet {
        SubjectSet::new("documents", "doc1", "viewers")
    }

    #[test]
    fn test_union_of_two_leaves() {
        let wire = Node::set(
            "union",
            viewers(),
            vec![
                Node::id("leaf", "alice", vec![]),
                Node::id("leaf", "bob", vec![]),
            ],
        );

        let tree = normalize(&wire).unwrap();
        assert_eq!(tree.node_type(), NodeType::Union);
        assert_eq!(tree.subject(), &SubjectRef::Set(viewers()));
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[0].subject(), &SubjectRef::id("alice"));
        assert_eq!(tree.children()[1].subject(), &SubjectRef::id("bob"));
        assert!(tree.children().iter().all(|c| c.node_type() == NodeType::Leaf));
        assert!(tree.children().iter().all(|c| c.children().is_empty()));
    }

    #[test]
    fn test_leaf_children_are_discarded() {
        let wire = Node::id(
            "leaf",
            "alice",
            vec![Node::id("leaf", "bob", vec![]), Node::id("leaf", "carol", vec![])],
        );

        let tree = normalize(&wire).unwrap();
        assert_eq!(tree.node_type(), NodeType::Leaf);
        assert!(tree.children().is_empty());
    }

    #[test]
    fn test_invalid_children_of_leaf_are_not_inspected() {
        let wire = Node::id("leaf", "alice", vec![Node::id("bogus", "bob", vec![])]);
        assert!(normalize(&wire).is_ok());
    }

    #[test]
    fn test_subject_set_preferred_over_id() {
        let mut wire = Node::set("union", viewers(), vec![]);
        wire.subject_id = Some("ignored".to_string());

        let tree = normalize(&wire).unwrap();
        assert_eq!(tree.subject(), &SubjectRef::Set(viewers()));
    }

    #[test]
    fn test_empty_non_leaf_is_kept() {
        let tree = normalize(&Node::set("intersection", viewers(), vec![])).unwrap();
        assert_eq!(tree.node_type(), NodeType::Intersection);
        assert!(tree.children().is_empty());
    }

    #[test]
    fn test_unknown_node_type_is_conversion_error() {
        let wire = Node::set("union", viewers(), vec![Node::id("xor", "alice", vec![])]);
        let err = normalize(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
        assert_eq!(err.operation(), Some("expand"));
    }

    #[test]
    fn test_missing_subject_is_conversion_error() {
        let wire = Node {
            node_type: "union",
            subject_id: None,
            subject_set: None,
            children: vec![],
        };
        let err = normalize(&wire).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn test_depth_ceiling() {
        let mut wire = Node::id("leaf", "alice", vec![]);
        for _ in 0..MAX_TREE_DEPTH {
            wire = Node::set("union", viewers(), vec![wire]);
        }
        let tree = normalize(&wire).unwrap();
        assert_eq!(tree.depth(), MAX_TREE_DEPTH);

        let too_deep = Node::set("union", viewers(), vec![wire]);
        let err = normalize(&too_deep).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    fn arb_subject() -> impl Strategy<Value = (Option<String>, Option<SubjectSet>)> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(|id| (Some(id), None)),
            ("[a-z]{1,8}", "[a-z0-9]{1,8}", "[a-z]{1,8}")
                .prop_map(|(n, o, r)| (None, Some(SubjectSet::new(n, o, r)))),
        ]
    }

    fn arb_wire_tree() -> impl Strategy<Value = Node> {
        let node_types = prop_oneof![
            Just("union"),
            Just("exclusion"),
            Just("intersection"),
            Just("leaf"),
            Just("not"),
        ];
        let leaf = (node_types.clone(), arb_subject()).prop_map(|(node_type, (id, set))| Node {
            node_type,
            subject_id: id,
            subject_set: set,
            children: vec![],
        });
        leaf.prop_recursive(4, 32, 4, move |inner| {
            (
                node_types.clone(),
                arb_subject(),
                proptest::collection::vec(inner, 0..4),
            )
                .prop_map(|(node_type, (id, set), children)| Node {
                    node_type,
                    subject_id: id,
                    subject_set: set,
                    children,
                })
        })
    }

    fn assert_matches_wire(tree: &ExpandTree, wire: &Node) {
        assert_eq!(tree.node_type().as_str(), wire.node_type);
        match (&wire.subject_set, &wire.subject_id) {
            (Some(set), _) => assert_eq!(tree.subject(), &SubjectRef::Set(set.clone())),
            (None, Some(id)) => assert_eq!(tree.subject(), &SubjectRef::Id(id.clone())),
            (None, None) => unreachable!("generator always sets a subject"),
        }
        if tree.node_type().is_leaf() {
            assert!(tree.children().is_empty());
        } else {
            assert_eq!(tree.children().len(), wire.children.len());
            for (child, wire_child) in tree.children().iter().zip(&wire.children) {
                assert_matches_wire(child, wire_child);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_normalized_tree_matches_wire(wire in arb_wire_tree()) {
            let tree = normalize(&wire).unwrap();
            assert_matches_wire(&tree, &wire);
        }

        #[test]
        fn prop_normalize_is_deterministic(wire in arb_wire_tree()) {
            prop_assert_eq!(normalize(&wire).unwrap(), normalize(&wire).unwrap());
        }
    }
}
