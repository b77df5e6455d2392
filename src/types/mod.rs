//! Core types of the Keto client.
//!
//! - [`SubjectRef`]: an atomic subject ID or a [`SubjectSet`]
//! - [`ExpandTree`]: the canonical subject-set resolution tree
//! - [`NodeType`]: the operator of an expand tree node

mod subject;
mod tree;

pub use subject::{SubjectRef, SubjectSet};
pub use tree::{ExpandTree, NodeType};
