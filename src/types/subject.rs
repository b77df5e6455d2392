//! Subjects: atomic subject IDs or subject sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A set of subjects defined by a relation on an object.
///
/// Written `namespace:object#relation`, e.g. `documents:doc1#viewers` is
/// every subject that is a viewer of `doc1` in the `documents` namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectSet {
    /// Namespace of the object.
    pub namespace: String,
    /// Object identifier.
    pub object: String,
    /// Relation on the object.
    pub relation: String,
}

impl SubjectSet {
    /// Creates a subject set.
    pub fn new(
        namespace: impl Into<String>,
        object: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            object: object.into(),
            relation: relation.into(),
        }
    }
}

impl fmt::Display for SubjectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}#{}", self.namespace, self.object, self.relation)
    }
}

/// The subject a node of an expand tree stands for.
///
/// Which variant applies is decided by which field the server sent, never by
/// looking at the content of an ID.
///
/// Serializes in the server's JSON shape, as either
/// `{"subject_id": "alice"}` or
/// `{"subject_set": {"namespace": "...", "object": "...", "relation": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectRef {
    /// An atomic subject.
    #[serde(rename = "subject_id")]
    Id(String),
    /// A subject defined by another relation.
    #[serde(rename = "subject_set")]
    Set(SubjectSet),
}

impl SubjectRef {
    /// Creates an atomic subject.
    pub fn id(id: impl Into<String>) -> Self {
        SubjectRef::Id(id.into())
    }

    /// Creates a subject set.
    pub fn set(
        namespace: impl Into<String>,
        object: impl Into<String>,
        relation: impl Into<String>,
    ) -> Self {
        SubjectRef::Set(SubjectSet::new(namespace, object, relation))
    }

    /// Returns the subject ID, if this is an atomic subject.
    pub fn as_id(&self) -> Option<&str> {
        match self {
            SubjectRef::Id(id) => Some(id),
            SubjectRef::Set(_) => None,
        }
    }

    /// Returns the subject set, if this is one.
    pub fn as_set(&self) -> Option<&SubjectSet> {
        match self {
            SubjectRef::Id(_) => None,
            SubjectRef::Set(set) => Some(set),
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectRef::Id(id) => f.write_str(id),
            SubjectRef::Set(set) => set.fmt(f),
        }
    }
}

impl From<SubjectSet> for SubjectRef {
    fn from(set: SubjectSet) -> Self {
        SubjectRef::Set(set)
    }
}
