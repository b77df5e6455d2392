//! Protobuf bindings for `ory.keto.relation_tuples.v1alpha2`.
//!
//! Generated by `tonic-prost-build` from the files under `proto/` and
//! committed so builds do not need `protoc`.

#![allow(missing_docs, clippy::all, clippy::pedantic)]

include!("ory.keto.relation_tuples.v1alpha2.rs");
