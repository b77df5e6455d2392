//! Build script for gRPC code generation.
//!
//! Proto code is pre-generated and committed to `src/transport/proto/`.
//! This build script only regenerates if the generated file is missing.

// Build scripts should panic on failure - that's how they signal build errors
#![allow(clippy::expect_used)]

fn main() {
    #[cfg(feature = "grpc")]
    {
        let proto_dir = "proto";
        let proto_files = [
            "proto/ory/keto/relation_tuples/v1alpha2/relation_tuples.proto",
            "proto/ory/keto/relation_tuples/v1alpha2/check_service.proto",
            "proto/ory/keto/relation_tuples/v1alpha2/expand_service.proto",
        ];
        let generated_file = "src/transport/proto/ory.keto.relation_tuples.v1alpha2.rs";

        // The generated file is committed; never rewrite src/ during cargo publish
        if std::path::Path::new(generated_file).exists() {
            println!("cargo:rerun-if-changed={generated_file}");
            return;
        }

        if let Some(missing) = proto_files.iter().find(|f| !std::path::Path::new(f).exists()) {
            println!("cargo:warning=Proto file not found at {missing}, skipping code generation");
            return;
        }

        for file in &proto_files {
            println!("cargo:rerun-if-changed={file}");
        }

        tonic_prost_build::configure()
            .build_server(true)
            .build_client(true)
            .out_dir("src/transport/proto")
            .compile_protos(&proto_files, &[proto_dir])
            .expect("Failed to compile proto files");
    }
}
