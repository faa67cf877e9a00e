/// Builds the gRPC client and server code for the `emojivoto.proto`
/// definition using `tonic-prost-build`.
///
/// Both the voting and emoji services are generated from a single proto file,
/// so every binary in the workspace shares one wire contract. A file
/// descriptor set is emitted alongside the bindings for gRPC reflection.
///
/// # Files and Paths
///
/// - Proto file: `proto/emojivoto.proto`
/// - Includes: `proto/`
///
/// # Panics
///
/// Panics if `OUT_DIR` is unset or code generation fails; both abort the
/// build.
///
/// # Output
///
/// ```rust,ignore
/// pub mod proto {
///     tonic::include_proto!("emojivoto.v1");
/// }
/// ```
use std::env;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let descriptor_path = out_dir.join("emojivoto_descriptor.bin");

    let mut config = tonic_prost_build::Config::new();
    config.file_descriptor_set_path(&descriptor_path);

    tonic_prost_build::configure()
        .compile_with_config(config, &["proto/emojivoto.proto"], &["proto"])
        .unwrap();
}
