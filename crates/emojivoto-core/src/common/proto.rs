//! Generated gRPC bindings for `emojivoto.v1`.

#![allow(clippy::derive_partial_eq_without_eq)]

tonic::include_proto!("emojivoto.v1");

/// Encoded descriptor set for `tonic-reflection`.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("emojivoto_descriptor");
