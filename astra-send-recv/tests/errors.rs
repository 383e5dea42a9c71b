// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::path::Path;

use astra_send_recv::generate_send_recv;
use astra_send_recv::types::SendRecvConfig;
use tempfile::{TempDir, tempdir};

fn generate_in_tmp(config: &SendRecvConfig) -> TempDir {
    let tmp_dir = tempdir().expect("test should be able to create a tempdir");
    let result = generate_send_recv(config, tmp_dir.path());

    // Nothing may be created when validation fails.
    if result.is_err() {
        assert!(!tmp_dir.path().join("send_recv").exists());
    }
    result.map_err(|e| e.to_string()).unwrap();
    tmp_dir
}

#[test]
#[should_panic(expected = "npus_count must be >= 2")]
fn single_npu() {
    generate_in_tmp(&SendRecvConfig::new(1, 1));
}

#[test]
#[should_panic(expected = "src and dst must be different")]
fn same_src_dst() {
    generate_in_tmp(&SendRecvConfig::new(4, 1).with_src(0).with_dst(0));
}

#[test]
#[should_panic(expected = "src/dst must be within [0, 4)")]
fn src_out_of_range() {
    generate_in_tmp(&SendRecvConfig::new(4, 1).with_src(5));
}

#[test]
#[should_panic(expected = "src/dst must be within [0, 4)")]
fn dst_out_of_range() {
    generate_in_tmp(&SendRecvConfig::new(4, 1).with_dst(4));
}

#[test]
#[should_panic(expected = "msg_size must be > 0 (in MB)")]
fn zero_size() {
    generate_in_tmp(&SendRecvConfig::new(4, 0));
}

#[test]
#[should_panic(expected = "does not fit in a 64-bit byte count")]
fn size_overflow() {
    generate_in_tmp(&SendRecvConfig::new(2, i64::MAX));
}

#[test]
#[should_panic(expected = "I/O error")]
fn output_root_is_a_file() {
    let tmp_dir = tempdir().expect("test should be able to create a tempdir");
    let root = tmp_dir.path().join("root");
    std::fs::write(&root, "not a directory").unwrap();

    generate_send_recv(&SendRecvConfig::new(2, 1), Path::new(&root))
        .map_err(|e| e.to_string())
        .unwrap();
}
