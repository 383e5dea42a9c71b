// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

use std::fs;

use astra_et::protos::{AttributeProto, ET_SCHEMA_VERSION, GlobalMetadata, Node, NodeType};
use astra_et::read_trace;
use astra_et::writer::EtWriter;
use tempfile::tempdir;

fn coll_node() -> Node {
    let mut node = Node {
        id: 0,
        name: "all_reduce".to_string(),
        data_deps: vec![3, 4],
        attr: vec![
            AttributeProto::bool("is_cpu_op", false),
            AttributeProto::int64("comm_size", 1 << 20),
        ],
        ..Default::default()
    };
    node.set_type(NodeType::CommCollNode);
    node
}

#[test]
fn write_then_read_file() {
    let tmp_dir = tempdir().expect("test should be able to create a tempdir");
    let path = tmp_dir.path().join("trace.0.et");

    let mut writer = EtWriter::create(&path).unwrap();
    writer
        .write_metadata(&GlobalMetadata::with_version(ET_SCHEMA_VERSION))
        .unwrap();
    writer.write_node(&coll_node()).unwrap();
    writer.finish().unwrap();

    let trace = read_trace(&path).unwrap();
    assert_eq!(trace.metadata.version, "0.0.4");
    assert_eq!(trace.nodes, vec![coll_node()]);
}

#[test]
fn create_truncates_existing_file() {
    let tmp_dir = tempdir().expect("test should be able to create a tempdir");
    let path = tmp_dir.path().join("trace.0.et");
    fs::write(&path, vec![0xff; 64]).unwrap();

    let mut writer = EtWriter::create(&path).unwrap();
    writer
        .write_metadata(&GlobalMetadata::with_version(ET_SCHEMA_VERSION))
        .unwrap();
    writer.finish().unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"\x07\x0a\x050.0.4");
}

#[test]
#[should_panic(expected = "ET I/O error")]
fn missing_file() {
    let tmp_dir = tempdir().expect("test should be able to create a tempdir");
    read_trace(&tmp_dir.path().join("missing.et"))
        .map_err(|e| e.to_string())
        .unwrap();
}
