// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Decode complete ET files back into their records.

use std::fs;
use std::path::Path;

use prost::Message;

use crate::EtError;
use crate::protos::{GlobalMetadata, Node};

/// All records held in one ET file.
#[derive(Clone, Debug, PartialEq)]
pub struct EtTrace {
    pub metadata: GlobalMetadata,
    pub nodes: Vec<Node>,
}

impl EtTrace {
    /// Decode a whole ET stream held in memory.
    ///
    /// The first record is decoded as the metadata header and every following
    /// record as a node. A truncated record is reported as a decode error.
    pub fn decode(bytes: &[u8]) -> Result<Self, EtError> {
        let mut buf = bytes;
        if buf.is_empty() {
            return Err(EtError::MissingMetadata);
        }

        let metadata = GlobalMetadata::decode_length_delimited(&mut buf)?;
        let mut nodes = Vec::new();
        while !buf.is_empty() {
            nodes.push(Node::decode_length_delimited(&mut buf)?);
        }

        Ok(Self { metadata, nodes })
    }
}

pub fn read_trace(path: &Path) -> Result<EtTrace, EtError> {
    let bytes = fs::read(path)?;
    EtTrace::decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protos::{AttributeProto, ET_SCHEMA_VERSION, NodeType, attr_names};
    use crate::writer::EtWriter;

    fn header_only() -> Vec<u8> {
        let mut writer = EtWriter::new(Vec::new());
        writer
            .write_metadata(&GlobalMetadata::with_version(ET_SCHEMA_VERSION))
            .unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn empty_stream() {
        let result = EtTrace::decode(&[]);
        assert!(matches!(result, Err(EtError::MissingMetadata)));
    }

    #[test]
    fn header_without_nodes() {
        let trace = EtTrace::decode(&header_only()).unwrap();
        assert_eq!(trace.metadata.version, ET_SCHEMA_VERSION);
        assert!(trace.nodes.is_empty());
    }

    #[test]
    fn header_and_node() {
        let mut node = Node {
            id: 7,
            name: "recv".to_string(),
            attr: vec![AttributeProto::int64(attr_names::COMM_SIZE, 4 << 20)],
            ..Default::default()
        };
        node.set_type(NodeType::CommRecvNode);

        let mut bytes = header_only();
        bytes.extend(node.encode_length_delimited_to_vec());

        let trace = EtTrace::decode(&bytes).unwrap();
        assert_eq!(trace.metadata.version, ET_SCHEMA_VERSION);
        assert_eq!(trace.nodes, vec![node]);
    }

    #[test]
    #[should_panic(expected = "Failed to decode ET record")]
    fn truncated_node() {
        let mut bytes = header_only();
        bytes.extend_from_slice(&[0x10, 0x08, 0x01]);
        EtTrace::decode(&bytes).map_err(|e| e.to_string()).unwrap();
    }
}
