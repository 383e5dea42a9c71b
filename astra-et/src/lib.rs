// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Chakra execution trace (ET) records and stream access functions.
//!
//! An ET file is a sequence of protobuf records, each prefixed by its length
//! encoded as a base-128 varint. The first record is always a
//! [GlobalMetadata](protos::GlobalMetadata) header and the remaining records
//! are [Nodes](protos::Node).
//!
//! ```
//! use astra_et::protos::{ET_SCHEMA_VERSION, GlobalMetadata, Node, NodeType};
//! use astra_et::reader::EtTrace;
//! use astra_et::writer::EtWriter;
//!
//! let mut writer = EtWriter::new(Vec::new());
//! writer.write_metadata(&GlobalMetadata::with_version(ET_SCHEMA_VERSION)).unwrap();
//! let mut node = Node::default();
//! node.set_type(NodeType::CommSendNode);
//! writer.write_node(&node).unwrap();
//!
//! let bytes = writer.finish().unwrap();
//! let trace = EtTrace::decode(&bytes).unwrap();
//! assert_eq!(trace.nodes.len(), 1);
//! ```

use std::error::Error;
use std::{fmt, io};

pub mod protos;
pub mod reader;
pub mod writer;

pub use reader::read_trace;

/// Errors from reading or writing ET streams.
#[derive(Debug)]
pub enum EtError {
    Io(io::Error),
    Encode(prost::EncodeError),
    Decode(prost::DecodeError),
    /// The stream did not start with a metadata record.
    MissingMetadata,
}

impl fmt::Display for EtError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EtError::Io(e) => write!(f, "ET I/O error: {e}"),
            EtError::Encode(e) => write!(f, "Failed to encode ET record: {e}"),
            EtError::Decode(e) => write!(f, "Failed to decode ET record: {e}"),
            EtError::MissingMetadata => {
                write!(f, "ET stream must start with a metadata record")
            }
        }
    }
}

impl Error for EtError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EtError::Io(e) => Some(e),
            EtError::Encode(e) => Some(e),
            EtError::Decode(e) => Some(e),
            EtError::MissingMetadata => None,
        }
    }
}

impl From<io::Error> for EtError {
    fn from(e: io::Error) -> Self {
        EtError::Io(e)
    }
}

impl From<prost::EncodeError> for EtError {
    fn from(e: prost::EncodeError) -> Self {
        EtError::Encode(e)
    }
}

impl From<prost::DecodeError> for EtError {
    fn from(e: prost::DecodeError) -> Self {
        EtError::Decode(e)
    }
}
