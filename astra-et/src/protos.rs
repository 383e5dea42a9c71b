// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Chakra execution trace schema (`ChakraProtoMsg`, version 0.0.4).
//!
//! The messages mirror the field numbers of the Chakra `et_def.proto` schema
//! so that files written here can be consumed by any Chakra reader. Only the
//! scalar variants of the attribute value are modelled; the list variants
//! (even field numbers 4 to 32) are never produced by the generators.

/// Schema version written into every [GlobalMetadata] record.
pub const ET_SCHEMA_VERSION: &str = "0.0.4";

/// Attribute names understood by the trace-driven simulator.
pub mod attr_names {
    pub const IS_CPU_OP: &str = "is_cpu_op";
    pub const COMM_SRC: &str = "comm_src";
    pub const COMM_DST: &str = "comm_dst";
    pub const COMM_SIZE: &str = "comm_size";
    pub const COMM_TAG: &str = "comm_tag";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum NodeType {
    InvalidNode = 0,
    MetadataNode = 1,
    MemLoadNode = 2,
    MemStoreNode = 3,
    CompNode = 4,
    CommSendNode = 5,
    CommRecvNode = 6,
    CommCollNode = 7,
}

impl NodeType {
    /// The name of the value as it appears in the schema.
    #[must_use]
    pub fn as_str_name(&self) -> &'static str {
        match self {
            NodeType::InvalidNode => "INVALID_NODE",
            NodeType::MetadataNode => "METADATA_NODE",
            NodeType::MemLoadNode => "MEM_LOAD_NODE",
            NodeType::MemStoreNode => "MEM_STORE_NODE",
            NodeType::CompNode => "COMP_NODE",
            NodeType::CommSendNode => "COMM_SEND_NODE",
            NodeType::CommRecvNode => "COMM_RECV_NODE",
            NodeType::CommCollNode => "COMM_COLL_NODE",
        }
    }
}

/// A named, typed value attached to a [Node] or [GlobalMetadata].
#[derive(Clone, PartialEq, prost::Message)]
pub struct AttributeProto {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub doc_string: String,
    #[prost(
        oneof = "attribute_proto::Value",
        tags = "3, 5, 7, 9, 11, 13, 15, 17, 19, 21, 23, 25, 27, 29, 31"
    )]
    pub value: Option<attribute_proto::Value>,
}

pub mod attribute_proto {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Value {
        #[prost(double, tag = "3")]
        DoubleVal(f64),
        #[prost(float, tag = "5")]
        FloatVal(f32),
        #[prost(int32, tag = "7")]
        Int32Val(i32),
        #[prost(int64, tag = "9")]
        Int64Val(i64),
        #[prost(uint32, tag = "11")]
        Uint32Val(u32),
        #[prost(uint64, tag = "13")]
        Uint64Val(u64),
        #[prost(sint32, tag = "15")]
        Sint32Val(i32),
        #[prost(sint64, tag = "17")]
        Sint64Val(i64),
        #[prost(fixed32, tag = "19")]
        Fixed32Val(u32),
        #[prost(fixed64, tag = "21")]
        Fixed64Val(u64),
        #[prost(sfixed32, tag = "23")]
        Sfixed32Val(i32),
        #[prost(sfixed64, tag = "25")]
        Sfixed64Val(i64),
        #[prost(bool, tag = "27")]
        BoolVal(bool),
        #[prost(string, tag = "29")]
        StringVal(String),
        #[prost(bytes = "vec", tag = "31")]
        BytesVal(Vec<u8>),
    }
}

use attribute_proto::Value;

impl AttributeProto {
    fn with_value(name: &str, value: Value) -> Self {
        Self {
            name: name.to_string(),
            doc_string: String::new(),
            value: Some(value),
        }
    }

    #[must_use]
    pub fn bool(name: &str, value: bool) -> Self {
        Self::with_value(name, Value::BoolVal(value))
    }

    #[must_use]
    pub fn int32(name: &str, value: i32) -> Self {
        Self::with_value(name, Value::Int32Val(value))
    }

    #[must_use]
    pub fn int64(name: &str, value: i64) -> Self {
        Self::with_value(name, Value::Int64Val(value))
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct IoInfo {
    #[prost(string, tag = "1")]
    pub values: String,
    #[prost(string, tag = "2")]
    pub shapes: String,
    #[prost(string, tag = "3")]
    pub types: String,
}

/// The header record that starts every trace file.
#[derive(Clone, PartialEq, prost::Message)]
pub struct GlobalMetadata {
    #[prost(string, tag = "1")]
    pub version: String,
    #[prost(message, repeated, tag = "2")]
    pub attr: Vec<AttributeProto>,
}

impl GlobalMetadata {
    #[must_use]
    pub fn with_version(version: &str) -> Self {
        Self {
            version: version.to_string(),
            attr: Vec::new(),
        }
    }
}

/// A single operation in the execution trace of one NPU.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Node {
    #[prost(uint64, tag = "1")]
    pub id: u64,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(enumeration = "NodeType", tag = "3")]
    pub r#type: i32,
    #[prost(uint64, repeated, tag = "4")]
    pub ctrl_deps: Vec<u64>,
    #[prost(uint64, repeated, tag = "5")]
    pub data_deps: Vec<u64>,
    #[prost(uint64, tag = "6")]
    pub start_time_micros: u64,
    #[prost(uint64, tag = "7")]
    pub duration_micros: u64,
    #[prost(message, optional, tag = "8")]
    pub inputs: Option<IoInfo>,
    #[prost(message, optional, tag = "9")]
    pub outputs: Option<IoInfo>,
    #[prost(message, repeated, tag = "10")]
    pub attr: Vec<AttributeProto>,
}

impl Node {
    /// Look up the first attribute with the given name.
    #[must_use]
    pub fn find_attr(&self, name: &str) -> Option<&AttributeProto> {
        self.attr.iter().find(|a| a.name == name)
    }
}
