// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Parameters, results and errors of the Send/Recv trace generator.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fmt, io};

use astra_et::EtError;
use astra_et::protos::{AttributeProto, Node, NodeType, attr_names};

/// Name of the communication pattern. Used for the output folder, the trace
/// file names and the node names.
pub const PATTERN_NAME: &str = "send_recv";

pub const BYTES_PER_MB: i64 = 1024 * 1024;

#[derive(Debug)]
pub enum SendRecvError {
    JobTooSmall { npus_count: i32 },
    SameRank { rank: i32 },
    RankOutOfRange { src: i32, dst: i32, npus_count: i32 },
    NonPositiveSize { msg_size: i64 },
    SizeOverflow { msg_size: i64 },
    Io(io::Error),
    Et(EtError),
}

impl fmt::Display for SendRecvError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SendRecvError::JobTooSmall { npus_count } => {
                write!(f, "npus_count must be >= 2 (got {npus_count})")
            }
            SendRecvError::SameRank { rank } => {
                write!(f, "src and dst must be different (both are {rank})")
            }
            SendRecvError::RankOutOfRange {
                src,
                dst,
                npus_count,
            } => write!(
                f,
                "src/dst must be within [0, {npus_count}) (got src {src}, dst {dst})"
            ),
            SendRecvError::NonPositiveSize { msg_size } => {
                write!(f, "msg_size must be > 0 (in MB), got {msg_size}")
            }
            SendRecvError::SizeOverflow { msg_size } => {
                write!(f, "msg_size of {msg_size}MB does not fit in a 64-bit byte count")
            }
            SendRecvError::Io(e) => write!(f, "I/O error: {e}"),
            SendRecvError::Et(e) => write!(f, "{e}"),
        }
    }
}

impl Error for SendRecvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SendRecvError::Io(e) => Some(e),
            SendRecvError::Et(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for SendRecvError {
    fn from(e: io::Error) -> Self {
        SendRecvError::Io(e)
    }
}

impl From<EtError> for SendRecvError {
    fn from(e: EtError) -> Self {
        SendRecvError::Et(e)
    }
}

pub type SendRecvResult = Result<(), SendRecvError>;

/// A job of `npus_count` NPUs in which `src` sends `msg_size` MB to `dst`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRecvConfig {
    pub npus_count: i32,
    /// Message size in MB.
    pub msg_size: i64,
    pub src: i32,
    pub dst: i32,
    /// Matches the Send against the Recv.
    pub tag: i32,
}

impl SendRecvConfig {
    /// A job where NPU 0 sends to NPU 1 using tag 0.
    #[must_use]
    pub fn new(npus_count: i32, msg_size: i64) -> Self {
        Self {
            npus_count,
            msg_size,
            src: 0,
            dst: 1,
            tag: 0,
        }
    }

    #[must_use]
    pub fn with_src(mut self, src: i32) -> Self {
        self.src = src;
        self
    }

    #[must_use]
    pub fn with_dst(mut self, dst: i32) -> Self {
        self.dst = dst;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: i32) -> Self {
        self.tag = tag;
        self
    }

    /// Check every constraint on the job. Nothing is written by the generator
    /// unless this passes.
    pub fn validate(&self) -> SendRecvResult {
        if self.npus_count < 2 {
            return Err(SendRecvError::JobTooSmall {
                npus_count: self.npus_count,
            });
        }
        if self.src == self.dst {
            return Err(SendRecvError::SameRank { rank: self.src });
        }
        let ranks = 0..self.npus_count;
        if !ranks.contains(&self.src) || !ranks.contains(&self.dst) {
            return Err(SendRecvError::RankOutOfRange {
                src: self.src,
                dst: self.dst,
                npus_count: self.npus_count,
            });
        }
        if self.msg_size <= 0 {
            return Err(SendRecvError::NonPositiveSize {
                msg_size: self.msg_size,
            });
        }
        self.msg_size_bytes()?;
        Ok(())
    }

    pub fn msg_size_bytes(&self) -> Result<i64, SendRecvError> {
        self.msg_size
            .checked_mul(BYTES_PER_MB)
            .ok_or(SendRecvError::SizeOverflow {
                msg_size: self.msg_size,
            })
    }

    /// `<output_root>/send_recv/<npus_count>npus_<msg_size>MB`
    #[must_use]
    pub fn output_dir(&self, output_root: &Path) -> PathBuf {
        output_root
            .join(PATTERN_NAME)
            .join(format!("{}npus_{}MB", self.npus_count, self.msg_size))
    }

    #[must_use]
    pub fn node_name(&self) -> String {
        format!(
            "{PATTERN_NAME}_{}npus_{}MB",
            self.npus_count, self.msg_size
        )
    }

    /// The node an NPU executes, or `None` for NPUs that take no part.
    #[must_use]
    pub fn node_type_for(&self, npu: i32) -> Option<NodeType> {
        if npu == self.src {
            Some(NodeType::CommSendNode)
        } else if npu == self.dst {
            Some(NodeType::CommRecvNode)
        } else {
            None
        }
    }

    #[must_use]
    pub fn build_node(&self, id: u64, node_type: NodeType, size_bytes: i64) -> Node {
        let mut node = Node {
            id,
            name: self.node_name(),
            attr: vec![
                AttributeProto::bool(attr_names::IS_CPU_OP, false),
                AttributeProto::int32(attr_names::COMM_SRC, self.src),
                AttributeProto::int32(attr_names::COMM_DST, self.dst),
                AttributeProto::int64(attr_names::COMM_SIZE, size_bytes),
                AttributeProto::int32(attr_names::COMM_TAG, self.tag),
            ],
            ..Default::default()
        };
        node.set_type(node_type);
        node
    }
}

#[must_use]
pub fn trace_file_name(npu: i32) -> String {
    format!("{PATTERN_NAME}.{npu}.et")
}

/// What a generator run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendRecvSummary {
    pub output_dir: PathBuf,
    /// One path per NPU, in NPU order.
    pub trace_files: Vec<PathBuf>,
    pub num_nodes: u64,
}
