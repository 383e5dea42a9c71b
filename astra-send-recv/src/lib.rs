// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Generate point-to-point Send/Recv execution traces.
//!
//! One Chakra ET file is written for every NPU in the job. Every file starts
//! with a metadata header; only the source and destination NPUs additionally
//! get a node (a `COMM_SEND_NODE` and a `COMM_RECV_NODE` respectively). All
//! other NPUs are left idle.
//!
//! The files are written to
//! `<output_root>/send_recv/<npus_count>npus_<msg_size>MB/send_recv.<npu>.et`.

use std::fs;
use std::path::Path;

use astra_et::protos::{ET_SCHEMA_VERSION, GlobalMetadata};
use astra_et::writer::EtWriter;
use log::{debug, info};

pub mod config;
pub mod types;
use types::{SendRecvConfig, SendRecvError, SendRecvSummary, trace_file_name};

/// Write the Send/Recv traces for the job described by `config`.
///
/// The configuration is validated before anything is created on disk. Any
/// existing trace files in the output directory are overwritten, but no other
/// files are removed. An I/O error aborts the run leaving any files already
/// written in place.
pub fn generate_send_recv(
    config: &SendRecvConfig,
    output_root: &Path,
) -> Result<SendRecvSummary, SendRecvError> {
    config.validate()?;
    let size_bytes = config.msg_size_bytes()?;

    let output_dir = config.output_dir(output_root);
    fs::create_dir_all(&output_dir)?;
    info!(
        "Writing {} traces to {} (npu{} -> npu{}, {} bytes, tag {})",
        config.npus_count,
        output_dir.display(),
        config.src,
        config.dst,
        size_bytes,
        config.tag
    );

    let metadata = GlobalMetadata::with_version(ET_SCHEMA_VERSION);

    // Counts the nodes emitted so far, so ids follow NPU order rather than
    // src/dst order.
    let mut node_id = 0;
    let mut trace_files = Vec::new();

    for npu in 0..config.npus_count {
        let trace_file = output_dir.join(trace_file_name(npu));
        let mut writer = EtWriter::create(&trace_file)?;
        writer.write_metadata(&metadata)?;

        match config.node_type_for(npu) {
            Some(node_type) => {
                let node = config.build_node(node_id, node_type, size_bytes);
                writer.write_node(&node)?;
                debug!(
                    "{}: node {} {}",
                    trace_file.display(),
                    node_id,
                    node_type.as_str_name()
                );
                node_id += 1;
            }
            None => debug!("{}: idle", trace_file.display()),
        }

        writer.finish()?;
        trace_files.push(trace_file);
    }

    Ok(SendRecvSummary {
        output_dir,
        trace_files,
        num_nodes: node_id,
    })
}
