// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Generate point-to-point Send/Recv ET files in the current directory.
//!
//! For example, run using:
//!   cargo run --bin send-recv -- --npus-count 8 --msg-size 16 --src 3 --dst 5
//!
//! See `lib.rs` for details of the files written.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use astra_send_recv::config::Options;
use astra_send_recv::generate_send_recv;
use clap::Parser;
use log::{LevelFilter, info};

const OUTPUT_ROOT: &str = "./";

/// Configure the logger level and formatting string.
fn setup_logger(level: LevelFilter) {
    env_logger::builder()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    let options = Options::resolve(Options::parse())?;
    setup_logger(options.log_level()?);

    let config = options.send_recv_config()?;
    let summary = generate_send_recv(&config, Path::new(OUTPUT_ROOT))?;

    info!(
        "Wrote {} nodes across {} files in {}",
        summary.num_nodes,
        summary.trace_files.len(),
        summary.output_dir.display()
    );
    Ok(())
}
