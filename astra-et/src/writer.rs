// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Write length-delimited ET records to any [Write] implementation.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;

use crate::EtError;
use crate::protos::{GlobalMetadata, Node};

pub struct EtWriter<W: Write> {
    writer: W,
    buf: Vec<u8>,
    metadata_written: bool,
}

impl EtWriter<BufWriter<fs::File>> {
    /// Create (or truncate) the file at `path` and wrap it in a buffered
    /// writer.
    pub fn create(path: &Path) -> Result<Self, EtError> {
        Ok(Self::new(BufWriter::new(fs::File::create(path)?)))
    }
}

impl<W: Write> EtWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::new(),
            metadata_written: false,
        }
    }

    pub fn write_metadata(&mut self, metadata: &GlobalMetadata) -> Result<(), EtError> {
        self.write_record(metadata)?;
        self.metadata_written = true;
        Ok(())
    }

    /// Append a node record. The metadata header must already have been
    /// written.
    pub fn write_node(&mut self, node: &Node) -> Result<(), EtError> {
        if !self.metadata_written {
            return Err(EtError::MissingMetadata);
        }
        self.write_record(node)
    }

    fn write_record(&mut self, record: &impl Message) -> Result<(), EtError> {
        self.buf.clear();
        record.encode_length_delimited(&mut self.buf)?;
        self.writer.write_all(&self.buf)?;
        Ok(())
    }

    /// Flush any buffered records and return the underlying writer.
    pub fn finish(mut self) -> Result<W, EtError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
