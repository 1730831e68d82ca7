//! Output artifact produced by the upstream document pipeline.

use std::io::{Cursor, Read};

/// A finished document produced by the generation pipeline.
///
/// The action only reads the artifact: it never inspects document structure
/// and never mutates the source. The compressed flag decides the extension of
/// the primary attachment (`zip` when set, `pdf` otherwise).
pub trait OutputArtifact {
    /// Open a fresh reader over the artifact's bytes.
    fn reader(&self) -> std::io::Result<Box<dyn Read + Send + '_>>;

    /// Whether the content is a zipped archive rather than a raw document.
    fn is_compressed(&self) -> bool;
}

/// Artifact backed by an in-memory byte buffer.
#[derive(Debug, Clone)]
pub struct MemoryArtifact {
    data: Vec<u8>,
    compressed: bool,
}

impl MemoryArtifact {
    /// Wrap raw document bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            compressed: false,
        }
    }

    /// Mark the content as a zipped archive.
    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    /// Size of the buffered content in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl OutputArtifact for MemoryArtifact {
    fn reader(&self) -> std::io::Result<Box<dyn Read + Send + '_>> {
        Ok(Box::new(Cursor::new(&self.data)))
    }

    fn is_compressed(&self) -> bool {
        self.compressed
    }
}
