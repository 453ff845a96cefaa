//! Binary persistence of shape slots
//!
//! Each slot is stored in its own file as a raw array of [`SHAPE_CAPACITY`]
//! vertex records with no header. A record is 24 bytes:
//!
//! | bytes  | content                              |
//! |--------|--------------------------------------|
//! | 0      | validity flag (0 = tombstone)        |
//! | 1..8   | zero padding                         |
//! | 8..16  | x, `f64` little-endian               |
//! | 16..24 | y, `f64` little-endian               |
//!
//! The format is positional: changing the capacity invalidates existing files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::defaults::{SHAPE_CAPACITY, SHAPE_FILE_SIZE, VERTEX_RECORD_SIZE};
use crate::errors::EditError;
use crate::log::{debug, warn};
use crate::shape::{Shape, Vertex, VertexArray};
use crate::types::pt;

/// Encode all vertex slots of `shape`, tombstones included.
pub fn encode_shape(shape: &Shape) -> [u8; SHAPE_FILE_SIZE] {
    let mut buf = [0u8; SHAPE_FILE_SIZE];
    for (record, vertex) in buf.chunks_exact_mut(VERTEX_RECORD_SIZE).zip(shape.vertices()) {
        record[0] = u8::from(vertex.valid);
        record[8..16].copy_from_slice(&vertex.point.x.to_le_bytes());
        record[16..24].copy_from_slice(&vertex.point.y.to_le_bytes());
    }
    buf
}

/// Decode a shape file image. Fails unless `bytes` is exactly one shape long.
pub fn decode_vertices(bytes: &[u8], path: &Path) -> Result<VertexArray, EditError> {
    if bytes.len() != SHAPE_FILE_SIZE {
        return Err(EditError::CorruptShapeFile {
            path: path.to_path_buf(),
            reason: format!("expected {} bytes, found {}", SHAPE_FILE_SIZE, bytes.len()),
        });
    }

    let mut vertices = [Vertex::EMPTY; SHAPE_CAPACITY];
    for (i, (record, vertex)) in bytes
        .chunks_exact(VERTEX_RECORD_SIZE)
        .zip(vertices.iter_mut())
        .enumerate()
    {
        let x = f64::from_le_bytes(field(record, 8));
        let y = f64::from_le_bytes(field(record, 16));
        let valid = record[0] != 0;
        if valid && !(x.is_finite() && y.is_finite()) {
            return Err(EditError::CorruptShapeFile {
                path: path.to_path_buf(),
                reason: format!("vertex {} has a non-finite coordinate", i),
            });
        }
        *vertex = Vertex {
            valid,
            point: pt(x, y),
        };
    }
    Ok(vertices)
}

fn field(record: &[u8], offset: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&record[offset..offset + 8]);
    out
}

/// Result of loading a slot
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    /// The file was read; holds the vertex array it contained
    Loaded(VertexArray),
    /// No file for this slot; the in-memory shape should be left alone
    Missing(PathBuf),
}

/// Directory of per-slot shape files
#[derive(Clone, Debug)]
pub struct SlotStorage {
    dir: PathBuf,
}

impl SlotStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SlotStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `slot`: `shape_NN.bin` with a two-digit slot number.
    pub fn path_for(&self, slot: usize) -> PathBuf {
        self.dir.join(format!("shape_{:02}.bin", slot))
    }

    /// Write `shape` to the file for `slot`, replacing any previous content.
    pub fn save(&self, slot: usize, shape: &Shape) -> Result<PathBuf, EditError> {
        let path = self.path_for(slot);
        std::fs::write(&path, encode_shape(shape)).map_err(|source| {
            EditError::PersistenceUnavailable {
                path: path.clone(),
                source,
            }
        })?;
        debug!(slot, path = %path.display(), "saved shape");
        Ok(path)
    }

    /// Read the file for `slot`. A missing file is reported, not failed.
    pub fn load(&self, slot: usize) -> Result<LoadOutcome, EditError> {
        let path = self.path_for(slot);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(slot, path = %path.display(), "no shape file for slot");
                return Ok(LoadOutcome::Missing(path));
            }
            Err(source) => return Err(EditError::PersistenceUnavailable { path, source }),
        };
        let vertices = decode_vertices(&bytes, &path)?;
        debug!(slot, path = %path.display(), "loaded shape");
        Ok(LoadOutcome::Loaded(vertices))
    }
}
