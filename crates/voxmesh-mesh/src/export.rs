//! Mesh writers.

use std::io::Write;

use voxmesh_core::{Error, Result};

use crate::buffer::MeshBuffer;

/// Size of the binary STL header.
pub const STL_HEADER_LEN: usize = 80;

/// Bytes per binary STL facet record.
pub const STL_FACET_LEN: usize = 50;

/// Dump the buffer as consecutive little-endian `f32`s.
pub fn write_raw<W: Write>(mesh: &MeshBuffer, mut w: W) -> Result<()> {
    for value in mesh.as_slice() {
        w.write_all(&value.to_le_bytes())?;
    }
    w.flush()?;
    Ok(())
}

/// Write a binary STL.
///
/// `header_text` fills the 80-byte header (truncated, zero padded). Each facet
/// normal is the unit winding normal, or zero for degenerate triangles.
pub fn write_stl<W: Write>(mesh: &MeshBuffer, mut w: W, header_text: Option<&str>) -> Result<()> {
    let mut header = [0u8; STL_HEADER_LEN];
    if let Some(text) = header_text {
        let bytes = text.as_bytes();
        let n = bytes.len().min(STL_HEADER_LEN);
        header[..n].copy_from_slice(&bytes[..n]);
    }
    w.write_all(&header)?;

    let count = u32::try_from(mesh.triangle_count()).map_err(|_| {
        Error::InvalidBuffer { len: mesh.len() }
    })?;
    w.write_all(&count.to_le_bytes())?;

    for triangle in mesh.triangles() {
        let normal = triangle.unit_normal();
        for v in [normal, triangle.v0, triangle.v1, triangle.v2] {
            for c in v.to_array() {
                w.write_all(&c.to_le_bytes())?;
            }
        }
        // attribute byte count
        w.write_all(&0u16.to_le_bytes())?;
    }

    w.flush()?;
    Ok(())
}
