//! Raw voxel dumps for external volume viewers.
//!
//! Values are written as little-endian `f32` in logical (row-major) order,
//! whatever the memory layout of the source array.

use crate::FieldResult;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use ndarray::{Array, Dimension};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

/// Returns the number of bytes written.
pub fn write_f32_le<W: Write, D: Dimension>(
    array: &Array<f32, D>,
    writer: &mut W,
) -> FieldResult<u64> {
    for &value in array.iter() {
        writer.write_f32::<LittleEndian>(value)?;
    }

    Ok(array.len() as u64 * 4)
}

pub fn save_f32_le<D: Dimension>(array: &Array<f32, D>, path: impl AsRef<Path>) -> FieldResult<u64> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let written = write_f32_le(array, &mut writer)?;
    writer.flush()?;

    log::debug!("wrote {written} bytes to {}", path.as_ref().display());
    Ok(written)
}

pub fn read_f32_le<R: Read>(reader: &mut R, len: usize) -> FieldResult<Vec<f32>> {
    let mut values = vec![0.0; len];
    reader.read_f32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}
