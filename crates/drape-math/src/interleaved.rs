//! Helpers for interleaved `[x0, y0, z0, x1, y1, z1, ...]` storage.

use glam::Vec3;

/// Reads the three floats starting at `offset` as a vector.
///
/// Panics if `offset + 3 > data.len()`; callers validate arena sizes
/// before entering per-node loops.
#[inline]
pub fn read_vec3(data: &[f32], offset: usize) -> Vec3 {
    Vec3::new(data[offset], data[offset + 1], data[offset + 2])
}

/// Writes `v` into the three floats starting at `offset`.
#[inline]
pub fn write_vec3(data: &mut [f32], offset: usize, v: Vec3) {
    data[offset] = v.x;
    data[offset + 1] = v.y;
    data[offset + 2] = v.z;
}

/// Adds `v` to the three floats starting at `offset`.
#[inline]
pub fn add_vec3(data: &mut [f32], offset: usize, v: Vec3) {
    data[offset] += v.x;
    data[offset + 1] += v.y;
    data[offset + 2] += v.z;
}

/// Reads the vector at `offset` if it lies entirely within `data`.
#[inline]
pub fn try_read_vec3(data: &[f32], offset: usize) -> Option<Vec3> {
    let end = offset.checked_add(3)?;
    let s = data.get(offset..end)?;
    Some(Vec3::new(s[0], s[1], s[2]))
}
