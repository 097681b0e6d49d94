//! Integration tests for drape-mesh.

use drape_math::Vec3;
use drape_mesh::generators::{grid_indices, planar_grid, GridPlane};
use drape_mesh::MeshBuffers;
use drape_types::DrapeError;

// ─── MeshBuffers Tests ────────────────────────────────────────

#[test]
fn zeroed_counts() {
    let buffers = MeshBuffers::zeroed(4);
    assert_eq!(buffers.vertex_count(), 4);
    assert_eq!(buffers.positions.len(), 12);
    assert_eq!(buffers.normals.len(), 12);
}

#[test]
fn offset_access() {
    let mut buffers = MeshBuffers::zeroed(2);
    buffers.set_position_at(3, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(buffers.position(1), Vec3::new(1.0, 2.0, 3.0));
    buffers.translate_at(3, Vec3::ONE);
    assert_eq!(buffers.position_at(3), Vec3::new(2.0, 3.0, 4.0));
    buffers.set_normal_at(0, Vec3::Z);
    assert_eq!(buffers.normal(0), Vec3::Z);
}

#[test]
fn checked_access_reports_shortfall() {
    let buffers = MeshBuffers::zeroed(2);
    assert!(buffers.try_position_at(3).is_ok());
    match buffers.try_position_at(6) {
        Err(DrapeError::BufferSizeMismatch { buffer, required, actual }) => {
            assert_eq!(buffer, "position");
            assert_eq!(required, 9);
            assert_eq!(actual, 6);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(buffers.try_normal_at(6).is_err());
}

#[test]
fn ensure_len_checks_both_buffers() {
    let buffers = MeshBuffers {
        positions: vec![0.0; 12],
        normals: vec![0.0; 6],
    };
    assert!(buffers.ensure_len(6).is_ok());
    match buffers.ensure_len(12) {
        Err(DrapeError::BufferSizeMismatch { buffer, .. }) => assert_eq!(buffer, "normal"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn from_interleaved_rejects_partial_vertices() {
    assert!(MeshBuffers::from_interleaved(vec![0.0; 6], vec![0.0; 6]).is_ok());
    assert!(MeshBuffers::from_interleaved(vec![0.0; 7], vec![0.0; 6]).is_err());
    assert!(MeshBuffers::from_interleaved(vec![0.0; 6], vec![0.0; 5]).is_err());
}

#[test]
fn clear_normals_zeroes() {
    let mut buffers = MeshBuffers::from_interleaved(vec![0.0; 3], vec![1.0, 2.0, 3.0]).unwrap();
    buffers.clear_normals();
    assert_eq!(buffers.normals, vec![0.0; 3]);
}

#[test]
fn buffers_serialize() {
    let buffers = planar_grid(2, 2, 1.0, Vec3::ZERO, GridPlane::Xy);
    let json = serde_json::to_string(&buffers).unwrap();
    let recovered: MeshBuffers = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, buffers);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn grid_xy_layout() {
    let buffers = planar_grid(4, 3, 0.5, Vec3::new(1.0, 0.0, -1.0), GridPlane::Xy);
    assert_eq!(buffers.vertex_count(), 12);
    assert_eq!(buffers.position(0), Vec3::new(1.0, 0.0, -1.0));
    // (i=3, j=2) is the last vertex.
    assert_eq!(buffers.position(11), Vec3::new(2.5, 1.0, -1.0));
    assert!(buffers.normals.iter().all(|&n| n == 0.0));
}

#[test]
fn grid_xz_layout() {
    let buffers = planar_grid(2, 2, 1.0, Vec3::new(0.0, 2.0, 0.0), GridPlane::Xz);
    assert_eq!(buffers.position(3), Vec3::new(1.0, 2.0, 1.0));
}

#[test]
fn fan_normals() {
    assert_eq!(GridPlane::Xy.fan_normal(), Vec3::Z);
    assert_eq!(GridPlane::Xz.fan_normal(), Vec3::NEG_Y);
}

#[test]
fn grid_indices_counts() {
    assert_eq!(grid_indices(3, 3, 0).len(), 2 * 2 * 6);
    assert!(grid_indices(1, 5, 0).is_empty());
    assert!(grid_indices(5, 1, 0).is_empty());
}

#[test]
fn grid_indices_winding_matches_plane() {
    let buffers = planar_grid(2, 2, 1.0, Vec3::ZERO, GridPlane::Xy);
    let indices = grid_indices(2, 2, 0);
    for tri in indices.chunks(3) {
        let a = buffers.position(tri[0] as usize);
        let b = buffers.position(tri[1] as usize);
        let c = buffers.position(tri[2] as usize);
        let n = (b - a).cross(c - a).normalize();
        assert!((n - GridPlane::Xy.fan_normal()).length() < 1e-6);
    }
}

#[test]
fn grid_indices_offset() {
    let indices = grid_indices(2, 2, 10);
    assert_eq!(&indices[..3], &[10, 11, 12]);
}
