//! Integration tests for drape-types.

use drape_types::constants;
use drape_types::{DrapeError, FieldId, NodeId};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn node_id_index() {
    let id = NodeId(42);
    assert_eq!(id.index(), 42);
    assert_eq!(id.to_string(), "#42");
}

#[test]
fn field_id_index() {
    let id = FieldId::from(3);
    assert_eq!(id.index(), 3);
}

#[test]
fn ids_are_serializable() {
    let id = NodeId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: NodeId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn grid_dimension_display() {
    let err = DrapeError::InvalidGridDimensions { width: 0, height: 4 };
    assert_eq!(err.to_string(), "Invalid grid dimensions: 0x4");
}

#[test]
fn buffer_mismatch_display() {
    let err = DrapeError::BufferSizeMismatch {
        buffer: "normal",
        required: 48,
        actual: 12,
    };
    let msg = err.to_string();
    assert!(msg.contains("normal"));
    assert!(msg.contains("48"));
    assert!(msg.contains("12"));
}

#[test]
fn degenerate_normal_display() {
    let err = DrapeError::DegenerateNormalField { node: 7 };
    assert!(err.to_string().contains("Node 7"));
}

#[test]
fn io_errors_convert() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: DrapeError = io.into();
    assert!(matches!(err, DrapeError::Io(_)));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn defaults_match_reference_values() {
    assert_eq!(constants::GRAVITY, 9.8);
    assert_eq!(constants::DEFAULT_SPRING_CONSTANT, 200.0);
    assert_eq!(constants::CONNECTION_GROWTH, 4);
    assert_eq!(constants::COMPONENTS, 3);
}
