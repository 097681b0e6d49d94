//! Grid topology: which neighbors each node of a rectangular field is
//! connected to.
//!
//! Neighbors are picked from an 8-entry direction ring, walked
//! counter-clockwise starting at +X:
//!
//! ```text
//!   k:   0      1      2      3       4       5        6       7
//!       (1,0)  (1,1)  (0,1)  (-1,1)  (-1,0)  (-1,-1)  (0,-1)  (1,-1)
//! ```
//!
//! Each cell takes a contiguous window of the ring chosen from its border
//! position (corner: 3 entries, edge: 5, interior: 8). Structural springs
//! step one cell along each direction; bend springs step two and treat the
//! first/last *two* rows and columns as border. Because every window is
//! contiguous and counter-clockwise, the structural springs double as a
//! consistently wound fan for normal reconstruction.

use serde::{Deserialize, Serialize};

use drape_types::{DrapeError, DrapeResult, NodeId};

/// Direction ring as `(dx, dy)` = (column step, row step).
pub const RING: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Grid distance of structural springs.
pub const STRUCTURAL_REACH: usize = 1;

/// Grid distance of bend springs.
pub const BEND_REACH: usize = 2;

/// A contiguous, wrapping run of ring directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingWindow {
    /// First ring index.
    pub start: usize,
    /// Number of ring entries.
    pub span: usize,
}

impl RingWindow {
    /// The `(dx, dy)` steps of this window, in ring order.
    pub fn directions(self) -> impl Iterator<Item = (isize, isize)> {
        (self.start..self.start + self.span).map(|k| RING[k & 7])
    }
}

/// Picks the ring window for cell `(i, j)`.
///
/// A cell is on the first column when `i < reach` and on the last column
/// when `i + reach >= width` (rows likewise). Column tests win over row
/// tests, and first-row/column tests win over last-row/column tests, which
/// only matters for grids too small to hold both.
pub fn ring_window(i: usize, j: usize, width: usize, height: usize, reach: usize) -> RingWindow {
    let first_col = i < reach;
    let last_col = i + reach >= width;
    let first_row = j < reach;
    let last_row = j + reach >= height;

    let (start, span) = if first_col {
        if first_row {
            (0, 3)
        } else if last_row {
            (6, 3)
        } else {
            (6, 5)
        }
    } else if last_col {
        if first_row {
            (2, 3)
        } else if last_row {
            (4, 3)
        } else {
            (2, 5)
        }
    } else if first_row {
        (0, 5)
    } else if last_row {
        (4, 5)
    } else {
        (0, 8)
    };

    RingWindow { start, span }
}

/// Local (field-relative) indices of the neighbors of `(i, j)` at the given
/// reach, in ring order. Window entries that fall outside the grid are
/// skipped; with `width, height >= 2 * reach` none ever are.
pub fn window_targets(
    i: usize,
    j: usize,
    width: usize,
    height: usize,
    reach: usize,
) -> impl Iterator<Item = usize> {
    let step = reach as isize;
    ring_window(i, j, width, height, reach)
        .directions()
        .filter_map(move |(dx, dy)| {
            let ni = i as isize + dx * step;
            let nj = j as isize + dy * step;
            if ni < 0 || nj < 0 || ni >= width as isize || nj >= height as isize {
                None
            } else {
                Some(nj as usize * width + ni as usize)
            }
        })
}

/// Placement of one rectangular field inside a spring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    /// Points per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Arena vertex of grid point `(0, 0)`.
    pub first_vertex: usize,
    /// Node of grid point `(0, 0)`.
    pub first_node: NodeId,
}

impl FieldLayout {
    /// Number of nodes in the field.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.width * self.height
    }

    /// Node at column `i`, row `j`.
    pub fn node_at(&self, i: usize, j: usize) -> DrapeResult<NodeId> {
        if i >= self.width || j >= self.height {
            return Err(DrapeError::NodeOutOfBounds {
                index: j.saturating_mul(self.width).saturating_add(i),
                count: self.node_count(),
            });
        }
        Ok(NodeId(self.first_node.0 + (j * self.width + i) as u32))
    }

    /// Whether `(i, j)` lies on the outer ring of the grid.
    #[inline]
    pub fn is_border(&self, i: usize, j: usize) -> bool {
        i == 0 || j == 0 || i + 1 == self.width || j + 1 == self.height
    }

    /// All node ids of the field, row-major.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        let first = self.first_node.0;
        (0..self.node_count() as u32).map(move |k| NodeId(first + k))
    }

    /// Grid coordinates of `id`, if it belongs to this field.
    pub fn coords_of(&self, id: NodeId) -> Option<(usize, usize)> {
        let local = id.0.checked_sub(self.first_node.0)? as usize;
        (local < self.node_count()).then(|| (local % self.width, local / self.width))
    }
}
