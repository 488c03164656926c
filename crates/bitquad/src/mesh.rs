//! Static quad mesh built from permutations
//!
//! One cell per flag vector. Each cell packs two bytes, the flags with
//! value 0 and the flags with value 1, and hands them to its six vertices
//! according to the configured [`CornerPattern`](crate::CornerPattern).

use crate::codec::pack_flags_and_value;
use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::{quad, GridLayout, VERTICES_PER_QUAD};
use crate::permutation::permutations;

/// Interleaved vertex record uploaded to the GPU.
///
/// `packed[0]` holds the packed byte; the other three bytes are zero and keep
/// the attribute 4-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3], // offset 0
    pub packed: [u8; 4],    // offset 12
}

impl QuadVertex {
    #[inline]
    pub const fn new(position: [f32; 3], byte: u8) -> Self {
        Self {
            position,
            packed: [byte, 0, 0, 0],
        }
    }

    #[inline]
    pub const fn byte(&self) -> u8 {
        self.packed[0]
    }
}

/// Packed bytes for one cell: value 0 and value 1.
pub fn cell_bytes(flags: &[bool]) -> (u8, u8) {
    (
        pack_flags_and_value(0.0, flags),
        pack_flags_and_value(1.0, flags),
    )
}

/// Everything the renderer uploads, generated once.
#[derive(Clone, Debug)]
pub struct QuadMesh {
    pub layout: GridLayout,
    pub permutations: Vec<Vec<bool>>,
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u16>,
}

impl QuadMesh {
    /// Build the mesh for a validated config.
    pub fn build(config: &GridConfig) -> Result<Self> {
        config.validate()?;
        let layout = GridLayout::from_config(config)?;
        let permutations = permutations(config.flag_count);
        let slots = config.corner_pattern.slots();

        let mut vertices = Vec::with_capacity(layout.vertex_count());
        for (index, flags) in permutations.iter().enumerate() {
            let [x, y] = layout.cell_center(index);
            let (low, high) = cell_bytes(flags);

            for (position, &is_high) in quad(x, y, layout.quad_size).iter().zip(slots.iter()) {
                vertices.push(QuadVertex::new(*position, if is_high { high } else { low }));
            }
        }

        // at most 256 cells * 6 vertices, well inside u16
        let indices = (0..vertices.len()).map(|i| i as u16).collect();

        Ok(Self {
            layout,
            permutations,
            vertices,
            indices,
        })
    }

    /// Vertices of one cell.
    pub fn cell_vertices(&self, index: usize) -> &[QuadVertex] {
        let start = index * VERTICES_PER_QUAD;
        &self.vertices[start..start + VERTICES_PER_QUAD]
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Permutation table, one line per grid row.
    pub fn table(&self) -> Vec<String> {
        permutation_table(&self.permutations, self.layout.col_count)
    }
}

/// Format flag vectors as `1 0 1 | 0 1 1 | ...`, `per_row` vectors per line.
///
/// A final partial row is kept.
pub fn permutation_table(permutations: &[Vec<bool>], per_row: usize) -> Vec<String> {
    permutations
        .chunks(per_row.max(1))
        .map(|row| {
            row.iter()
                .map(|flags| {
                    flags
                        .iter()
                        .map(|&f| if f { "1" } else { "0" })
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CornerPattern;

    #[test]
    fn test_vertex_layout_size() {
        assert_eq!(std::mem::size_of::<QuadVertex>(), 16);
        assert_eq!(std::mem::align_of::<QuadVertex>(), 4);
    }

    #[test]
    fn test_cell_bytes() {
        assert_eq!(cell_bytes(&[true, false, true]), (160, 191));
        assert_eq!(cell_bytes(&[]), (0, 254));
    }

    #[test]
    fn test_build_default() {
        let mesh = QuadMesh::build(&GridConfig::default()).unwrap();
        assert_eq!(mesh.permutations.len(), 8);
        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.indices.len(), 48);
        assert_eq!(mesh.index_count(), 48);
        assert_eq!(mesh.vertex_bytes().len(), 48 * 16);
        assert_eq!(mesh.index_bytes().len(), 48 * 2);
        assert!(mesh.indices.iter().enumerate().all(|(i, &v)| v as usize == i));
    }

    #[test]
    fn test_top_edge_pattern_bytes() {
        let mesh = QuadMesh::build(&GridConfig::default()).unwrap();
        // cell 5 = [1, 0, 1]
        let bytes: Vec<u8> = mesh.cell_vertices(5).iter().map(|v| v.byte()).collect();
        assert_eq!(bytes, vec![191, 160, 160, 160, 191, 191]);
    }

    #[test]
    fn test_corner_pattern_applies() {
        let config = GridConfig {
            corner_pattern: CornerPattern::AntiDiagonal,
            ..GridConfig::default()
        };
        let mesh = QuadMesh::build(&config).unwrap();
        let bytes: Vec<u8> = mesh.cell_vertices(5).iter().map(|v| v.byte()).collect();
        assert_eq!(bytes, vec![160, 191, 160, 160, 191, 160]);
    }

    #[test]
    fn test_vertices_sit_in_their_cell() {
        let mesh = QuadMesh::build(&GridConfig::with_flags(4).unwrap()).unwrap();
        for index in 0..mesh.layout.cell_count {
            let [min_x, min_y, max_x, max_y] = mesh.layout.cell_bounds(index);
            for v in mesh.cell_vertices(index) {
                let [x, y, z] = v.position;
                assert!(x >= min_x - 1e-6 && x <= max_x + 1e-6);
                assert!(y >= min_y - 1e-6 && y <= max_y + 1e-6);
                assert_eq!(z, 0.0);
            }
        }
    }

    #[test]
    fn test_build_rejects_bad_padding() {
        let config = GridConfig {
            padding: 1.0,
            ..GridConfig::default()
        };
        assert!(QuadMesh::build(&config).is_err());
    }

    #[test]
    fn test_permutation_table_rows() {
        let mesh = QuadMesh::build(&GridConfig::default()).unwrap();
        let table = mesh.table();
        assert_eq!(
            table,
            vec![
                "0 0 0 | 1 0 0 | 0 1 0".to_string(),
                "1 1 0 | 0 0 1 | 1 0 1".to_string(),
                "0 1 1 | 1 1 1".to_string(),
            ]
        );
    }

    #[test]
    fn test_permutation_table_zero_width() {
        let table = permutation_table(&[vec![], vec![]], 0);
        assert_eq!(table, vec!["".to_string(), "".to_string()]);
    }
}
