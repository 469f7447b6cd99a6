use gemlab::mesh::{Cell, Mesh, Point};
use gemlab::shapes::GeoKind;

/// Holds sample meshes with tagged boundary edges
///
/// Solid cells carry the region tag in their attribute; 1D (Lin) cells mark
/// the tagged boundaries. Boundary cells are oriented counter-clockwise
/// around the domain so that their normal vectors point outward.
pub struct SampleMeshes {}

impl SampleMeshes {
    /// Returns a unit square with one Qua4 cell and four tagged edges
    ///
    /// ```text
    ///          (2)
    ///      3---------2
    ///      |         |
    ///  (4) |   [0]   | (3)
    ///      |   (1)   |
    ///      0---------1
    ///          (5)
    /// ```
    ///
    /// * `[#]` cell id, `(#)` attribute (region tag 1; boundary tags 2-5)
    #[rustfmt::skip]
    pub fn square_with_tagged_edges() -> Mesh {
        Mesh {
            ndim: 2,
            points: vec![
                Point { id: 0, marker: 0, coords: vec![0.0, 0.0] },
                Point { id: 1, marker: 0, coords: vec![1.0, 0.0] },
                Point { id: 2, marker: 0, coords: vec![1.0, 1.0] },
                Point { id: 3, marker: 0, coords: vec![0.0, 1.0] },
            ],
            cells: vec![
                Cell { id: 0, attribute: 1, kind: GeoKind::Qua4, points: vec![0, 1, 2, 3] },
                Cell { id: 1, attribute: 5, kind: GeoKind::Lin2, points: vec![0, 1] },
                Cell { id: 2, attribute: 3, kind: GeoKind::Lin2, points: vec![1, 2] },
                Cell { id: 3, attribute: 2, kind: GeoKind::Lin2, points: vec![2, 3] },
                Cell { id: 4, attribute: 4, kind: GeoKind::Lin2, points: vec![3, 0] },
            ],
        }
    }

    /// Returns a quarter of a wellbore cross-section (ring r = 0.1 to 1.0)
    ///
    /// Six Qua8 cells (two angular sectors, three radial layers with
    /// geometric grading towards the wall) plus ten Lin3 boundary cells:
    ///
    /// * region tag 1 -- rock
    /// * boundary tag 2 -- wellbore wall (inner arc)
    /// * boundary tag 3 -- far-field boundary (outer arc)
    /// * boundary tag 4 -- symmetry edge at x = 0
    /// * boundary tag 5 -- symmetry edge at y = 0
    #[rustfmt::skip]
    pub fn wellbore_quarter() -> Mesh {
        Mesh {
            ndim: 2,
            points: vec![
                Point { id:  0, marker: 0, coords: vec![0.100000000, 0.000000000] },
                Point { id:  1, marker: 0, coords: vec![0.070710678, 0.070710678] },
                Point { id:  2, marker: 0, coords: vec![0.000000000, 0.100000000] },
                Point { id:  3, marker: 0, coords: vec![0.215443469, 0.000000000] },
                Point { id:  4, marker: 0, coords: vec![0.152341538, 0.152341538] },
                Point { id:  5, marker: 0, coords: vec![0.000000000, 0.215443469] },
                Point { id:  6, marker: 0, coords: vec![0.464158883, 0.000000000] },
                Point { id:  7, marker: 0, coords: vec![0.328209894, 0.328209894] },
                Point { id:  8, marker: 0, coords: vec![0.000000000, 0.464158883] },
                Point { id:  9, marker: 0, coords: vec![1.000000000, 0.000000000] },
                Point { id: 10, marker: 0, coords: vec![0.707106781, 0.707106781] },
                Point { id: 11, marker: 0, coords: vec![0.000000000, 1.000000000] },
                Point { id: 12, marker: 0, coords: vec![0.157721735, 0.000000000] },
                Point { id: 13, marker: 0, coords: vec![0.111526108, 0.111526108] },
                Point { id: 14, marker: 0, coords: vec![0.000000000, 0.157721735] },
                Point { id: 15, marker: 0, coords: vec![0.339801176, 0.000000000] },
                Point { id: 16, marker: 0, coords: vec![0.240275716, 0.240275716] },
                Point { id: 17, marker: 0, coords: vec![0.000000000, 0.339801176] },
                Point { id: 18, marker: 0, coords: vec![0.732079442, 0.000000000] },
                Point { id: 19, marker: 0, coords: vec![0.517658338, 0.517658338] },
                Point { id: 20, marker: 0, coords: vec![0.000000000, 0.732079442] },
                Point { id: 21, marker: 0, coords: vec![0.092387953, 0.038268343] },
                Point { id: 22, marker: 0, coords: vec![0.038268343, 0.092387953] },
                Point { id: 23, marker: 0, coords: vec![0.199043811, 0.082446646] },
                Point { id: 24, marker: 0, coords: vec![0.082446646, 0.199043811] },
                Point { id: 25, marker: 0, coords: vec![0.428826892, 0.177625915] },
                Point { id: 26, marker: 0, coords: vec![0.177625915, 0.428826892] },
                Point { id: 27, marker: 0, coords: vec![0.923879533, 0.382683432] },
                Point { id: 28, marker: 0, coords: vec![0.382683432, 0.923879533] },
            ],
            cells: vec![
                Cell { id:  0, attribute: 1, kind: GeoKind::Qua8, points: vec![0, 3,  4, 1, 12, 23, 13, 21] },
                Cell { id:  1, attribute: 1, kind: GeoKind::Qua8, points: vec![1, 4,  5, 2, 13, 24, 14, 22] },
                Cell { id:  2, attribute: 1, kind: GeoKind::Qua8, points: vec![3, 6,  7, 4, 15, 25, 16, 23] },
                Cell { id:  3, attribute: 1, kind: GeoKind::Qua8, points: vec![4, 7,  8, 5, 16, 26, 17, 24] },
                Cell { id:  4, attribute: 1, kind: GeoKind::Qua8, points: vec![6, 9, 10, 7, 18, 27, 19, 25] },
                Cell { id:  5, attribute: 1, kind: GeoKind::Qua8, points: vec![7, 10, 11, 8, 19, 28, 20, 26] },
                Cell { id:  6, attribute: 2, kind: GeoKind::Lin3, points: vec![1, 0, 21] },
                Cell { id:  7, attribute: 2, kind: GeoKind::Lin3, points: vec![2, 1, 22] },
                Cell { id:  8, attribute: 3, kind: GeoKind::Lin3, points: vec![9, 10, 27] },
                Cell { id:  9, attribute: 3, kind: GeoKind::Lin3, points: vec![10, 11, 28] },
                Cell { id: 10, attribute: 4, kind: GeoKind::Lin3, points: vec![11, 8, 20] },
                Cell { id: 11, attribute: 4, kind: GeoKind::Lin3, points: vec![8, 5, 17] },
                Cell { id: 12, attribute: 4, kind: GeoKind::Lin3, points: vec![5, 2, 14] },
                Cell { id: 13, attribute: 5, kind: GeoKind::Lin3, points: vec![0, 3, 12] },
                Cell { id: 14, attribute: 5, kind: GeoKind::Lin3, points: vec![3, 6, 15] },
                Cell { id: 15, attribute: 5, kind: GeoKind::Lin3, points: vec![6, 9, 18] },
            ],
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::SampleMeshes;
    use gemlab::shapes::GeoKind;

    #[test]
    fn square_with_tagged_edges_works() {
        let mesh = SampleMeshes::square_with_tagged_edges();
        assert_eq!(mesh.ndim, 2);
        assert_eq!(mesh.points.len(), 4);
        assert_eq!(mesh.cells.len(), 5);
        assert_eq!(mesh.cells[0].kind, GeoKind::Qua4);
        let tags: Vec<_> = mesh.cells.iter().skip(1).map(|c| c.attribute).collect();
        assert_eq!(tags, &[5, 3, 2, 4]);
    }

    #[test]
    fn wellbore_quarter_works() {
        let mesh = SampleMeshes::wellbore_quarter();
        assert_eq!(mesh.ndim, 2);
        assert_eq!(mesh.points.len(), 29);
        assert_eq!(mesh.cells.len(), 16);
        let n_solid = mesh.cells.iter().filter(|c| c.kind == GeoKind::Qua8).count();
        let n_edges = mesh.cells.iter().filter(|c| c.kind == GeoKind::Lin3).count();
        assert_eq!(n_solid, 6);
        assert_eq!(n_edges, 10);
        // the wall points lie on the circle with radius 0.1
        for cell in mesh.cells.iter().filter(|c| c.attribute == 2) {
            for p in &cell.points {
                let x = mesh.points[*p].coords[0];
                let y = mesh.points[*p].coords[1];
                assert!(f64::abs(f64::sqrt(x * x + y * y) - 0.1) < 1e-8);
            }
        }
    }
}
