use crate::StrError;
use gemlab::mesh::{Cell, CellAttribute, Edge, Mesh};
use std::fmt;

/// Holds the discretized geometry of the cross-section
///
/// The mesh owns the full topology: cells with the same dimension as the
/// space are the *solid* cells and carry a region tag in their attribute;
/// one-dimension-lower (Lin) cells mark the tagged boundaries. The topology
/// is immutable after loading; only the name may change.
pub struct Geometry {
    /// Holds the access to the mesh
    pub mesh: Mesh,

    /// Holds the user-visible name of the geometry
    pub name: String,
}

impl Geometry {
    /// Reads a geometry from a mesh file (text format)
    ///
    /// # Input
    ///
    /// * `full_path` -- path to the mesh file
    /// * `name` -- user-visible name of the geometry
    /// * `length_scale` -- factor converting file units to model units
    ///   (must be > 0.0; use 1.0 for no conversion)
    pub fn read(full_path: &str, name: &str, length_scale: f64) -> Result<Self, StrError> {
        if !length_scale.is_finite() || length_scale <= 0.0 {
            return Err("length scale factor must be > 0.0");
        }
        let mut mesh = match Mesh::from_text_file(full_path) {
            Ok(m) => m,
            Err(e) => {
                println!("ERROR: cannot load {} due to: {}", full_path, e);
                return Err("cannot load geometry file");
            }
        };
        if length_scale != 1.0 {
            for point in &mut mesh.points {
                for x in &mut point.coords {
                    *x *= length_scale;
                }
            }
        }
        Geometry::from_mesh(mesh, name)
    }

    /// Wraps an in-memory mesh, applying the same validations as [Geometry::read]
    pub fn from_mesh(mesh: Mesh, name: &str) -> Result<Self, StrError> {
        if mesh.cells.len() == 0 {
            return Err("geometry declares no cells");
        }
        let ndim = mesh.ndim;
        let mut n_solid = 0;
        for cell in &mesh.cells {
            let cell_ndim = cell.kind.ndim();
            if cell_ndim == ndim {
                n_solid += 1;
            } else if cell_ndim + 1 != ndim {
                println!("ERROR: cell # {} has kind {:?}", cell.id, cell.kind);
                return Err("geometry contains a cell with unsupported dimension");
            }
        }
        if n_solid == 0 {
            return Err("geometry has no solid cells");
        }
        Ok(Geometry {
            mesh,
            name: name.to_string(),
        })
    }

    /// Returns an iterator over the solid cells
    pub fn solid_cells(&self) -> impl Iterator<Item = &Cell> {
        let ndim = self.mesh.ndim;
        self.mesh.cells.iter().filter(move |c| c.kind.ndim() == ndim)
    }

    /// Returns an iterator over the (tagged) boundary cells
    pub fn boundary_cells(&self) -> impl Iterator<Item = &Cell> {
        let ndim = self.mesh.ndim;
        self.mesh.cells.iter().filter(move |c| c.kind.ndim() + 1 == ndim)
    }

    /// Returns the sorted distinct region tags of the solid cells
    pub fn region_tags(&self) -> Vec<CellAttribute> {
        let mut tags: Vec<_> = self.solid_cells().map(|c| c.attribute).collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Returns the sorted distinct tags of the boundary cells
    pub fn boundary_tags(&self) -> Vec<CellAttribute> {
        let mut tags: Vec<_> = self.boundary_cells().map(|c| c.attribute).collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Returns the edges of the boundary cells carrying the given tag
    pub fn boundary_edges(&self, tag: CellAttribute) -> Vec<Edge> {
        self.boundary_cells()
            .filter(|c| c.attribute == tag)
            .map(|c| Edge {
                kind: c.kind,
                points: c.points.clone(),
            })
            .collect()
    }
}

impl fmt::Display for Geometry {
    /// Prints the topology dump used by the text report
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Geometry: {}\n", self.name).unwrap();
        write!(f, "space_ndim = {}\n", self.mesh.ndim).unwrap();
        write!(f, "npoint = {}\n", self.mesh.points.len()).unwrap();
        write!(f, "ncell = {}\n", self.mesh.cells.len()).unwrap();
        write!(f, "\nPoints\n").unwrap();
        write!(f, "======\n").unwrap();
        for point in &self.mesh.points {
            write!(f, "{} : {:?}\n", point.id, point.coords).unwrap();
        }
        write!(f, "\nCells\n").unwrap();
        write!(f, "=====\n").unwrap();
        for cell in &self.mesh.cells {
            write!(
                f,
                "{} : attribute = {}, kind = {:?}, points = {:?}\n",
                cell.id, cell.attribute, cell.kind, cell.points
            )
            .unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::Geometry;
    use crate::base::SampleMeshes;
    use gemlab::mesh::Mesh;
    use gemlab::shapes::GeoKind;

    #[test]
    fn read_captures_errors() {
        assert_eq!(
            Geometry::read("data/meshes/wellbore_quarter.msh", "W", 0.0).err(),
            Some("length scale factor must be > 0.0")
        );
        assert_eq!(
            Geometry::read("data/meshes/__does_not_exist__.msh", "W", 1.0).err(),
            Some("cannot load geometry file")
        );
    }

    #[test]
    fn read_works() {
        let geo = Geometry::read("data/meshes/wellbore_quarter.msh", "Wellbore section", 1.0).unwrap();
        assert_eq!(geo.name, "Wellbore section");
        assert_eq!(geo.mesh.points.len(), 29);
        assert_eq!(geo.mesh.cells.len(), 16);
        assert_eq!(geo.region_tags(), &[1]);
        assert_eq!(geo.boundary_tags(), &[2, 3, 4, 5]);
    }

    #[test]
    fn read_applies_length_scale() {
        let geo = Geometry::read("data/meshes/wellbore_quarter.msh", "W", 1000.0).unwrap();
        // the wall radius becomes 100 (e.g., millimeters)
        let x = geo.mesh.points[0].coords[0];
        assert!(f64::abs(x - 100.0) < 1e-6);
    }

    #[test]
    fn from_mesh_captures_errors() {
        let empty = Mesh {
            ndim: 2,
            points: Vec::new(),
            cells: Vec::new(),
        };
        assert_eq!(Geometry::from_mesh(empty, "E").err(), Some("geometry declares no cells"));

        let mut only_edges = SampleMeshes::square_with_tagged_edges();
        only_edges.cells.retain(|c| c.kind == GeoKind::Lin2);
        assert_eq!(
            Geometry::from_mesh(only_edges, "E").err(),
            Some("geometry has no solid cells")
        );
    }

    #[test]
    fn accessors_work() {
        let geo = Geometry::from_mesh(SampleMeshes::wellbore_quarter(), "Wellbore section").unwrap();
        assert_eq!(geo.solid_cells().count(), 6);
        assert_eq!(geo.boundary_cells().count(), 10);
        assert_eq!(geo.region_tags(), &[1]);
        assert_eq!(geo.boundary_tags(), &[2, 3, 4, 5]);
        let wall = geo.boundary_edges(2);
        assert_eq!(wall.len(), 2);
        assert_eq!(wall[0].kind, GeoKind::Lin3);
        assert_eq!(wall[0].points, &[1, 0, 21]);
        assert_eq!(geo.boundary_edges(9).len(), 0);
    }

    #[test]
    fn display_works() {
        let geo = Geometry::from_mesh(SampleMeshes::square_with_tagged_edges(), "Unit square").unwrap();
        let text = format!("{}", geo);
        assert!(text.contains("Geometry: Unit square"));
        assert!(text.contains("npoint = 4"));
        assert!(text.contains("ncell = 5"));
        assert!(text.contains("0 : attribute = 1, kind = Qua4, points = [0, 1, 2, 3]"));
    }
}
