use super::Geometry;
use crate::base::{Dof, EdgeBc, Model, Nbc, ParamElastic};
use crate::StrError;
use gemlab::mesh::{Cell, Edge, PointId};
use gemlab::shapes::GeoKind;
use std::collections::HashMap;
use std::fmt;

/// Returns the interpolation order realized by a cell kind
fn interp_order(kind: GeoKind) -> usize {
    match kind {
        GeoKind::Lin2 | GeoKind::Tri3 | GeoKind::Qua4 | GeoKind::Tet4 | GeoKind::Hex8 => 1,
        GeoKind::Lin3 | GeoKind::Tri6 | GeoKind::Qua8 | GeoKind::Qua9 | GeoKind::Tet10 | GeoKind::Hex20 => 2,
        _ => 0,
    }
}

/// Holds the (automatically generated) equation numbers of all DOFs
///
/// Every point of every solid cell receives one equation per displacement
/// component. Adjacent cells share points and hence share equation numbers,
/// which makes the approximation space conforming.
pub struct DofNumbers {
    /// Maps a point to its (Ux, Uy) equation numbers
    point_eqs: Vec<Option<[usize; 2]>>,

    /// Total number of equations
    pub n_equation: usize,
}

impl DofNumbers {
    /// Returns the equation number of (point, dof)
    pub fn eq(&self, point_id: PointId, dof: Dof) -> Result<usize, StrError> {
        if point_id >= self.point_eqs.len() {
            return Err("cannot find equation number because PointId is out-of-bounds");
        }
        match self.point_eqs[point_id] {
            Some(eqs) => Ok(match dof {
                Dof::Ux => eqs[0],
                Dof::Uy => eqs[1],
            }),
            None => Err("cannot find equation number corresponding to (PointId,DOF)"),
        }
    }
}

/// Holds the computational mesh: geometry + material/BC model + order
///
/// Construction resolves every region and boundary tag eagerly; a tag
/// without a registration makes the build fail before any solve attempt.
/// The material/BC assignment cannot change after construction.
pub struct CompMesh<'a> {
    /// Holds the access to the geometry
    pub geo: &'a Geometry,

    /// Holds the access to the material and boundary-condition model
    pub model: &'a Model,

    /// Approximation order (uniform across all elements)
    pub order: usize,

    /// Equation numbers of all DOFs
    pub dofs: DofNumbers,

    /// Resolved natural conditions: tagged edges with distributed loads
    pub natural: Vec<(Edge, Nbc, f64)>,

    /// Resolved prescribed displacement components, sorted by (point, DOF)
    pub prescribed: Vec<(PointId, Dof, f64)>,
}

impl<'a> CompMesh<'a> {
    /// Builds the computational mesh, validating the model resolution
    pub fn new(geo: &'a Geometry, model: &'a Model, order: usize) -> Result<Self, StrError> {
        // the driver solves cross-sections only
        if geo.mesh.ndim != 2 {
            return Err("computational mesh requires a 2D geometry");
        }

        // check the approximation order
        if order < 1 {
            return Err("approximation order must be ≥ 1");
        }
        for cell in geo.solid_cells() {
            if interp_order(cell.kind) != order {
                println!(
                    "ERROR: cell # {} with kind {:?} cannot realize order {}",
                    cell.id, cell.kind, order
                );
                return Err("approximation order does not match the geometry interpolation");
            }
        }

        // resolve all region tags and generate the equation numbers
        let npoint = geo.mesh.points.len();
        let mut point_eqs: Vec<Option<[usize; 2]>> = vec![None; npoint];
        let mut n_equation = 0;
        for cell in geo.solid_cells() {
            model.material(cell.attribute)?;
            for point_id in &cell.points {
                if point_eqs[*point_id].is_none() {
                    point_eqs[*point_id] = Some([n_equation, n_equation + 1]);
                    n_equation += 2;
                }
            }
        }
        let dofs = DofNumbers { point_eqs, n_equation };

        // resolve all boundary tags
        let mut natural = Vec::new();
        let mut prescribed_map = HashMap::new();
        for cell in geo.boundary_cells() {
            let edge = Edge {
                kind: cell.kind,
                points: cell.points.clone(),
            };
            match model.condition(cell.attribute)? {
                EdgeBc::Qn(value) => natural.push((edge, Nbc::Qn, *value)),
                EdgeBc::Ux(value) => {
                    for point_id in &edge.points {
                        prescribed_map.insert((*point_id, Dof::Ux), *value);
                    }
                }
                EdgeBc::Uy(value) => {
                    for point_id in &edge.points {
                        prescribed_map.insert((*point_id, Dof::Uy), *value);
                    }
                }
            }
        }
        let mut prescribed: Vec<_> = prescribed_map.iter().map(|((p, d), v)| (*p, *d, *v)).collect();
        prescribed.sort_by_key(|(p, d, _)| (*p, *d));

        // check that the prescribed points belong to the solid cells
        for (point_id, dof, _) in &prescribed {
            dofs.eq(*point_id, *dof)?;
        }

        Ok(CompMesh {
            geo,
            model,
            order,
            dofs,
            natural,
            prescribed,
        })
    }

    /// Returns the material parameters of a solid cell
    pub fn param(&self, cell: &Cell) -> Result<&ParamElastic, StrError> {
        self.model.material(cell.attribute)
    }

    /// Computes the local-to-global map of a solid cell
    ///
    /// The local numbering interleaves the components: `local = 2 m + dof`
    /// with `m` the local node index.
    pub fn local_to_global(&self, cell: &Cell) -> Result<Vec<usize>, StrError> {
        let mut l2g = Vec::with_capacity(2 * cell.points.len());
        for point_id in &cell.points {
            l2g.push(self.dofs.eq(*point_id, Dof::Ux)?);
            l2g.push(self.dofs.eq(*point_id, Dof::Uy)?);
        }
        Ok(l2g)
    }
}

impl<'a> fmt::Display for CompMesh<'a> {
    /// Prints a formatted summary of the computational mesh
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Computational mesh: {}\n", self.geo.name).unwrap();
        write!(f, "order = {}\n", self.order).unwrap();
        write!(f, "n_equation = {}\n", self.dofs.n_equation).unwrap();
        write!(f, "n_natural_edges = {}\n", self.natural.len()).unwrap();
        write!(f, "n_prescribed_values = {}\n", self.prescribed.len()).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
