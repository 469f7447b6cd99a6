use super::{BcPrescribedArray, LocalEquations};
use crate::base::Config;
use crate::StrError;
use russell_lab::Vector;
use russell_sparse::{LinSolver, SparseMatrix, Sym};

/// Holds the variables to solve the global linear system
///
/// The stiffness matrix uses full (non-triangular) COO storage; the matrix is
/// numerically symmetric and the storage layout does not affect the results.
pub struct LinearSystem<'a> {
    /// Total number of global equations (total number of DOFs)
    pub neq: usize,

    /// Holds the supremum of the number of nonzero values in the global matrix
    ///
    /// The sum of the entries of all local matrices plus the number of
    /// prescribed equations (ones are put on the corresponding diagonal).
    pub nnz_sup: usize,

    /// Global internal force vector F_int
    pub ff_int: Vector,

    /// Global external force vector F_ext
    pub ff_ext: Vector,

    /// Residual vector R = F_int − F_ext
    pub rr: Vector,

    /// Global stiffness matrix
    pub kk: SparseMatrix,

    /// Linear (direct) solver
    pub solver: LinSolver<'a>,

    /// The "minus-delta-U" vector (the solution of the linear system)
    pub mdu: Vector,
}

impl<'a> LinearSystem<'a> {
    /// Allocates a new instance
    pub fn new<'b>(
        config: &Config,
        elements: &[Box<dyn LocalEquations + 'b>],
        prescribed: &BcPrescribedArray,
    ) -> Result<Self, StrError> {
        let neq = prescribed.flags.len();
        let mut nnz_sup = prescribed.equations.len();
        nnz_sup += elements.iter().fold(0, |acc, e| {
            acc + e.local_to_global().len() * e.local_to_global().len()
        });
        Ok(LinearSystem {
            neq,
            nnz_sup,
            ff_int: Vector::new(neq),
            ff_ext: Vector::new(neq),
            rr: Vector::new(neq),
            kk: SparseMatrix::new_coo(neq, neq, nnz_sup, Sym::No)?,
            solver: LinSolver::new(config.lin_sol_genie)?,
            mdu: Vector::new(neq),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::LinearSystem;
    use crate::base::{Config, EdgeBc, Model, ParamElastic, SampleMeshes};
    use crate::fem::{BcPrescribedArray, CompMesh, ElementSolid, Geometry, LocalEquations};

    #[test]
    fn new_works() {
        let geo = Geometry::from_mesh(SampleMeshes::square_with_tagged_edges(), "square").unwrap();
        let mut model = Model::new();
        model
            .register_material(
                1,
                ParamElastic {
                    young: 1000.0,
                    poisson: 0.25,
                    plane_stress: false,
                },
            )
            .unwrap()
            .register_bc(2, EdgeBc::Qn(-2.0))
            .unwrap()
            .register_bc(3, EdgeBc::Qn(0.0))
            .unwrap()
            .register_bc(4, EdgeBc::Ux(0.0))
            .unwrap()
            .register_bc(5, EdgeBc::Uy(0.0))
            .unwrap();
        let comp = CompMesh::new(&geo, &model, 1).unwrap();
        let config = Config::new(&geo.mesh);
        let mut elements: Vec<Box<dyn LocalEquations + '_>> = Vec::new();
        for cell in geo.solid_cells() {
            elements.push(Box::new(ElementSolid::new(&comp, &config, cell).unwrap()));
        }
        let prescribed = BcPrescribedArray::new(&comp).unwrap();
        let lin_sys = LinearSystem::new(&config, &elements, &prescribed).unwrap();
        assert_eq!(lin_sys.neq, 8);
        // one 8x8 local matrix plus 4 prescribed diagonal entries
        assert_eq!(lin_sys.nnz_sup, 64 + 4);
        assert_eq!(lin_sys.rr.dim(), 8);
        assert_eq!(lin_sys.mdu.dim(), 8);
    }
}
