use super::CompMesh;
use crate::StrError;
use russell_lab::Vector;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Holds the state of the equilibrium solver
///
/// The displacement vector is the only state carried across iterations; it
/// is overwritten in place by the solver. Stresses and other secondary
/// fields are derived from this vector at post-processing time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FemState {
    /// Displacement values {U}
    ///
    /// (n_equation)
    pub uu: Vector,
}

impl FemState {
    /// Allocates a new instance with zero displacements
    pub fn new(comp: &CompMesh) -> FemState {
        FemState {
            uu: Vector::new(comp.dofs.n_equation),
        }
    }

    /// Reads a JSON file containing the state data
    pub fn read_json<P>(full_path: &P) -> Result<Self, StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        let input = File::open(path).map_err(|_| "cannot open state file")?;
        let buffered = BufReader::new(input);
        let state = serde_json::from_reader(buffered).map_err(|_| "cannot parse state file")?;
        Ok(state)
    }

    /// Writes a JSON file with the state data
    pub fn write_json<P>(&self, full_path: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        let path = Path::new(full_path).to_path_buf();
        if let Some(p) = path.parent() {
            fs::create_dir_all(p).map_err(|_| "cannot create directory")?;
        }
        let mut file = File::create(&path).map_err(|_| "cannot create state file")?;
        serde_json::to_writer(&mut file, &self).map_err(|_| "cannot write state file")?;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::FemState;
    use crate::base::{EdgeBc, Model, ParamElastic, SampleMeshes};
    use crate::fem::{CompMesh, Geometry};

    #[test]
    fn new_and_derive_work() {
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
        let mut state = FemState::new(&comp);
        assert_eq!(state.uu.dim(), 8);

        // serialize and deserialize
        state.uu[3] = -1.5;
        let clone = state.clone();
        let json = serde_json::to_string(&clone).unwrap();
        let read: FemState = serde_json::from_str(&json).unwrap();
        assert_eq!(format!("{:?}", read), format!("{:?}", state));

        assert_eq!(
            FemState::read_json("/tmp/wellsim/__does_not_exist__.json").err(),
            Some("cannot open state file")
        );
    }
}
