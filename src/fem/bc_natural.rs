use super::CompMesh;
use crate::base::{assemble_vector, Config, Dof, Idealization, Nbc};
use crate::StrError;
use gemlab::integ::{self, Gauss};
use gemlab::mesh::Edge;
use gemlab::shapes::Scratchpad;
use russell_lab::Vector;

/// Assists in the integration of a distributed load over a boundary edge
///
/// The local vector `phi` holds the consistent nodal forces of the
/// distributed load; it is added to the external force vector F_ext
/// (the residual convention is R = F_int − F_ext).
pub struct BcNatural {
    /// Geometry idealization (copied from the configuration)
    ideal: Idealization,

    /// Scratchpad to perform numerical integration
    pad: Scratchpad,

    /// Integration (Gauss) points
    gauss: Gauss,

    /// Local contribution to the external force vector
    phi: Vector,

    /// Local-to-global mapping (2 nnode)
    pub l2g: Vec<usize>,

    /// Natural boundary condition kind
    nbc: Nbc,

    /// Intensity of the distributed load
    value: f64,
}

impl BcNatural {
    /// Allocates a new instance
    pub fn new(comp: &CompMesh, config: &Config, edge: &Edge, nbc: Nbc, value: f64) -> Result<Self, StrError> {
        let ndim = comp.geo.mesh.ndim;
        let mut pad = Scratchpad::new(ndim, edge.kind)?;
        comp.geo.mesh.set_pad(&mut pad, &edge.points);
        let gauss = Gauss::new(edge.kind);
        let nnode = edge.points.len();
        let mut l2g = Vec::with_capacity(2 * nnode);
        for point_id in &edge.points {
            l2g.push(comp.dofs.eq(*point_id, Dof::Ux)?);
            l2g.push(comp.dofs.eq(*point_id, Dof::Uy)?);
        }
        Ok(BcNatural {
            ideal: config.ideal,
            pad,
            gauss,
            phi: Vector::new(2 * nnode),
            l2g,
            nbc,
            value,
        })
    }

    /// Calculates the local contribution to the external force vector
    pub fn calc_phi(&mut self) -> Result<(), StrError> {
        let ndim = 2;
        let value = self.value;
        let phi = &mut self.phi;
        let mut args = integ::CommonArgs::new(&mut self.pad, &self.gauss);
        args.alpha = self.ideal.thickness;
        args.axisymmetric = self.ideal.axisymmetric;
        match self.nbc {
            // traction along the outward unit normal
            Nbc::Qn => integ::vec_02_nv_bry(phi, &mut args, |v, _, un, _| {
                for i in 0..ndim {
                    v[i] = value * un[i];
                }
                Ok(())
            }),
            Nbc::Qx => integ::vec_02_nv(phi, &mut args, |v, _, _| {
                for i in 0..ndim {
                    v[i] = 0.0;
                }
                v[0] = value;
                Ok(())
            }),
            Nbc::Qy => integ::vec_02_nv(phi, &mut args, |v, _, _| {
                for i in 0..ndim {
                    v[i] = 0.0;
                }
                v[1] = value;
                Ok(())
            }),
        }
    }

    /// Integrates the load and adds it to the external force vector
    ///
    /// `prescribed` flags the equations to be skipped in the assembly.
    pub fn add_to_ff_ext(&mut self, ff_ext: &mut Vector, prescribed: &[bool]) -> Result<(), StrError> {
        self.calc_phi()?;
        assemble_vector(ff_ext, &self.phi, &self.l2g, prescribed);
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::BcNatural;
    use crate::base::{Config, EdgeBc, Model, Nbc, ParamElastic, SampleMeshes};
    use crate::fem::{CompMesh, Geometry};
    use gemlab::mesh::Edge;
    use gemlab::shapes::GeoKind;
    use russell_lab::{vec_approx_eq, Vector};

    fn wellbore_model() -> Model {
        let mut model = Model::new();
        model
            .register_material(1, ParamElastic::sample_wellbore_rock())
            .unwrap()
            .register_bc(2, EdgeBc::Qn(-10.0))
            .unwrap()
            .register_bc(3, EdgeBc::Qn(0.0))
            .unwrap()
            .register_bc(4, EdgeBc::Ux(0.0))
            .unwrap()
            .register_bc(5, EdgeBc::Uy(0.0))
            .unwrap();
        model
    }

    #[test]
    fn integration_works_lin2() {
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

        const Q: f64 = -2.0;

        // top edge [2, 3]: outward normal (0, 1); consistent forces L/2 per node
        let top = Edge {
            kind: GeoKind::Lin2,
            points: vec![2, 3],
        };
        let mut bry = BcNatural::new(&comp, &config, &top, Nbc::Qn, Q).unwrap();
        bry.calc_phi().unwrap();
        vec_approx_eq(&bry.phi, &[0.0, Q / 2.0, 0.0, Q / 2.0], 1e-14);

        // Qx on the same edge
        let mut bry = BcNatural::new(&comp, &config, &top, Nbc::Qx, Q).unwrap();
        bry.calc_phi().unwrap();
        vec_approx_eq(&bry.phi, &[Q / 2.0, 0.0, Q / 2.0, 0.0], 1e-14);

        // Qy on the right edge [1, 2]
        let right = Edge {
            kind: GeoKind::Lin2,
            points: vec![1, 2],
        };
        let mut bry = BcNatural::new(&comp, &config, &right, Nbc::Qy, Q).unwrap();
        bry.calc_phi().unwrap();
        vec_approx_eq(&bry.phi, &[0.0, Q / 2.0, 0.0, Q / 2.0], 1e-14);
    }

    #[test]
    fn integration_works_lin3() {
        let geo = Geometry::from_mesh(SampleMeshes::wellbore_quarter(), "Wellbore section").unwrap();
        let model = wellbore_model();
        let comp = CompMesh::new(&geo, &model, 2).unwrap();
        let config = Config::new(&geo.mesh);

        const Q: f64 = -10.0;

        // straight segment on the y = 0 line: from (0.1, 0) to (0.215.., 0)
        // with outward normal (0, -1); consistent forces L/6, L/6, 2L/3
        let edge = Edge {
            kind: GeoKind::Lin3,
            points: vec![0, 3, 12],
        };
        let ll = 0.215443469 - 0.1;
        let mut bry = BcNatural::new(&comp, &config, &edge, Nbc::Qn, Q).unwrap();
        bry.calc_phi().unwrap();
        #[rustfmt::skip]
        let correct = &[
            0.0, -Q * ll / 6.0,
            0.0, -Q * ll / 6.0,
            0.0, -2.0 * Q * ll / 3.0,
        ];
        vec_approx_eq(&bry.phi, correct, 1e-14);
    }

    #[test]
    fn assemble_works() {
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

        let top = Edge {
            kind: GeoKind::Lin2,
            points: vec![2, 3],
        };
        let mut bry = BcNatural::new(&comp, &config, &top, Nbc::Qn, -2.0).unwrap();
        let mut ff_ext = Vector::new(comp.dofs.n_equation);
        let prescribed = vec![false; comp.dofs.n_equation];
        bry.add_to_ff_ext(&mut ff_ext, &prescribed).unwrap();
        // point 2 has equations (4, 5); point 3 has (6, 7)
        vec_approx_eq(&ff_ext, &[0.0, 0.0, 0.0, 0.0, 0.0, -1.0, 0.0, -1.0], 1e-14);
    }
}
