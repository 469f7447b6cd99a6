use super::{CompMesh, FemState, LocalEquations};
use crate::base::{Config, Idealization};
use crate::StrError;
use gemlab::integ::{self, Gauss};
use gemlab::mesh::Cell;
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Tensor2};

/// Calculates the strain tensor from the global displacement vector
///
/// The strain is evaluated at the natural coordinate `ksi` using the shape
/// function gradients; `l2g` interleaves the components (`local = 2 m + dof`).
#[rustfmt::skip]
fn calc_strain(
    eps: &mut Tensor2,
    uu: &Vector,
    ideal: &Idealization,
    l2g: &[usize],
    ksi: &[f64],
    pad: &mut Scratchpad,
) -> Result<(), StrError> {
    let nnode = pad.kind.nnode();
    pad.calc_gradient(ksi)?;
    let gg = &pad.gradient;
    eps.clear();
    for m in 0..nnode {
        eps.sym_add(0, 0, 1.0,  uu[l2g[0+2*m]] * gg.get(m,0));
        eps.sym_add(1, 1, 1.0,  uu[l2g[1+2*m]] * gg.get(m,1));
        eps.sym_add(0, 1, 1.0, (uu[l2g[0+2*m]] * gg.get(m,1) + uu[l2g[1+2*m]] * gg.get(m,0))/2.0);
    }
    if ideal.axisymmetric {
        // out-of-plane (hoop) component: εθ = u_r / r
        (pad.fn_interp)(&mut pad.interp, ksi);
        let nn = &pad.interp;
        let mut r = 0.0; // radius @ x(ξ)
        for m in 0..nnode {
            r += nn[m] * pad.xxt.get(0, m);
        }
        for m in 0..nnode {
            eps.sym_add(2, 2, 1.0, uu[l2g[0 + 2 * m]] * nn[m] / r);
        }
    }
    Ok(())
}

/// Implements the plane-strain/plane-stress solid element
///
/// The constitutive relation is linear elastic; consequently, the local
/// stiffness matrix is displacement-independent and the stresses follow
/// directly from the total strain.
pub struct ElementSolid<'a> {
    /// Geometry idealization (copied from the configuration)
    ideal: Idealization,

    /// The cell of this element
    pub cell: &'a Cell,

    /// Scratchpad to perform numerical integration
    pad: Scratchpad,

    /// Integration (Gauss) points
    gauss: Gauss,

    /// Local-to-global mapping (2 nnode)
    pub l2g: Vec<usize>,

    /// Constitutive relation mapping strain to stress
    model: LinElasticity,

    /// Local internal force vector
    pub f_int: Vector,

    /// Local stiffness matrix
    pub kke: Matrix,

    /// Stress tensors at the integration points (from the last evaluation)
    sigma: Vec<Tensor2>,

    /// Strain scratch tensor
    eps: Tensor2,
}

impl<'a> ElementSolid<'a> {
    /// Allocates a new instance
    pub fn new(comp: &CompMesh, config: &Config, cell: &'a Cell) -> Result<Self, StrError> {
        let ndim = comp.geo.mesh.ndim;
        let param = comp.param(cell)?;
        let mut pad = Scratchpad::new(ndim, cell.kind)?;
        comp.geo.mesh.set_pad(&mut pad, &cell.points);
        let gauss = Gauss::new(cell.kind);
        let l2g = comp.local_to_global(cell)?;
        let neq = l2g.len();
        let mandel = config.ideal.mandel();
        let ngauss = gauss.npoint();
        Ok(ElementSolid {
            ideal: config.ideal,
            cell,
            pad,
            gauss,
            l2g,
            model: LinElasticity::new(param.young, param.poisson, config.ideal.two_dim, param.plane_stress),
            f_int: Vector::new(neq),
            kke: Matrix::new(neq, neq),
            sigma: vec![Tensor2::new(mandel); ngauss],
            eps: Tensor2::new(mandel),
        })
    }

    /// Calculates the local stiffness matrix
    pub fn calc_kke(&mut self) -> Result<(), StrError> {
        let model = &self.model;
        let kke = &mut self.kke;
        let mut args = integ::CommonArgs::new(&mut self.pad, &self.gauss);
        args.alpha = self.ideal.thickness;
        args.axisymmetric = self.ideal.axisymmetric;
        integ::mat_10_bdb(kke, &mut args, |dd, _, _, _| {
            dd.set_tensor(1.0, model.get_modulus());
            Ok(())
        })
    }

    /// Evaluates the stresses at all integration points for the given state
    pub fn calc_stresses(&mut self, state: &FemState) -> Result<&[Tensor2], StrError> {
        let dd = self.model.get_modulus();
        for p in 0..self.gauss.npoint() {
            let ksi = self.gauss.coords(p);
            calc_strain(&mut self.eps, &state.uu, &self.ideal, &self.l2g, ksi, &mut self.pad)?;
            // σ = D : ε
            t4_ddot_t2_update(&mut self.sigma[p], 1.0, dd, &self.eps, 0.0);
        }
        Ok(&self.sigma)
    }

    /// Calculates the local internal force vector for the given state
    pub fn calc_f_int(&mut self, state: &FemState) -> Result<(), StrError> {
        self.calc_stresses(state)?;
        let sigma = &self.sigma;
        let f_int = &mut self.f_int;
        let mut args = integ::CommonArgs::new(&mut self.pad, &self.gauss);
        args.alpha = self.ideal.thickness;
        args.axisymmetric = self.ideal.axisymmetric;
        integ::vec_04_tb(f_int, &mut args, |sig, p, _, _| {
            sig.set_tensor(1.0, &sigma[p]);
            Ok(())
        })
    }

    /// Returns the number of integration points
    pub fn ngauss(&self) -> usize {
        self.gauss.npoint()
    }
}

impl<'a> LocalEquations for ElementSolid<'a> {
    fn cell_id(&self) -> usize {
        self.cell.id
    }

    fn local_to_global(&self) -> &[usize] {
        &self.l2g
    }

    fn calc_kke(&mut self) -> Result<(), StrError> {
        ElementSolid::calc_kke(self)
    }

    fn calc_f_int(&mut self, state: &FemState) -> Result<(), StrError> {
        ElementSolid::calc_f_int(self, state)
    }

    fn kke(&self) -> &Matrix {
        &self.kke
    }

    fn f_int(&self) -> &Vector {
        &self.f_int
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementSolid;
    use crate::base::{Config, Dof, EdgeBc, Model, ParamElastic, SampleMeshes};
    use crate::fem::{CompMesh, FemState, Geometry};
    use russell_lab::approx_eq;

    fn square_setup() -> (Geometry, Model) {
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
        (geo, model)
    }

    #[test]
    fn stiffness_is_symmetric() {
        let (geo, model) = square_setup();
        let comp = CompMesh::new(&geo, &model, 1).unwrap();
        let config = Config::new(&geo.mesh);
        let mut element = ElementSolid::new(&comp, &config, &geo.mesh.cells[0]).unwrap();
        element.calc_kke().unwrap();
        let (nrow, ncol) = element.kke.dims();
        assert_eq!((nrow, ncol), (8, 8));
        for i in 0..nrow {
            for j in (i + 1)..ncol {
                approx_eq(element.kke.get(i, j), element.kke.get(j, i), 1e-10);
            }
        }
        // diagonal entries must be positive
        for i in 0..nrow {
            assert!(element.kke.get(i, i) > 0.0);
        }
    }

    #[test]
    fn stresses_reproduce_uniform_strain() {
        let (geo, model) = square_setup();
        let comp = CompMesh::new(&geo, &model, 1).unwrap();
        let config = Config::new(&geo.mesh);
        let mut element = ElementSolid::new(&comp, &config, &geo.mesh.cells[0]).unwrap();

        // displacement field ux = c x (uniform εxx = c)
        const C: f64 = 4.56e-4;
        let mut state = FemState::new(&comp);
        for point in &geo.mesh.points {
            let eq = comp.dofs.eq(point.id, Dof::Ux).unwrap();
            state.uu[eq] = C * point.coords[0];
        }

        // plane strain with Ē = E/((1+ν)(1-2ν)):
        // σxx = Ē (1-ν) c, σyy = Ē ν c, σzz = ν (σxx + σyy)
        let ee_bar = 1000.0 / (1.25 * 0.5);
        let sig_xx = ee_bar * 0.75 * C;
        let sig_yy = ee_bar * 0.25 * C;
        let sig_zz = 0.25 * (sig_xx + sig_yy);
        let stresses = element.calc_stresses(&state).unwrap();
        for sig in stresses {
            approx_eq(sig.get(0, 0), sig_xx, 1e-12);
            approx_eq(sig.get(1, 1), sig_yy, 1e-12);
            approx_eq(sig.get(2, 2), sig_zz, 1e-12);
            approx_eq(sig.get(0, 1), 0.0, 1e-12);
        }
    }

    #[test]
    fn f_int_is_self_equilibrated() {
        let (geo, model) = square_setup();
        let comp = CompMesh::new(&geo, &model, 1).unwrap();
        let config = Config::new(&geo.mesh);
        let mut element = ElementSolid::new(&comp, &config, &geo.mesh.cells[0]).unwrap();

        let mut state = FemState::new(&comp);
        for point in &geo.mesh.points {
            let eq = comp.dofs.eq(point.id, Dof::Ux).unwrap();
            state.uu[eq] = 1e-3 * point.coords[0];
        }
        element.calc_f_int(&state).unwrap();

        // without body forces, the nodal internal forces balance out
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for m in 0..4 {
            sum_x += element.f_int[2 * m];
            sum_y += element.f_int[2 * m + 1];
        }
        approx_eq(sum_x, 0.0, 1e-12);
        approx_eq(sum_y, 0.0, 1e-12);
    }
}
