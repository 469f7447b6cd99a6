use crate::StrError;
use gemlab::mesh::Mesh;
use russell_sparse::{Genie, LinSolParams};
use russell_tensor::Mandel;
use std::fmt;

/// Defines the geometry idealization of the cross-section
///
/// In 2D, the default is plane-strain with unit out-of-plane thickness.
/// The plane-stress flag belongs to the material law ([crate::base::ParamElastic]);
/// this structure only carries the quantities shared by all elements.
#[derive(Clone, Copy, Debug)]
pub struct Idealization {
    /// Indicates 2D instead of 3D
    pub two_dim: bool,

    /// Indicates an axisymmetric idealization in 2D
    pub axisymmetric: bool,

    /// Holds the out-of-plane thickness (default = 1.0)
    pub thickness: f64,
}

impl Idealization {
    /// Allocates a new instance for the given space dimension
    pub fn new(ndim: usize) -> Self {
        Idealization {
            two_dim: ndim == 2,
            axisymmetric: false,
            thickness: 1.0,
        }
    }

    /// Returns the symmetric Mandel representation associated with the idealization
    pub fn mandel(&self) -> Mandel {
        if self.two_dim {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        }
    }
}

/// Holds the run parameters of a simulation
///
/// All solver settings are carried explicitly by this value; there is no
/// ambient/global configuration, so repeated runs are reproducible.
pub struct Config {
    /// Geometry idealization
    pub ideal: Idealization,

    /// Tolerance for the Euclidean norm of the residual vector (default = 0.01)
    pub tolerance: f64,

    /// Maximum number of equilibrium iterations (default = 1)
    pub n_max_iterations: usize,

    /// Number of worker threads for the factorization (0 = library default)
    pub n_threads: usize,

    /// Kind of the direct linear solver (default = Umfpack)
    pub lin_sol_genie: Genie,

    /// Prints the convergence table while iterating
    pub verbose_iterations: bool,
}

impl Config {
    /// Allocates a new instance with default values
    pub fn new(mesh: &Mesh) -> Self {
        Config {
            ideal: Idealization::new(mesh.ndim),
            tolerance: 0.01,
            n_max_iterations: 1,
            n_threads: 0,
            lin_sol_genie: Genie::Umfpack,
            verbose_iterations: false,
        }
    }

    /// Sets the tolerance for the residual norm
    pub fn set_tolerance(&mut self, value: f64) -> &mut Self {
        self.tolerance = value;
        self
    }

    /// Sets the maximum number of equilibrium iterations
    pub fn set_n_max_iterations(&mut self, value: usize) -> &mut Self {
        self.n_max_iterations = value;
        self
    }

    /// Sets the number of worker threads for the factorization
    pub fn set_n_threads(&mut self, value: usize) -> &mut Self {
        self.n_threads = value;
        self
    }

    /// Sets the out-of-plane thickness (plane-stress analyses)
    pub fn set_thickness(&mut self, value: f64) -> &mut Self {
        self.ideal.thickness = value;
        self
    }

    /// Sets the axisymmetric idealization
    pub fn set_axisymmetric(&mut self, flag: bool) -> &mut Self {
        self.ideal.axisymmetric = flag;
        self
    }

    /// Validates all parameters; returns a message if something is off
    pub fn validate(&self) -> Option<String> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Some(format!("tolerance = {:?} is incorrect; it must be > 0.0", self.tolerance));
        }
        if self.n_max_iterations < 1 {
            return Some(format!(
                "n_max_iterations = {} is incorrect; it must be ≥ 1",
                self.n_max_iterations
            ));
        }
        if !self.ideal.thickness.is_finite() || self.ideal.thickness <= 0.0 {
            return Some(format!(
                "thickness = {:?} is incorrect; it must be > 0.0",
                self.ideal.thickness
            ));
        }
        None
    }

    /// Returns the parameters for the linear solver
    pub fn lin_sol_params(&self) -> LinSolParams {
        let mut params = LinSolParams::new();
        if self.n_threads > 0 {
            params.mumps_num_threads = self.n_threads;
        }
        params
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration data\n").unwrap();
        write!(f, "==================\n").unwrap();
        write!(f, "two_dim = {:?}\n", self.ideal.two_dim).unwrap();
        write!(f, "axisymmetric = {:?}\n", self.ideal.axisymmetric).unwrap();
        write!(f, "thickness = {:?}\n", self.ideal.thickness).unwrap();
        write!(f, "tolerance = {:?}\n", self.tolerance).unwrap();
        write!(f, "n_max_iterations = {:?}\n", self.n_max_iterations).unwrap();
        write!(f, "n_threads = {:?}\n", self.n_threads).unwrap();
        write!(f, "lin_sol_genie = {:?}\n", self.lin_sol_genie).unwrap();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Config, Idealization};
    use crate::base::SampleMeshes;
    use russell_tensor::Mandel;

    #[test]
    fn idealization_works() {
        let ideal = Idealization::new(2);
        assert_eq!(ideal.two_dim, true);
        assert_eq!(ideal.axisymmetric, false);
        assert_eq!(ideal.thickness, 1.0);
        assert_eq!(ideal.mandel(), Mandel::Symmetric2D);

        let ideal = Idealization::new(3);
        assert_eq!(ideal.two_dim, false);
        assert_eq!(ideal.mandel(), Mandel::Symmetric);
    }

    #[test]
    fn new_and_setters_work() {
        let mesh = SampleMeshes::square_with_tagged_edges();
        let mut config = Config::new(&mesh);
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.n_max_iterations, 1);
        assert_eq!(config.n_threads, 0);
        config
            .set_tolerance(1e-6)
            .set_n_max_iterations(10)
            .set_n_threads(4)
            .set_thickness(0.5)
            .set_axisymmetric(true);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.n_max_iterations, 10);
        assert_eq!(config.n_threads, 4);
        assert_eq!(config.ideal.thickness, 0.5);
        assert_eq!(config.ideal.axisymmetric, true);
        assert_eq!(config.validate(), None);
    }

    #[test]
    fn validate_captures_errors() {
        let mesh = SampleMeshes::square_with_tagged_edges();
        let mut config = Config::new(&mesh);
        config.set_tolerance(-0.01);
        assert_eq!(
            config.validate(),
            Some("tolerance = -0.01 is incorrect; it must be > 0.0".to_string())
        );
        config.set_tolerance(0.01).set_n_max_iterations(0);
        assert_eq!(
            config.validate(),
            Some("n_max_iterations = 0 is incorrect; it must be ≥ 1".to_string())
        );
        config.set_n_max_iterations(1).set_thickness(0.0);
        assert_eq!(
            config.validate(),
            Some("thickness = 0.0 is incorrect; it must be > 0.0".to_string())
        );
    }

    #[test]
    fn lin_sol_params_works() {
        let mesh = SampleMeshes::square_with_tagged_edges();
        let mut config = Config::new(&mesh);
        config.set_n_threads(3);
        let params = config.lin_sol_params();
        assert_eq!(params.mumps_num_threads, 3);
    }

    #[test]
    fn display_works() {
        let mesh = SampleMeshes::square_with_tagged_edges();
        let config = Config::new(&mesh);
        let text = format!("{}", config);
        assert!(text.contains("tolerance = 0.01"));
        assert!(text.contains("n_max_iterations = 1"));
    }
}
