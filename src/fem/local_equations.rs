use super::FemState;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the trait for local (element) equations
///
/// This is the boundary between the driver and the numerical machinery: the
/// equilibrium solver only relies on these operations, so it can be
/// exercised against a fake implementation without the real element
/// integration (see the mock in the solver tests).
pub trait LocalEquations {
    /// Returns the id of the underlying cell (for diagnostics)
    fn cell_id(&self) -> usize;

    /// Returns the local-to-global mapping
    fn local_to_global(&self) -> &[usize];

    /// Calculates the local stiffness matrix
    fn calc_kke(&mut self) -> Result<(), StrError>;

    /// Calculates the local internal force vector for the given state
    fn calc_f_int(&mut self, state: &FemState) -> Result<(), StrError>;

    /// Returns the local stiffness matrix (after [LocalEquations::calc_kke])
    fn kke(&self) -> &Matrix;

    /// Returns the local internal force vector (after [LocalEquations::calc_f_int])
    fn f_int(&self) -> &Vector;
}
