//! Wellsim drives a finite element simulation of the mechanical deformation
//! around a cylindrical excavation (a wellbore cross-section) in a continuum.
//!
//! The crate is organized in two modules:
//!
//! * [base] -- configuration, the material/boundary-condition model, and
//!   auxiliary structures for the assembly process
//! * [fem] -- geometry, computational mesh, elements, the equilibrium solver
//!   loop, and post-processing
//!
//! The numerical machinery (shape functions, quadrature, sparse
//! factorization) is delegated to [gemlab] and the russell crates.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod prelude;
