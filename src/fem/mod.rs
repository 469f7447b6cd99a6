//! Implements the finite element driver: geometry, computational mesh,
//! elements, the equilibrium solver loop, and post-processing

mod bc_natural;
mod bc_prescribed;
mod comp_mesh;
mod element_solid;
mod geometry;
mod linear_system;
mod local_equations;
mod output;
mod solver;
mod state;
pub use crate::fem::bc_natural::*;
pub use crate::fem::bc_prescribed::*;
pub use crate::fem::comp_mesh::*;
pub use crate::fem::element_solid::*;
pub use crate::fem::geometry::*;
pub use crate::fem::linear_system::*;
pub use crate::fem::local_equations::*;
pub use crate::fem::output::*;
pub use crate::fem::solver::*;
pub use crate::fem::state::*;
