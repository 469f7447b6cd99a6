//! Makes the most commonly used structures available

pub use crate::base::{Config, Dof, EdgeBc, Model, Nbc, ParamElastic, SampleMeshes};
pub use crate::fem::{
    write_geometry_text, write_geometry_vtk, CompMesh, EquilibriumSolver, FemState, Geometry, PostProc, RunSummary,
    SolverStatus,
};
