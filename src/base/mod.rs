//! Implements the base structures for the wellbore simulation

mod assembly;
mod config;
mod enums;
mod model;
mod sample_meshes;
pub use crate::base::assembly::*;
pub use crate::base::config::*;
pub use crate::base::enums::*;
pub use crate::base::model::*;
pub use crate::base::sample_meshes::*;
