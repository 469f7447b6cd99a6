use super::EdgeBc;
use crate::StrError;
use gemlab::mesh::CellAttribute;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Holds the parameters of a linear elastic material law
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ParamElastic {
    /// Young's modulus
    pub young: f64,

    /// Poisson's ratio
    pub poisson: f64,

    /// 2D plane-stress instead of plane-strain
    pub plane_stress: bool,
}

impl ParamElastic {
    /// Returns sample parameters for a plane-strain wellbore rock
    pub fn sample_wellbore_rock() -> Self {
        ParamElastic {
            young: 29269.0, // MPa
            poisson: 0.203,
            plane_stress: false,
        }
    }
}

/// Holds the material laws and boundary conditions keyed by geometric tags
///
/// Region tags (attributes of solid cells) map to exactly one material law;
/// boundary tags (attributes of edge cells) map to exactly one condition.
/// Both maps are filled before the computational mesh is built and never
/// change afterwards.
pub struct Model {
    materials: HashMap<CellAttribute, ParamElastic>,
    conditions: HashMap<CellAttribute, EdgeBc>,
}

impl Model {
    /// Allocates a new (empty) instance
    pub fn new() -> Self {
        Model {
            materials: HashMap::new(),
            conditions: HashMap::new(),
        }
    }

    /// Registers a material law for a region tag
    ///
    /// Registering a second law for the same tag is an error, regardless of
    /// the order of the registrations.
    pub fn register_material(
        &mut self,
        region_tag: CellAttribute,
        param: ParamElastic,
    ) -> Result<&mut Self, StrError> {
        if !param.young.is_finite() || param.young <= 0.0 {
            return Err("Young's modulus must be > 0.0");
        }
        if !param.poisson.is_finite() || param.poisson <= -1.0 || param.poisson >= 0.5 {
            return Err("Poisson's ratio must be in (-1.0, 0.5)");
        }
        if self.materials.contains_key(&region_tag) {
            println!("ERROR: region tag = {} is already taken", region_tag);
            return Err("a material law is already registered for this region tag");
        }
        self.materials.insert(region_tag, param);
        Ok(self)
    }

    /// Registers a boundary condition for a boundary tag
    pub fn register_bc(&mut self, boundary_tag: CellAttribute, bc: EdgeBc) -> Result<&mut Self, StrError> {
        if self.conditions.contains_key(&boundary_tag) {
            println!("ERROR: boundary tag = {} is already taken", boundary_tag);
            return Err("a boundary condition is already registered for this boundary tag");
        }
        self.conditions.insert(boundary_tag, bc);
        Ok(self)
    }

    /// Returns the material law registered for a region tag
    pub fn material(&self, region_tag: CellAttribute) -> Result<&ParamElastic, StrError> {
        match self.materials.get(&region_tag) {
            Some(param) => Ok(param),
            None => {
                println!("ERROR: region tag = {} has no material law", region_tag);
                Err("cannot find a material law for a region tag in the geometry")
            }
        }
    }

    /// Returns the boundary condition registered for a boundary tag
    pub fn condition(&self, boundary_tag: CellAttribute) -> Result<&EdgeBc, StrError> {
        match self.conditions.get(&boundary_tag) {
            Some(bc) => Ok(bc),
            None => {
                println!("ERROR: boundary tag = {} has no boundary condition", boundary_tag);
                Err("cannot find a boundary condition for a boundary tag in the geometry")
            }
        }
    }

    /// Returns the number of registered material laws
    pub fn n_materials(&self) -> usize {
        self.materials.len()
    }

    /// Returns the number of registered boundary conditions
    pub fn n_conditions(&self) -> usize {
        self.conditions.len()
    }
}

impl fmt::Display for Model {
    /// Prints a formatted summary of the material and boundary-condition model
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Material laws\n").unwrap();
        write!(f, "=============\n").unwrap();
        let mut keys: Vec<_> = self.materials.keys().copied().collect();
        keys.sort();
        for key in keys {
            let p = self.materials.get(&key).unwrap();
            write!(
                f,
                "{} : young = {:?}, poisson = {:?}, plane_stress = {:?}\n",
                key, p.young, p.poisson, p.plane_stress
            )
            .unwrap();
        }
        write!(f, "\nBoundary conditions\n").unwrap();
        write!(f, "===================\n").unwrap();
        let mut keys: Vec<_> = self.conditions.keys().copied().collect();
        keys.sort();
        for key in keys {
            let bc = self.conditions.get(&key).unwrap();
            write!(f, "{} : {}\n", key, bc).unwrap();
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
