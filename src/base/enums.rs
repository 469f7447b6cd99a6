use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines degrees-of-freedom (DOF) types
///
/// The driver solves for displacements in the section plane only.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Dof {
    /// Displacement along the first dimension
    Ux,

    /// Displacement along the second dimension
    Uy,
}

/// Defines natural (Neumann) boundary conditions over edges
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Nbc {
    /// Distributed load normal to the edge
    Qn,

    /// Distributed load parallel to x
    Qx,

    /// Distributed load parallel to y
    Qy,
}

/// Defines a boundary condition attached to a tagged boundary edge
///
/// There is no default condition: every boundary tag appearing in the
/// geometry must be registered with exactly one of these variants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeBc {
    /// Normal traction with the given intensity
    ///
    /// A negative value pushes against the boundary (e.g., the mud pressure
    /// acting on the wellbore wall).
    Qn(f64),

    /// Prescribed horizontal displacement at every point of the edge
    Ux(f64),

    /// Prescribed vertical displacement at every point of the edge
    Uy(f64),
}

impl fmt::Display for EdgeBc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeBc::Qn(v) => write!(f, "Qn = {:?}", v),
            EdgeBc::Ux(v) => write!(f, "Ux = {:?}", v),
            EdgeBc::Uy(v) => write!(f, "Uy = {:?}", v),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{Dof, EdgeBc, Nbc};

    #[test]
    fn derive_works() {
        let ux = Dof::Ux;
        let ux_clone = ux.clone();
        assert_eq!(format!("{:?}", ux), "Ux");
        assert_eq!(ux, ux_clone);
        assert!(Dof::Ux < Dof::Uy);

        let qn = Nbc::Qn;
        let qn_clone = qn.clone();
        assert_eq!(format!("{:?}", qn), "Qn");
        assert_eq!(qn, qn_clone);

        let bc = EdgeBc::Qn(-10.0);
        let bc_clone = bc.clone();
        assert_eq!(bc, bc_clone);
        assert_eq!(format!("{}", bc), "Qn = -10.0");
        assert_eq!(format!("{}", EdgeBc::Ux(0.0)), "Ux = 0.0");
        assert_eq!(format!("{}", EdgeBc::Uy(1.5)), "Uy = 1.5");
    }
}
