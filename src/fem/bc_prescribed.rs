use super::CompMesh;
use crate::StrError;
use russell_lab::Vector;

/// Holds the resolved prescribed displacement components
///
/// The flags mark the prescribed equations so that they are skipped in the
/// assembly process; the reduced system receives ones on the corresponding
/// diagonal entries of the stiffness matrix.
pub struct BcPrescribedArray {
    /// An array flagging which equations are prescribed (n_equation)
    pub flags: Vec<bool>,

    /// Array with only the equation numbers of the prescribed DOFs
    pub equations: Vec<usize>,

    /// Prescribed values, parallel to `equations`
    values: Vec<f64>,
}

impl BcPrescribedArray {
    /// Allocates a new instance from the resolved conditions in the mesh
    pub fn new(comp: &CompMesh) -> Result<Self, StrError> {
        let mut flags = vec![false; comp.dofs.n_equation];
        let mut equations = Vec::new();
        let mut values = Vec::new();
        for (point_id, dof, value) in &comp.prescribed {
            let eq = comp.dofs.eq(*point_id, *dof)?;
            flags[eq] = true;
            equations.push(eq);
            values.push(*value);
        }
        Ok(BcPrescribedArray { flags, equations, values })
    }

    /// Sets all prescribed values in the displacement vector
    pub fn apply(&self, uu: &mut Vector) {
        for (eq, value) in self.equations.iter().zip(self.values.iter()) {
            uu[*eq] = *value;
        }
    }

    /// Tells whether any prescribed value is non-zero
    pub fn has_non_zero(&self) -> bool {
        self.values.iter().any(|v| *v != 0.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
