use crate::StrError;
use russell_lab::{Matrix, Vector};
use russell_sparse::CooMatrix;

/// Assembles a local vector into the global vector
///
/// # Input
///
/// * `rr_global` -- the global vector with length = `n_equation`
/// * `r_local` -- the local vector with length = `n_equation_local`
/// * `local_to_global` -- the equation numbers of the local entries
/// * `prescribed` -- flags the global equations with prescribed DOFs, which
///   are skipped so that the reduced system is generated
///
/// # Panics
///
/// This function will panic if the indices are out-of-bounds
pub fn assemble_vector(rr_global: &mut Vector, r_local: &Vector, local_to_global: &[usize], prescribed: &[bool]) {
    let n_equation_local = r_local.dim();
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !prescribed[g] {
            rr_global[g] += r_local[l];
        }
    }
}

/// Assembles a local matrix into the global (sparse) matrix
///
/// Rows and columns of prescribed equations are skipped; the caller is
/// responsible for putting ones on the corresponding diagonal entries.
pub fn assemble_matrix(
    kk_global: &mut CooMatrix,
    kk_local: &Matrix,
    local_to_global: &[usize],
    prescribed: &[bool],
) -> Result<(), StrError> {
    let n_equation_local = kk_local.dims().0;
    for l in 0..n_equation_local {
        let g = local_to_global[l];
        if !prescribed[g] {
            for ll in 0..n_equation_local {
                let gg = local_to_global[ll];
                if !prescribed[gg] {
                    kk_global.put(g, gg, kk_local.get(l, ll))?;
                }
            }
        }
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
