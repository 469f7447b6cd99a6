use super::{BcNatural, BcPrescribedArray, CompMesh, ElementSolid, FemState, LinearSystem, LocalEquations};
use crate::base::{assemble_matrix, assemble_vector, Config};
use crate::StrError;
use russell_lab::{vec_add, vec_norm, Norm};
use std::fmt;

/// Defines the states of the equilibrium solver
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverStatus {
    /// Allocated but no iteration performed yet
    Uninitialized,

    /// Assembling the stiffness matrix and force vectors
    Assembling,

    /// Factorizing/solving the global linear system
    Solving,

    /// Evaluating the residual norm
    CheckingConvergence,

    /// The residual norm fell below the tolerance
    Converged,

    /// The iteration budget was exhausted without convergence
    ///
    /// Not fatal: the last computed state remains usable, but equilibrium
    /// has not been certified.
    MaxIterationsReached,
}

/// Holds the report of an equilibrium solver run
#[derive(Clone, Copy, Debug)]
pub struct RunSummary {
    /// Whether the residual check passed
    pub converged: bool,

    /// Number of assemble-solve-check cycles performed
    pub iterations: usize,

    /// Euclidean norm of the final residual vector
    pub residual_norm: f64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.converged {
            write!(
                f,
                "equilibrium process converged after {} iteration(s) with residual norm = {:e}",
                self.iterations, self.residual_norm
            )
        } else {
            write!(
                f,
                "equilibrium NOT certified: max iterations ({}) reached with residual norm = {:e}",
                self.iterations, self.residual_norm
            )
        }
    }
}

/// Implements the equilibrium solver loop
///
/// Per-iteration protocol: assemble the stiffness matrix and force vectors,
/// solve the (sign-corrected) linear system, update the displacements,
/// re-assemble the residual, and check its norm against the tolerance.
///
/// The linear solve computes `mdu = −ΔU` from `K mdu = R` with
/// `R = F_int − F_ext`, so the update is `u ← u − mdu`. With the present
/// linear-elastic material the stiffness is displacement-independent; the
/// factorization is performed once and reused by subsequent iterations.
pub struct EquilibriumSolver<'a> {
    /// Holds the configuration
    config: &'a Config,

    /// Holds a collection of element equations
    pub elements: Vec<Box<dyn LocalEquations + 'a>>,

    /// Holds a collection of boundary (distributed load) integrators
    pub bcs_natural: Vec<BcNatural>,

    /// Holds the prescribed displacement components
    pub bcs_prescribed: BcPrescribedArray,

    /// Holds the variables of the global linear system
    pub linear_system: LinearSystem<'a>,

    /// Current state of the solver
    status: SolverStatus,

    /// The stiffness matrix has been assembled and factorized
    factorized: bool,
}

impl<'a> EquilibriumSolver<'a> {
    /// Allocates a new instance
    pub fn new(comp: &'a CompMesh, config: &'a Config) -> Result<Self, StrError> {
        if let Some(msg) = config.validate() {
            println!("ERROR: {}", msg);
            return Err("cannot allocate solver because config.validate() failed");
        }
        let mut elements: Vec<Box<dyn LocalEquations + 'a>> = Vec::new();
        for cell in comp.geo.solid_cells() {
            elements.push(Box::new(ElementSolid::new(comp, config, cell)?));
        }
        let mut bcs_natural = Vec::new();
        for (edge, nbc, value) in &comp.natural {
            bcs_natural.push(BcNatural::new(comp, config, edge, *nbc, *value)?);
        }
        let bcs_prescribed = BcPrescribedArray::new(comp)?;
        let linear_system = LinearSystem::new(config, &elements, &bcs_prescribed)?;
        Ok(EquilibriumSolver {
            config,
            elements,
            bcs_natural,
            bcs_prescribed,
            linear_system,
            status: SolverStatus::Uninitialized,
            factorized: false,
        })
    }

    /// Returns the current state of the solver
    pub fn status(&self) -> SolverStatus {
        self.status
    }

    /// Assembles the internal force vector from the current displacements
    fn assemble_ff_int(&mut self, state: &FemState) -> Result<(), StrError> {
        self.linear_system.ff_int.fill(0.0);
        for e in &mut self.elements {
            if let Err(err) = e.calc_f_int(state) {
                println!("ERROR: cannot integrate cell # {} due to: {}", e.cell_id(), err);
                return Err("cannot assemble the global system");
            }
            assemble_vector(
                &mut self.linear_system.ff_int,
                e.f_int(),
                e.local_to_global(),
                &self.bcs_prescribed.flags,
            );
        }
        Ok(())
    }

    /// Assembles the external force vector
    fn assemble_ff_ext(&mut self) -> Result<(), StrError> {
        self.linear_system.ff_ext.fill(0.0);
        for bc in &mut self.bcs_natural {
            if let Err(err) = bc.add_to_ff_ext(&mut self.linear_system.ff_ext, &self.bcs_prescribed.flags) {
                println!("ERROR: cannot integrate boundary condition due to: {}", err);
                return Err("cannot assemble the global system");
            }
        }
        Ok(())
    }

    /// Assembles and factorizes the global stiffness matrix
    fn assemble_and_factorize(&mut self, iteration: usize) -> Result<(), StrError> {
        let kk_coo = self.linear_system.kk.get_coo_mut()?;
        for e in &mut self.elements {
            if let Err(err) = e.calc_kke() {
                println!("ERROR: cannot integrate cell # {} due to: {}", e.cell_id(), err);
                return Err("cannot assemble the global system");
            }
            assemble_matrix(kk_coo, e.kke(), e.local_to_global(), &self.bcs_prescribed.flags)?;
        }
        // ones on the diagonal of the prescribed equations
        for eq in &self.bcs_prescribed.equations {
            kk_coo.put(*eq, *eq, 1.0).unwrap();
        }
        if let Err(err) = self
            .linear_system
            .solver
            .actual
            .factorize(&mut self.linear_system.kk, Some(self.config.lin_sol_params()))
        {
            println!(
                "ERROR: factorization failed at iteration # {} (neq = {}) due to: {}",
                iteration, self.linear_system.neq, err
            );
            return Err("cannot factorize the global stiffness matrix");
        }
        self.factorized = true;
        Ok(())
    }

    /// Runs the iteration protocol until convergence or budget exhaustion
    ///
    /// Returns the run report; reaching the iteration budget is reported,
    /// not raised as an error.
    pub fn solve(&mut self, state: &mut FemState) -> Result<RunSummary, StrError> {
        let neq = self.linear_system.neq;

        // set prescribed values
        self.bcs_prescribed.apply(&mut state.uu);

        // message
        if self.config.verbose_iterations {
            println!("{:>10} {:>15} {:>15}", "iteration", "norm(R)", "tolerance");
        }

        let mut converged = false;
        let mut iterations = 0;
        let mut norm_rr = f64::INFINITY;
        for iteration in 0..self.config.n_max_iterations {
            iterations = iteration + 1;

            // assemble the global system
            self.status = SolverStatus::Assembling;
            self.assemble_ff_ext()?;
            if !self.factorized {
                // the linear-elastic stiffness is invariant across iterations
                self.assemble_and_factorize(iteration)?;
            }

            // residual R = F_int − F_ext (this orientation makes the solve
            // return mdu = −ΔU, i.e., the load-vector sign correction)
            self.assemble_ff_int(state)?;
            vec_add(
                &mut self.linear_system.rr,
                1.0,
                &self.linear_system.ff_int,
                -1.0,
                &self.linear_system.ff_ext,
            )
            .unwrap();

            // solve the linear system and update the displacements
            self.status = SolverStatus::Solving;
            if let Err(err) = self.linear_system.solver.actual.solve(
                &mut self.linear_system.mdu,
                &self.linear_system.kk,
                &self.linear_system.rr,
                false,
            ) {
                println!(
                    "ERROR: linear solve failed at iteration # {} (neq = {}) due to: {}",
                    iteration, neq, err
                );
                return Err("cannot solve the global linear system");
            }
            for i in 0..neq {
                if !self.bcs_prescribed.flags[i] {
                    state.uu[i] -= self.linear_system.mdu[i];
                }
            }

            // residual with the updated displacements
            self.status = SolverStatus::CheckingConvergence;
            self.assemble_ff_int(state)?;
            vec_add(
                &mut self.linear_system.rr,
                1.0,
                &self.linear_system.ff_int,
                -1.0,
                &self.linear_system.ff_ext,
            )
            .unwrap();
            norm_rr = vec_norm(&self.linear_system.rr, Norm::Euc);
            if !norm_rr.is_finite() {
                return Err("residual norm is not finite");
            }
            if self.config.verbose_iterations {
                println!("{:>10} {:>15.6e} {:>15.6e}", iterations, norm_rr, self.config.tolerance);
            }

            // convergence check
            if norm_rr < self.config.tolerance {
                converged = true;
                self.status = SolverStatus::Converged;
                break;
            }
        }
        if !converged {
            self.status = SolverStatus::MaxIterationsReached;
        }
        Ok(RunSummary {
            converged,
            iterations,
            residual_norm: norm_rr,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
