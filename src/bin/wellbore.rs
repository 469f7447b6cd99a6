use structopt::StructOpt;
use wellsim::prelude::*;
use wellsim::StrError;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "wellbore",
    about = "Simulates the deformation around a wellbore cross-section"
)]
struct Options {
    /// Mesh file with the cross-section geometry
    #[structopt(long, default_value = "data/meshes/wellbore_quarter.msh")]
    mesh: String,

    /// User-visible name of the geometry
    #[structopt(long, default_value = "Wellbore section")]
    name: String,

    /// Factor converting file units to model units
    #[structopt(long, default_value = "1.0")]
    length_scale: f64,

    /// Approximation order (must match the mesh interpolation)
    #[structopt(long, default_value = "2")]
    order: usize,

    /// Tolerance for the residual norm
    #[structopt(long, default_value = "0.01")]
    tolerance: f64,

    /// Maximum number of equilibrium iterations
    #[structopt(long, default_value = "1")]
    max_iterations: usize,

    /// Number of worker threads for the factorization (0 = library default)
    #[structopt(long, default_value = "0")]
    threads: usize,

    /// Normal traction on the wellbore wall (boundary tag 2); MPa
    #[structopt(long, default_value = "-10.0", allow_hyphen_values = true)]
    wall_traction: f64,

    /// Normal traction on the far-field boundary (boundary tag 3); MPa
    #[structopt(long, default_value = "0.0", allow_hyphen_values = true)]
    farfield_traction: f64,

    /// Output refinement level for the solution export
    #[structopt(long, default_value = "0")]
    subdivision: usize,

    /// Output directory
    #[structopt(long, default_value = ".")]
    out_dir: String,

    /// Filename stem of the solution export
    #[structopt(long, default_value = "wellbore")]
    output: String,
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();

    // load the geometry
    let geo = Geometry::read(&options.mesh, &options.name, options.length_scale)?;

    // geometry reports (best-effort: a failure must not abort the simulation)
    let path_txt = format!("{}/geometry.txt", options.out_dir);
    if let Err(err) = write_geometry_text(&geo, &path_txt) {
        println!("WARNING: cannot write {} due to: {}", path_txt, err);
    }
    let path_vtk = format!("{}/geometry.vtk", options.out_dir);
    if let Err(err) = write_geometry_vtk(&geo, &path_vtk) {
        println!("WARNING: cannot write {} due to: {}", path_vtk, err);
    }

    // material and boundary conditions
    // (rock = region 1; wall = 2; far-field = 3; symmetry edges = 4 and 5)
    let mut model = Model::new();
    model
        .register_material(
            1,
            ParamElastic {
                young: 29269.0, // MPa
                poisson: 0.203,
                plane_stress: false,
            },
        )?
        .register_bc(2, EdgeBc::Qn(options.wall_traction))?
        .register_bc(3, EdgeBc::Qn(options.farfield_traction))?
        .register_bc(4, EdgeBc::Ux(0.0))?
        .register_bc(5, EdgeBc::Uy(0.0))?;
    println!("{}", model);

    // computational mesh
    let comp = CompMesh::new(&geo, &model, options.order)?;
    println!("{}", comp);

    // configuration
    let mut config = Config::new(&geo.mesh);
    config
        .set_tolerance(options.tolerance)
        .set_n_max_iterations(options.max_iterations)
        .set_n_threads(options.threads);
    config.verbose_iterations = true;

    // solve
    let mut solver = EquilibriumSolver::new(&comp, &config)?;
    let mut state = FemState::new(&comp);
    let summary = solver.solve(&mut state)?;
    println!("{}", summary);

    // export the solution fields
    let post = PostProc::new(&comp, &config);
    let path_vtu = format!("{}/{}.vtu", options.out_dir, options.output);
    post.export_fields(
        &state,
        &["SigmaX", "SigmaY", "SigmaZ"],
        &["Displacement"],
        options.subdivision,
        &path_vtu,
    )?;
    println!("solution fields written to {}", path_vtu);

    // message
    println!("Execution complete.");
    Ok(())
}
