use super::{CompMesh, ElementSolid, FemState, Geometry};
use crate::base::{Config, Dof};
use crate::StrError;
use gemlab::integ::Gauss;
use gemlab::mesh::Cell;
use gemlab::recovery::get_extrap_matrix;
use gemlab::shapes::{GeoClass, Scratchpad};
use russell_lab::{mat_mat_mul, Matrix};
use std::fmt::Write;
use std::fs::File;
use std::io::Write as IoWrite;

/// Number of stress components kept by the post-processor: σxx, σyy, σzz, σxy
const NSIGMA: usize = 4;

/// Writes a plain-text dump of the geometry topology
pub fn write_geometry_text(geo: &Geometry, full_path: &str) -> Result<(), StrError> {
    let mut file = File::create(full_path).map_err(|_| "cannot create geometry text file")?;
    file.write_all(format!("{}", geo).as_bytes())
        .map_err(|_| "cannot write geometry text file")?;
    Ok(())
}

/// Writes a legacy-VTK dump of the geometry (solid and boundary cells)
///
/// The cell attribute (region or boundary tag) is written as cell data.
pub fn write_geometry_vtk(geo: &Geometry, full_path: &str) -> Result<(), StrError> {
    let mesh = &geo.mesh;
    let mut buffer = String::new();
    write!(&mut buffer, "# vtk DataFile Version 3.0\n{}\nASCII\nDATASET UNSTRUCTURED_GRID\n", geo.name).unwrap();

    // points
    write!(&mut buffer, "POINTS {} double\n", mesh.points.len()).unwrap();
    for point in &mesh.points {
        write!(&mut buffer, "{:?} {:?} 0.0\n", point.coords[0], point.coords[1]).unwrap();
    }

    // cells
    let list_size = mesh.cells.iter().fold(0, |acc, c| acc + 1 + c.points.len());
    write!(&mut buffer, "CELLS {} {}\n", mesh.cells.len(), list_size).unwrap();
    for cell in &mesh.cells {
        write!(&mut buffer, "{}", cell.points.len()).unwrap();
        for p in &cell.points {
            write!(&mut buffer, " {}", p).unwrap();
        }
        write!(&mut buffer, "\n").unwrap();
    }
    write!(&mut buffer, "CELL_TYPES {}\n", mesh.cells.len()).unwrap();
    for cell in &mesh.cells {
        match cell.kind.vtk_type() {
            Some(vtk) => write!(&mut buffer, "{}\n", vtk).unwrap(),
            None => return Err("cannot generate VTK file because VTK cell type is not available"),
        }
    }

    // attributes (region/boundary tags)
    write!(&mut buffer, "CELL_DATA {}\n", mesh.cells.len()).unwrap();
    write!(&mut buffer, "SCALARS attribute int 1\nLOOKUP_TABLE default\n").unwrap();
    for cell in &mesh.cells {
        write!(&mut buffer, "{}\n", cell.attribute).unwrap();
    }

    let mut file = File::create(full_path).map_err(|_| "cannot create geometry VTK file")?;
    file.write_all(buffer.as_bytes()).map_err(|_| "cannot write geometry VTK file")?;
    Ok(())
}

/// Assists in post-processing the solved state
///
/// All fields are derived read-only from the displacement vector: stresses
/// are evaluated at the Gauss points, extrapolated to the nodes of each
/// cell, and averaged at shared nodes.
pub struct PostProc<'a> {
    /// Holds the access to the computational mesh
    comp: &'a CompMesh<'a>,

    /// Holds the configuration
    config: &'a Config,
}

impl<'a> PostProc<'a> {
    /// Allocates a new instance
    pub fn new(comp: &'a CompMesh, config: &'a Config) -> Self {
        PostProc { comp, config }
    }

    /// Computes the nodal stress components [σxx, σyy, σzz, σxy]
    ///
    /// Returns one row per mesh point (zeros at points without solid cells).
    fn nodal_stresses(&self, state: &FemState) -> Result<Vec<[f64; NSIGMA]>, StrError> {
        let mesh = &self.comp.geo.mesh;
        let npoint = mesh.points.len();
        let mut acc = vec![[0.0; NSIGMA]; npoint];
        let mut count = vec![0_usize; npoint];
        for cell in self.comp.geo.solid_cells() {
            // stresses at the Gauss points
            let mut element = ElementSolid::new(self.comp, self.config, cell)?;
            let stresses = element.calc_stresses(state)?;
            let ngauss = stresses.len();
            let mut sig_gauss = Matrix::new(ngauss, NSIGMA);
            for p in 0..ngauss {
                sig_gauss.set(p, 0, stresses[p].get(0, 0));
                sig_gauss.set(p, 1, stresses[p].get(1, 1));
                sig_gauss.set(p, 2, stresses[p].get(2, 2));
                sig_gauss.set(p, 3, stresses[p].get(0, 1));
            }

            // extrapolate to the nodes of this cell
            let mut pad = Scratchpad::new(mesh.ndim, cell.kind)?;
            mesh.set_pad(&mut pad, &cell.points);
            let gauss = Gauss::new(cell.kind);
            let ee = get_extrap_matrix(&mut pad, &gauss)?;
            let nnode = cell.points.len();
            let mut sig_nodal = Matrix::new(nnode, NSIGMA);
            mat_mat_mul(&mut sig_nodal, 1.0, &ee, &sig_gauss, 0.0)?;

            // average at shared nodes
            for m in 0..nnode {
                let point_id = cell.points[m];
                for k in 0..NSIGMA {
                    acc[point_id][k] += sig_nodal.get(m, k);
                }
                count[point_id] += 1;
            }
        }
        for i in 0..npoint {
            if count[i] > 0 {
                for k in 0..NSIGMA {
                    acc[i][k] /= count[i] as f64;
                }
            }
        }
        Ok(acc)
    }

    /// Returns the displacement components of a point (zeros without DOFs)
    fn displacement(&self, state: &FemState, point_id: usize) -> [f64; 2] {
        let ux = match self.comp.dofs.eq(point_id, Dof::Ux).ok() {
            Some(eq) => state.uu[eq],
            None => 0.0,
        };
        let uy = match self.comp.dofs.eq(point_id, Dof::Uy).ok() {
            Some(eq) => state.uu[eq],
            None => 0.0,
        };
        [ux, uy]
    }

    /// Writes a VTU file with the requested scalar and vector fields
    ///
    /// # Input
    ///
    /// * `scalars` -- names among {SigmaX, SigmaY, SigmaZ, SigmaXY}
    /// * `vectors` -- names among {Displacement}
    /// * `subdivision` -- output refinement level: each solid cell is
    ///   re-sampled into 4^level linear sub-cells (0 = conforming nodes)
    /// * `full_path` -- output path; an existing file is overwritten
    ///
    /// An unknown field name fails the call before any file is touched.
    pub fn export_fields(
        &self,
        state: &FemState,
        scalars: &[&str],
        vectors: &[&str],
        subdivision: usize,
        full_path: &str,
    ) -> Result<(), StrError> {
        // validate the requested names first (no file mutation on error)
        let mut scalar_components = Vec::with_capacity(scalars.len());
        for name in scalars {
            let component = match *name {
                "SigmaX" => 0,
                "SigmaY" => 1,
                "SigmaZ" => 2,
                "SigmaXY" => 3,
                _ => {
                    println!("ERROR: unknown scalar field: {}", name);
                    return Err("unknown field name requested for export");
                }
            };
            scalar_components.push((*name, component));
        }
        for name in vectors {
            if *name != "Displacement" {
                println!("ERROR: unknown vector field: {}", name);
                return Err("unknown field name requested for export");
            }
        }
        let with_displacement = vectors.iter().any(|n| *n == "Displacement");

        // nodal stresses (needed by scalar fields and by the refined sampling)
        let sig_nodal = if scalar_components.is_empty() {
            Vec::new()
        } else {
            self.nodal_stresses(state)?
        };

        // collect the output grid
        let mesh = &self.comp.geo.mesh;
        let (coords, disps, sigmas, cells) = if subdivision == 0 {
            let coords: Vec<[f64; 2]> = mesh.points.iter().map(|p| [p.coords[0], p.coords[1]]).collect();
            let disps: Vec<[f64; 2]> = (0..mesh.points.len()).map(|i| self.displacement(state, i)).collect();
            let mut cells = Vec::new();
            for cell in self.comp.geo.solid_cells() {
                match cell.kind.vtk_type() {
                    Some(vtk) => cells.push((vtk as usize, cell.points.clone())),
                    None => return Err("cannot generate VTU file because VTK cell type is not available"),
                }
            }
            (coords, disps, sig_nodal, cells)
        } else {
            self.refined_grid(state, &sig_nodal, subdivision)?
        };

        // write the XML buffer
        let npoint = coords.len();
        let ncell = cells.len();
        let mut buffer = String::new();
        write!(
            &mut buffer,
            "<?xml version=\"1.0\"?>\n\
             <VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">\n\
             <UnstructuredGrid>\n\
             <Piece NumberOfPoints=\"{}\" NumberOfCells=\"{}\">\n",
            npoint, ncell
        )
        .unwrap();

        // nodes: coordinates
        write!(
            &mut buffer,
            "<Points>\n\
             <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">\n",
        )
        .unwrap();
        for x in &coords {
            write!(&mut buffer, "{:?} {:?} 0.0 ", x[0], x[1]).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n</Points>\n").unwrap();

        // elements: connectivity, offsets, types
        write!(
            &mut buffer,
            "<Cells>\n\
             <DataArray type=\"Int32\" Name=\"connectivity\" format=\"ascii\">\n"
        )
        .unwrap();
        for (_, points) in &cells {
            for p in points {
                write!(&mut buffer, "{} ", p).unwrap();
            }
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"Int32\" Name=\"offsets\" format=\"ascii\">\n"
        )
        .unwrap();
        let mut offset = 0;
        for (_, points) in &cells {
            offset += points.len();
            write!(&mut buffer, "{} ", offset).unwrap();
        }
        write!(
            &mut buffer,
            "\n</DataArray>\n\
             <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">\n"
        )
        .unwrap();
        for (vtk, _) in &cells {
            write!(&mut buffer, "{} ", vtk).unwrap();
        }
        write!(&mut buffer, "\n</DataArray>\n</Cells>\n").unwrap();

        // data: points
        write!(&mut buffer, "<PointData Scalars=\"TheScalars\">\n").unwrap();
        if with_displacement {
            write!(
                &mut buffer,
                "<DataArray type=\"Float64\" Name=\"Displacement\" NumberOfComponents=\"3\" format=\"ascii\">\n"
            )
            .unwrap();
            for u in &disps {
                write!(&mut buffer, "{:?} {:?} 0.0 ", u[0], u[1]).unwrap();
            }
            write!(&mut buffer, "\n</DataArray>\n").unwrap();
        }
        for (name, component) in &scalar_components {
            write!(
                &mut buffer,
                "<DataArray type=\"Float64\" Name=\"{}\" NumberOfComponents=\"1\" format=\"ascii\">\n",
                name
            )
            .unwrap();
            for sig in &sigmas {
                write!(&mut buffer, "{:?} ", sig[*component]).unwrap();
            }
            write!(&mut buffer, "\n</DataArray>\n").unwrap();
        }
        write!(&mut buffer, "</PointData>\n").unwrap();

        // footer
        write!(&mut buffer, "</Piece>\n</UnstructuredGrid>\n</VTKFile>\n").unwrap();

        // write file
        let mut file = File::create(full_path).map_err(|_| "cannot create VTU file")?;
        file.write_all(buffer.as_bytes()).map_err(|_| "cannot write VTU file")?;
        Ok(())
    }

    /// Re-samples the solid cells into 4^level linear sub-cells
    ///
    /// Coordinates and displacements are evaluated isoparametrically at a
    /// lattice of natural coordinates; stresses interpolate the nodal values.
    fn refined_grid(
        &self,
        state: &FemState,
        sig_nodal: &[[f64; NSIGMA]],
        level: usize,
    ) -> Result<GridData, StrError> {
        let mesh = &self.comp.geo.mesh;
        let n = 1 << level; // lattice segments per axis
        let mut coords = Vec::new();
        let mut disps = Vec::new();
        let mut sigmas = Vec::new();
        let mut cells = Vec::new();
        for cell in self.comp.geo.solid_cells() {
            let offset = coords.len();
            let mut pad = Scratchpad::new(mesh.ndim, cell.kind)?;
            mesh.set_pad(&mut pad, &cell.points);
            match cell.kind.class() {
                GeoClass::Qua => {
                    // lattice vertices over ξ, η in [-1, 1]
                    for j in 0..=n {
                        for i in 0..=n {
                            let ksi = [-1.0 + 2.0 * (i as f64) / (n as f64), -1.0 + 2.0 * (j as f64) / (n as f64)];
                            self.sample(state, sig_nodal, cell, &mut pad, &ksi, &mut coords, &mut disps, &mut sigmas);
                        }
                    }
                    let stride = n + 1;
                    for j in 0..n {
                        for i in 0..n {
                            let a = offset + j * stride + i;
                            cells.push((9_usize, vec![a, a + 1, a + stride + 1, a + stride])); // VTK_QUAD
                        }
                    }
                }
                GeoClass::Tri => {
                    // lattice vertices over ξ + η ≤ 1
                    let mut index = vec![usize::MAX; (n + 1) * (n + 1)];
                    for j in 0..=n {
                        for i in 0..=(n - j) {
                            let ksi = [(i as f64) / (n as f64), (j as f64) / (n as f64)];
                            index[j * (n + 1) + i] = coords.len();
                            self.sample(state, sig_nodal, cell, &mut pad, &ksi, &mut coords, &mut disps, &mut sigmas);
                        }
                    }
                    let at = |i: usize, j: usize| index[j * (n + 1) + i];
                    for j in 0..n {
                        for i in 0..(n - j) {
                            cells.push((5_usize, vec![at(i, j), at(i + 1, j), at(i, j + 1)])); // VTK_TRIANGLE
                            if i + j < n - 1 {
                                cells.push((5_usize, vec![at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)]));
                            }
                        }
                    }
                }
                _ => return Err("output subdivision requires Tri or Qua cells"),
            }
        }
        Ok((coords, disps, sigmas, cells))
    }

    /// Evaluates coordinates, displacement, and stresses at a natural coordinate
    fn sample(
        &self,
        state: &FemState,
        sig_nodal: &[[f64; NSIGMA]],
        cell: &Cell,
        pad: &mut Scratchpad,
        ksi: &[f64],
        coords: &mut Vec<[f64; 2]>,
        disps: &mut Vec<[f64; 2]>,
        sigmas: &mut Vec<[f64; NSIGMA]>,
    ) {
        (pad.fn_interp)(&mut pad.interp, ksi);
        let nn = &pad.interp;
        let nnode = cell.points.len();
        let mut x = [0.0; 2];
        let mut u = [0.0; 2];
        let mut sig = [0.0; NSIGMA];
        for m in 0..nnode {
            let point_id = cell.points[m];
            x[0] += nn[m] * pad.xxt.get(0, m);
            x[1] += nn[m] * pad.xxt.get(1, m);
            let um = self.displacement(state, point_id);
            u[0] += nn[m] * um[0];
            u[1] += nn[m] * um[1];
            if !sig_nodal.is_empty() {
                for k in 0..NSIGMA {
                    sig[k] += nn[m] * sig_nodal[point_id][k];
                }
            }
        }
        coords.push(x);
        disps.push(u);
        sigmas.push(sig);
    }
}

/// Refined output grid: coordinates, displacements, stresses, and sub-cells
type GridData = (Vec<[f64; 2]>, Vec<[f64; 2]>, Vec<[f64; NSIGMA]>, Vec<(usize, Vec<usize>)>);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
