//! JSON wire format for the CLI's input/output files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use curve_extraction::{Connectivity, Grid, Settings, Shape, VoxelPoint};
use serde::{Deserialize, Serialize};

/// A complete segmentation problem: the data volume, its voxel tags, the
/// connectivity template, the problem type, and the query settings, all
/// in one file so a run can be replayed from a single argument.
#[derive(Serialize, Deserialize)]
pub struct ProblemFile {
    pub problem_type: String,
    pub shape: [usize; 3],
    pub data: Vec<f64>,
    pub mesh_map: Vec<u8>,
    pub connectivity: Vec<[i32; 3]>,
    #[serde(default)]
    pub settings: Settings,
}

pub struct Problem {
    pub problem_type: String,
    pub data: Grid<f64>,
    pub mesh_map: Grid<u8>,
    pub connectivity: Connectivity,
    pub settings: Settings,
}

pub fn load_problem(path: &Path) -> Result<Problem> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading problem file {}", path.display()))?;
    let file: ProblemFile =
        serde_json::from_str(&text).with_context(|| format!("parsing problem file {}", path.display()))?;
    let [m, n, o] = file.shape;
    let shape = Shape::new(m, n, o);

    let data = Grid::from_vec(shape, file.data)
        .with_context(|| "data array length does not match shape".to_string())?;
    let mesh_map = Grid::from_vec(shape, file.mesh_map)
        .with_context(|| "mesh_map array length does not match shape".to_string())?;
    let k = file.connectivity.len();
    let connectivity = Connectivity::from_rows(
        &file.connectivity.into_iter().flatten().collect::<Vec<_>>(),
        k,
    )?;

    Ok(Problem {
        problem_type: file.problem_type,
        data,
        mesh_map,
        connectivity,
        settings: file.settings,
    })
}

#[derive(Serialize)]
pub struct SegmentationReport {
    pub cost: f64,
    pub path: Vec<[usize; 3]>,
    pub evaluations: usize,
    pub elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distances: Option<Vec<f64>>,
}

pub fn points_to_triples(points: &[VoxelPoint]) -> Vec<[usize; 3]> {
    points.iter().map(|p| [p.x, p.y, p.z]).collect()
}

#[derive(Deserialize)]
pub struct PointsFile {
    pub points: Vec<[usize; 3]>,
}

pub fn load_points(path: &Path) -> Result<Vec<VoxelPoint>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading points file {}", path.display()))?;
    let file: PointsFile =
        serde_json::from_str(&text).with_context(|| format!("parsing points file {}", path.display()))?;
    Ok(file
        .points
        .into_iter()
        .map(|[x, y, z]| VoxelPoint::new(x, y, z))
        .collect())
}
