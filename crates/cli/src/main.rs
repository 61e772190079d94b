mod io;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use curve_extraction::{curve_info, segment};
use tracing::info;

/// Minimum-cost curve extraction over a voxel grid.
#[derive(Parser)]
#[command(name = "curve-extraction-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Finds the minimum-cost curve for a problem file and reports it as JSON.
    Segment {
        /// Path to a problem JSON file (see `io::ProblemFile`).
        problem: PathBuf,
        /// Where to write the segmentation report; stdout if omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Scores an explicit polyline against a problem's cost model.
    CurveInfo {
        /// Path to a problem JSON file (used for its data/settings, not its mesh map).
        problem: PathBuf,
        /// Path to a JSON file with a `points` array of `[x, y, z]` triples.
        points: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.action {
        Action::Segment { problem, output } => run_segment(&problem, output.as_deref()),
        Action::CurveInfo { problem, points } => run_curve_info(&problem, &points),
    }
}

fn run_segment(problem_path: &std::path::Path, output: Option<&std::path::Path>) -> Result<()> {
    let problem = io::load_problem(problem_path)?;
    info!(path = %problem_path.display(), "loaded segmentation problem");

    let result = segment(
        &problem.problem_type,
        &problem.data,
        &problem.mesh_map,
        &problem.connectivity,
        &problem.settings,
    )
    .with_context(|| "segmentation failed")?;

    let report = io::SegmentationReport {
        cost: result.cost,
        path: io::points_to_triples(&result.path),
        evaluations: result.evaluations,
        elapsed_seconds: result.elapsed.as_secs_f64(),
        visited: result.visited,
        parents: result.parents,
        distances: result.distances,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run_curve_info(problem_path: &std::path::Path, points_path: &std::path::Path) -> Result<()> {
    let problem = io::load_problem(problem_path)?;
    let points = io::load_points(points_path)?;

    let functors = curve_extraction::cost::build_functors(
        &problem.problem_type,
        &problem.data,
        problem.settings.voxel_dimensions,
        &problem.settings,
    )
    .with_context(|| "building cost functors")?;

    let info = curve_info(&points, &functors, &problem.settings).with_context(|| "scoring curve")?;
    println!("{}", serde_json::to_string_pretty(&CurveInfoReport::from(info))?);
    Ok(())
}

#[derive(serde::Serialize)]
struct CurveInfoReport {
    total_cost: f64,
    total_data: f64,
    total_weighted_length: f64,
    total_weighted_curvature: f64,
    total_weighted_torsion: f64,
    raw_length: f64,
    raw_curvature: f64,
    raw_torsion: f64,
}

impl From<curve_extraction::CurveInfo> for CurveInfoReport {
    fn from(info: curve_extraction::CurveInfo) -> Self {
        Self {
            total_cost: info.total_cost,
            total_data: info.total_data,
            total_weighted_length: info.total_weighted_length,
            total_weighted_curvature: info.total_weighted_curvature,
            total_weighted_torsion: info.total_weighted_torsion,
            raw_length: info.raw_length,
            raw_curvature: info.raw_curvature,
            raw_torsion: info.raw_torsion,
        }
    }
}
