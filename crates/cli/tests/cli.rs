use std::process::Command;

use serde_json::json;
use tempfile::tempdir;

fn straight_line_problem() -> serde_json::Value {
    json!({
        "problem_type": "linear_interpolation",
        "shape": [5, 1, 1],
        "data": [0.0, 0.0, 0.0, 0.0, 0.0],
        "mesh_map": [2, 0, 0, 0, 3],
        "connectivity": [[1, 0, 0], [-1, 0, 0]],
        "settings": { "length_penalty": 1.0 }
    })
}

#[test]
fn segment_subcommand_reports_the_straight_line_cost() {
    let dir = tempdir().unwrap();
    let problem_path = dir.path().join("problem.json");
    std::fs::write(&problem_path, straight_line_problem().to_string()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_curve-extraction-cli"))
        .arg("segment")
        .arg(&problem_path)
        .output()
        .expect("failed to run the cli binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!((report["cost"].as_f64().unwrap() - 4.0).abs() < 1e-6);
}

#[test]
fn curve_info_subcommand_scores_an_explicit_path() {
    let dir = tempdir().unwrap();
    let problem_path = dir.path().join("problem.json");
    std::fs::write(&problem_path, straight_line_problem().to_string()).unwrap();

    let points_path = dir.path().join("points.json");
    let points = json!({ "points": [[0, 0, 0], [1, 0, 0], [2, 0, 0], [3, 0, 0], [4, 0, 0]] });
    std::fs::write(&points_path, points.to_string()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_curve-extraction-cli"))
        .arg("curve-info")
        .arg(&problem_path)
        .arg(&points_path)
        .output()
        .expect("failed to run the cli binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!((report["total_weighted_length"].as_f64().unwrap() - 4.0).abs() < 1e-6);
}
