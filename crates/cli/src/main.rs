use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use geonum::geom::{delaunay, voronoi, Bounds};
use geonum::opt::{self, IpmCfg};
use geonum::{DMatrix, DVector, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::Provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run geonum constructions and solvers on JSON inputs")]
struct Cmd {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Voronoi diagram of `[[x, y], ...]`, clipped to bounds
    Voronoi {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        /// `min_x,max_x,min_y,max_y`; defaults to the 0..1000 square
        #[arg(long)]
        bounds: Option<String>,
    },
    /// Delaunay triangulation of `[[x, y], ...]`
    Delaunay {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Solve `min c'x s.t. Ax <= b, x >= 0` from `{"c": [], "a": [[]], "b": []}`
    Lp {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, value_enum, default_value_t = Method::Simplex)]
        method: Method,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Method {
    Simplex,
    Ipm,
}

#[derive(Debug, Deserialize)]
struct LpInput {
    c: Vec<f64>,
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
}

#[derive(Serialize)]
struct VoronoiOut {
    site_count: usize,
    vertices: Vec<[f64; 2]>,
    edges: Vec<EdgeOut>,
    cells: Vec<Vec<usize>>,
}

#[derive(Serialize)]
struct EdgeOut {
    a: [f64; 2],
    b: [f64; 2],
    sites: [usize; 2],
}

#[derive(Serialize)]
struct DelaunayOut {
    point_count: usize,
    triangles: Vec<[usize; 3]>,
    edges: Vec<(usize, usize)>,
}

#[derive(Serialize)]
struct LpOut {
    method: Method,
    status: String,
    x: Vec<f64>,
    objective: f64,
    iterations: usize,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Voronoi { input, out, bounds } => run_voronoi(&input, &out, bounds.as_deref()),
        Action::Delaunay { input, out } => run_delaunay(&input, &out),
        Action::Lp { input, out, method } => run_lp(&input, &out, method),
        Action::Report => report(),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {path}"))
}

fn read_points(path: &str) -> Result<Vec<Vec2<f64>>> {
    let raw: Vec<[f64; 2]> = read_json(path)?;
    Ok(raw.into_iter().map(|[x, y]| Vec2::new(x, y)).collect())
}

fn write_json<T: Serialize>(out: &str, value: &T) -> Result<()> {
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {out}"))
}

fn parse_bounds(s: &str) -> Result<Bounds> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("bounds {s:?}"))?;
    let [min_x, max_x, min_y, max_y] = parts[..] else {
        bail!("bounds need four values min_x,max_x,min_y,max_y, got {}", parts.len());
    };
    if min_x >= max_x || min_y >= max_y {
        bail!("bounds are empty: {s}");
    }
    Ok(Bounds::new(min_x, max_x, min_y, max_y))
}

fn xy(p: Vec2<f64>) -> [f64; 2] {
    [p.x, p.y]
}

fn run_voronoi(input: &str, out: &str, bounds: Option<&str>) -> Result<()> {
    let bounds = bounds.map(parse_bounds).transpose()?.unwrap_or_default();
    let sites = read_points(input)?;
    tracing::info!(input, out, sites = sites.len(), "voronoi");
    let d = voronoi::compute(&sites, bounds);
    let doc = VoronoiOut {
        site_count: d.site_count,
        vertices: d.vertices.iter().copied().map(xy).collect(),
        edges: d
            .edges
            .iter()
            .map(|e| EdgeOut {
                a: xy(e.a),
                b: xy(e.b),
                sites: [e.left_site, e.right_site],
            })
            .collect(),
        cells: d.cells.iter().map(|c| c.edges.clone()).collect(),
    };
    write_json(out, &doc)?;
    let params = json!({
        "op": "voronoi",
        "bounds": [bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y],
    });
    Provenance::new(params).with_input(input).write_beside(out)?;
    Ok(())
}

fn run_delaunay(input: &str, out: &str) -> Result<()> {
    let points = read_points(input)?;
    tracing::info!(input, out, points = points.len(), "delaunay");
    let t = delaunay::compute(&points);
    let doc = DelaunayOut {
        point_count: t.point_count,
        triangles: t.triangles.iter().map(|tr| [tr.a, tr.b, tr.c]).collect(),
        edges: t.edges,
    };
    write_json(out, &doc)?;
    Provenance::new(json!({"op": "delaunay"}))
        .with_input(input)
        .write_beside(out)?;
    Ok(())
}

fn lp_matrices(lp: &LpInput) -> Result<(DVector<f64>, DMatrix<f64>, DVector<f64>)> {
    let n = lp.c.len();
    if let Some(i) = lp.a.iter().position(|row| row.len() != n) {
        bail!("row {i} of a has {} entries, expected {n}", lp.a[i].len());
    }
    let flat: Vec<f64> = lp.a.iter().flatten().copied().collect();
    Ok((
        DVector::from_column_slice(&lp.c),
        DMatrix::from_row_slice(lp.a.len(), n, &flat),
        DVector::from_column_slice(&lp.b),
    ))
}

fn solve_lp(lp: &LpInput, method: Method) -> Result<LpOut> {
    let (c, a, b) = lp_matrices(lp)?;
    let out = match method {
        Method::Simplex => {
            let r = opt::simplex::solve(&c, &a, &b)?;
            LpOut {
                method,
                status: format!("{:?}", r.status),
                x: r.x.iter().copied().collect(),
                objective: r.objective,
                iterations: r.iterations,
            }
        }
        Method::Ipm => {
            let r = opt::interior_point::solve(&c, &a, &b, &IpmCfg::default())?;
            LpOut {
                method,
                status: if r.converged { "Converged" } else { "NotConverged" }.to_string(),
                x: r.x.iter().copied().collect(),
                objective: r.objective,
                iterations: r.iterations,
            }
        }
    };
    Ok(out)
}

fn run_lp(input: &str, out: &str, method: Method) -> Result<()> {
    let lp: LpInput = read_json(input)?;
    tracing::info!(input, out, ?method, "lp");
    let result = solve_lp(&lp, method)?;
    write_json(out, &result)?;
    Provenance::new(json!({"op": "lp", "method": method}))
        .with_input(input)
        .write_beside(out)?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = Provenance::new(json!({}));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn bounds_parse_and_reject() {
        let b = parse_bounds("-1, 1, 0,2").unwrap();
        assert_eq!(b, Bounds::new(-1.0, 1.0, 0.0, 2.0));
        assert!(parse_bounds("0,1,2").is_err());
        assert!(parse_bounds("0,1,x,2").is_err());
        assert!(parse_bounds("1,0,0,1").is_err());
    }

    #[test]
    fn lp_rejects_ragged_rows() {
        let lp = LpInput {
            c: vec![1.0, 1.0],
            a: vec![vec![1.0, 1.0], vec![1.0]],
            b: vec![1.0, 1.0],
        };
        assert!(lp_matrices(&lp).is_err());
    }

    #[test]
    fn lp_methods_on_small_problem() {
        let lp: LpInput =
            serde_json::from_str(r#"{"c": [-3, -2], "a": [[1, 1], [2, 1], [1, 2]], "b": [4, 5, 4]}"#)
                .unwrap();
        let s = solve_lp(&lp, Method::Simplex).unwrap();
        assert_eq!(s.status, "Optimal");
        assert!((s.objective + 8.0).abs() < 1e-9);
        // Barrier iterates stay interior, so they can only approach the optimum from above.
        let i = solve_lp(&lp, Method::Ipm).unwrap();
        assert!(i.objective >= s.objective - 1e-5);
        assert!(i.x.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn voronoi_run_writes_output_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("pts.json");
        std::fs::write(&input, "[[100, 300], [300, 300], [200, 100]]").unwrap();
        let out = dir.path().join("nested/cells.json");
        run_voronoi(
            input.to_str().unwrap(),
            out.to_str().unwrap(),
            Some("0,1000,0,1000"),
        )
        .unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["site_count"], 3);
        assert_eq!(doc["edges"].as_array().unwrap().len(), 3);
        assert!(dir.path().join("nested/cells.provenance.json").exists());
    }

    #[test]
    fn delaunay_run_reports_missing_input() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("tri.json");
        let err = run_delaunay("/nonexistent/pts.json", out.to_str().unwrap()).unwrap_err();
        assert!(format!("{err:#}").contains("reading"));
    }
}
