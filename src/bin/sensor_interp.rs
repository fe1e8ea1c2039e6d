use std::path::Path;

use polyinterp::{
    batch::{fit_each, SampleSet},
    fit_chebyshev_direct, fit_chebyshev_resampled, fit_cubic_spline, fit_polynomial,
    value::SteppedValues,
    ChebyshevInterpolant, FitProperties, Interpolator, MonomialInterpolant, NaturalCubicSpline,
    NodeCount, ResampledFit,
};

const USAGE: &str =
    "Usage: sensor_interp <path>... [nodes=<n>] [at=<x1,x2,...>] [points=<n>] [format=text|json]";

/// Every interpolant fitted to one sensor's data
struct SensorFits {
    polynomial: MonomialInterpolant,
    chebyshev: ChebyshevInterpolant,
    resampled: ResampledFit,
    spline: NaturalCubicSpline,
}

#[derive(serde::Serialize)]
struct Evaluation {
    x: f64,
    polynomial: Option<f64>,
    chebyshev: Option<f64>,
    resampled: Option<f64>,
    spline: Option<f64>,
}

#[derive(serde::Serialize)]
struct SensorReport {
    sensor: String,
    polynomial: FitProperties<f64>,
    raw_polynomial_coefficients: Vec<f64>,
    chebyshev: FitProperties<f64>,
    resampled: FitProperties<f64>,
    chebyshev_nodes: Vec<f64>,
    evaluations: Vec<Evaluation>,
}

fn main() {
    env_logger::init();

    let mut paths = Vec::new();
    let mut nodes = NodeCount::Samples;
    let mut at: Option<Vec<f64>> = None;
    let mut points = 5;
    let mut json = false;
    for arg in std::env::args().skip(1) {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }

        if let Some(option) = arg.strip_prefix("nodes=") {
            match option.parse::<usize>() {
                Ok(n) => nodes = NodeCount::Exact(n),
                Err(_) => fail(&format!("Invalid nodes value: {option}")),
            }
        } else if let Some(option) = arg.strip_prefix("at=") {
            let values: Result<Vec<f64>, _> = option.split(',').map(|v| v.trim().parse()).collect();
            match values {
                Ok(values) => at = Some(values),
                Err(_) => fail(&format!("Invalid at value: {option}")),
            }
        } else if let Some(option) = arg.strip_prefix("points=") {
            match option.parse::<usize>() {
                Ok(n) => points = n,
                Err(_) => fail(&format!("Invalid points value: {option}")),
            }
        } else if let Some(option) = arg.strip_prefix("format=") {
            match option {
                "text" => json = false,
                "json" => json = true,
                _ => fail(&format!("Unsupported format: {option}")),
            }
        } else {
            paths.push(arg);
        }
    }

    if paths.is_empty() {
        fail(&format!(
            "Please provide a path to a CSV or JSON file with (x, y) data points.\n{USAGE}"
        ));
    }

    let sets: Vec<SampleSet> = paths.iter().map(|p| load(Path::new(p))).collect();
    let results = fit_each(&sets, |x, y| {
        Ok(SensorFits {
            polynomial: fit_polynomial(x, y)?,
            chebyshev: fit_chebyshev_direct(x, y, NodeCount::Samples)?,
            resampled: fit_chebyshev_resampled(x, y, nodes)?,
            spline: fit_cubic_spline(x, y)?,
        })
    });

    let mut failed = false;
    let mut reports = Vec::new();
    for ((sensor, result), set) in results.into_iter().zip(&sets) {
        let fits = match result {
            Ok(fits) => fits,
            Err(e) => {
                eprintln!("Sensor {sensor}: {e}");
                failed = true;
                continue;
            }
        };

        let xs = match &at {
            Some(xs) => xs.clone(),
            None => {
                let range = fits.spline.x_range();
                SteppedValues::linspace(range, points).collect()
            }
        };

        let report = report(&sensor, &fits, &xs);
        if json {
            reports.push(report);
        } else {
            print_report(&report, set);
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(s) => println!("{s}"),
            Err(e) => fail(&format!("Failed to serialize report: {e}")),
        }
    }

    std::process::exit(i32::from(failed));
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn report(sensor: &str, fits: &SensorFits, xs: &[f64]) -> SensorReport {
    let evaluations = xs
        .iter()
        .map(|&x| Evaluation {
            x,
            polynomial: fits.polynomial.y(x).ok(),
            chebyshev: fits.chebyshev.y(x).ok(),
            resampled: fits.resampled.y(x).ok(),
            spline: fits.spline.y(x).ok(),
        })
        .collect();

    SensorReport {
        sensor: sensor.to_string(),
        polynomial: fits.polynomial.properties(),
        raw_polynomial_coefficients: fits.polynomial.raw_coefficients(),
        chebyshev: fits.chebyshev.properties(),
        resampled: fits.resampled.interpolant().properties(),
        chebyshev_nodes: fits.resampled.nodes().to_vec(),
        evaluations,
    }
}

fn print_report(report: &SensorReport, set: &SampleSet) {
    fn cell(v: Option<f64>) -> String {
        v.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
    }

    println!("Sensor {} ({} samples):", report.sensor, set.len());
    println!("  Polynomial:         {}", report.polynomial.equation);
    println!("  Polynomial (raw x): {:?}", report.raw_polynomial_coefficients);
    println!("  Chebyshev:          {}", report.chebyshev.equation);
    println!("  Resampled:          {}", report.resampled.equation);
    println!("  Chebyshev nodes:    {:?}", report.chebyshev_nodes);
    println!();
    println!(
        "  {:>12} {:>14} {:>14} {:>14} {:>14}",
        "x", "polynomial", "chebyshev", "resampled", "spline"
    );
    for e in &report.evaluations {
        println!(
            "  {:>12.6} {:>14} {:>14} {:>14} {:>14}",
            e.x,
            cell(e.polynomial),
            cell(e.chebyshev),
            cell(e.resampled),
            cell(e.spline)
        );
    }
    println!();
}

/// Reads a CSV (`x,y` with an optional header row) or JSON (`[[x, y], ...]`) file.
fn load(path: &Path) -> SampleSet {
    let Ok(contents) = std::fs::read_to_string(path) else {
        fail(&format!("Failed to read file: {}", path.display()));
    };

    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());

    let data: Vec<(f64, f64)> = match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => parse_csv(&contents).unwrap_or_else(|line| {
            fail(&format!("Failed to parse line {line} of {}", path.display()))
        }),
        Some("json") => serde_json::from_str(&contents)
            .unwrap_or_else(|err| fail(&format!("Failed to parse JSON: {err}"))),
        _ => fail(&format!("Unsupported file format: {}", path.display())),
    };

    log::info!("Loaded {} samples from {}", data.len(), path.display());
    SampleSet::from_pairs(name, &data)
}

/// Parses two comma-separated columns, returning the 1-based number of the first bad line.
fn parse_csv(contents: &str) -> Result<Vec<(f64, f64)>, usize> {
    fn parse_line(line: &str) -> Option<(f64, f64)> {
        let mut parts = line.split(',').map(str::trim);
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        Some((x, y))
    }

    let mut data = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(point) => data.push(point),

            // First line may be a header
            None if i == 0 => {}
            None => return Err(i + 1),
        }
    }

    Ok(data)
}
