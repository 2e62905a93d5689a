use std::{io::BufReader, path::Path};

use curvefit::{
    display::{format_value, DEFAULT_PRECISION},
    sample::DEFAULT_PLOT_BUFFER,
    Axis, CurveModel, FitMode, FitOutcome, Sample, Session, DEFAULT_CURVE_POINTS,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: curvefit <path> [mode=polynomial|exponential|log|distribution] [degree=<n>] [axis=x|y]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    //
    // First argument is the path to a CSV or JSON file with (x, y) data points.
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("Please provide a path to a CSV or JSON file with (x, y) data points.");
        eprintln!("{USAGE}");
        std::process::exit(1);
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }
    let path = Path::new(&path);

    let mut mode = "polynomial".to_string();
    let mut degree = 1;
    let mut axis = Axis::X;
    for arg in std::env::args().skip(2) {
        if let Some(option) = arg.strip_prefix("mode=") {
            mode = option.to_string();
        } else if let Some(option) = arg.strip_prefix("degree=") {
            degree = str::parse::<usize>(option).unwrap_or_else(|_| {
                eprintln!("Invalid degree value: {option}");
                std::process::exit(1);
            });
        } else if let Some(option) = arg.strip_prefix("axis=") {
            axis = match option {
                "x" => Axis::X,
                "y" => Axis::Y,
                _ => {
                    eprintln!("Invalid axis value: {option}");
                    std::process::exit(1);
                }
            };
        } else if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        } else {
            eprintln!("Unrecognized argument: {arg}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }

    let mode = match mode.as_str() {
        "polynomial" => FitMode::Polynomial { degree },
        "exponential" => FitMode::Exponential,
        "log" => FitMode::NaturalLogarithmic,
        "distribution" => FitMode::StatisticalDistribution(axis),
        _ => {
            eprintln!("Unsupported mode: {mode}");
            std::process::exit(1);
        }
    };

    let sample = load_sample(path).unwrap_or_else(|err| {
        eprintln!("Failed to load {}: {err}", path.display());
        std::process::exit(1);
    });

    let session = Session::with_sample(sample, mode);
    let outcome = session.fit().unwrap_or_else(|err| {
        eprintln!("Failed to fit {mode}: {err}");
        std::process::exit(1);
    });

    report(&session, &outcome);
}

fn load_sample(path: &Path) -> curvefit::Result<Sample> {
    let file = std::fs::File::open(path)?;
    match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => Sample::read_csv(BufReader::new(file)),
        Some("json") => {
            let points: Vec<(f64, f64)> = serde_json::from_reader(BufReader::new(file))
                .map_err(|err| curvefit::Error::InvalidInput(format!("invalid JSON: {err}")))?;
            let mut sample = Sample::default();
            sample.extend(points)?;
            Ok(sample)
        }
        _ => Err(curvefit::Error::InvalidInput(
            "unsupported file format, expected .csv or .json".to_string(),
        )),
    }
}

fn report(session: &Session, outcome: &FitOutcome) {
    let p = DEFAULT_PRECISION;
    println!("Mode: {}", session.mode());
    println!("Points: {}", session.sample().len());

    if let Some(curve) = outcome.curve() {
        let stats = curve.error_stats();
        println!("{}", curve.equation());
        println!("Max error: {}", format_value(stats.max_abs_error, p));
        println!("Min error: {}", format_value(stats.min_abs_error, p));
        println!("Mean absolute error: {}", format_value(stats.mean_abs_error, p));

        if let Some(range) = session.sample().plot_range(DEFAULT_PLOT_BUFFER) {
            let band = curve.error_band(range, DEFAULT_CURVE_POINTS);
            if let (Some(first), Some(last)) = (band.first(), band.last()) {
                println!(
                    "Error band: {} points from x = {} to x = {}",
                    band.len(),
                    format_value(first.x, p),
                    format_value(last.x, p)
                );
            }
        }
    }

    if let Some(summary) = outcome.distribution() {
        println!(
            "Mean: {} | Standard Deviation: {}",
            format_value(summary.mean, p),
            format_value(summary.std_dev, p)
        );

        let hist = &summary.histogram;
        for (edge, count) in hist.edges.iter().zip(&hist.counts) {
            println!(
                "  [{}, {}) {count}",
                format_value(*edge, p),
                format_value(edge + hist.bin_width, p)
            );
        }
    }
}
