use std::path::Path;

use powerfit::{points::SamplePoint, sample::SamplingDomain, CurveFit, FitOutput};

const USAGE: &str =
    "Usage: fit_points <path> [degree=N] [start=A] [end=B] [step=S] [format=table|json]";

/// JSON input: either `[[x, y], ...]` or `[{"x": .., "y": .., "label": ..}, ...]`
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Pairs(Vec<(f64, f64)>),
    Points(Vec<SamplePoint>),
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    equation: String,
    properties: powerfit::FitProperties<f64>,
    #[serde(flatten)]
    output: &'a FitOutput,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn parse_arg<T: std::str::FromStr>(key: &str, value: &str) -> T {
    value
        .parse()
        .unwrap_or_else(|_| fail(format!("Invalid {key} value: {value}")))
}

fn main() {
    env_logger::init();

    //
    // First argument is the path to a CSV or JSON file with (x, y) data points.
    let Some(path) = std::env::args().nth(1) else {
        fail(format!(
            "Please provide a path to a CSV or JSON file with (x, y) data points.\n{USAGE}"
        ));
    };
    if path == "help" || path == "--help" || path == "-h" {
        eprintln!("{USAGE}");
        std::process::exit(0);
    }
    let path = Path::new(&path);

    let mut degree = 2;
    let mut domain = SamplingDomain::<f64>::default();
    let mut json_output = false;
    for arg in std::env::args().skip(2) {
        let Some((key, value)) = arg.split_once('=') else {
            fail(format!("Unrecognized argument: {arg}\n{USAGE}"));
        };

        match key {
            "degree" => degree = parse_arg(key, value),
            "start" => domain.start = parse_arg(key, value),
            "end" => domain.end = parse_arg(key, value),
            "step" => domain.step = parse_arg(key, value),
            "format" => match value {
                "table" => json_output = false,
                "json" => json_output = true,
                _ => fail(format!("Unsupported format: {value}")),
            },
            _ => fail(format!("Unrecognized argument: {arg}\n{USAGE}")),
        }
    }

    if let Err(e) = domain.validate() {
        fail(e);
    }

    let Ok(contents) = std::fs::read_to_string(path) else {
        fail(format!("Failed to read file: {}", path.display()));
    };

    let data: Vec<(f64, f64)> = match path.extension().and_then(|s| s.to_str()) {
        Some("csv") => {
            // Simple CSV parser: expects two columns, x and y, with an optional header row.
            let mut lines = contents.lines();
            let mut data = Vec::new();

            fn parse_line(line: &str) -> Option<(f64, f64)> {
                let mut parts = line.split(',').map(str::trim);
                let x = parts.next()?.parse().ok()?;
                let y = parts.next()?.parse().ok()?;
                Some((x, y))
            }

            //
            // First line, if we get a parsing error, we assume it's a header and skip it.
            if let Some(point) = lines.next().and_then(parse_line) {
                data.push(point);
            }

            //
            // The rest we are strict.
            for (i, line) in lines.enumerate() {
                if line.trim().is_empty() {
                    continue;
                }

                match parse_line(line) {
                    Some(point) => data.push(point),
                    None => fail(format!("Failed to parse line {}: {}", i + 2, line)),
                }
            }

            data
        }

        Some("json") => match serde_json::from_str(&contents) {
            Ok(JsonInput::Pairs(pairs)) => pairs,
            Ok(JsonInput::Points(points)) => points.iter().map(SamplePoint::coords).collect(),
            Err(err) => fail(format!("Failed to parse JSON: {err}")),
        },

        _ => fail(format!("Unsupported file format: {}", path.display())),
    };

    log::info!("read {} points from {}", data.len(), path.display());

    let fit = CurveFit::new(&data, degree).unwrap_or_else(|e| fail(e));
    if fit.was_clamped() {
        log::warn!(
            "degree {} needs more points; fitted degree {} instead",
            fit.requested_degree(),
            fit.degree()
        );
    }

    let output = fit.output(&domain);

    if json_output {
        let report = JsonReport {
            equation: fit.equation(),
            properties: fit.properties(),
            output: &output,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => fail(e),
        }
    } else {
        println!("{fit}");
        println!(
            "degree: {} (requested {}), points: {}, R²: {:.4}, RMSE: {:.4}",
            fit.degree(),
            fit.requested_degree(),
            data.len(),
            fit.r_squared(&data),
            fit.root_mean_squared_error()
        );
        println!();
        println!("{:>10} {:>14}", "x", "y");
        for (x, y) in &output.curve {
            println!("{x:>10.3} {y:>14.6}");
        }
    }
}
