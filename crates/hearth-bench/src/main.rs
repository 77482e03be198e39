use std::path::{Path, PathBuf};
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use hearth_bench::report;
use hearth_bench::runner::BenchmarkRunner;
use hearth_bench::scenes;
use hearth_rules::EffectParams;

const DEFAULT_SEED: u32 = 0x4845_4152; // "HEAR"

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut config_dir: Option<PathBuf> = None;
    let mut regression_threshold = 10.0f64;
    let mut tick_count = 3600u32;
    let mut seed = DEFAULT_SEED;
    let mut scene_names: Vec<String> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                baseline_path = Some(PathBuf::from(value_for(&args, &mut i)));
            }
            "--output" => {
                output_path = Some(PathBuf::from(value_for(&args, &mut i)));
            }
            "--config-dir" => {
                config_dir = Some(PathBuf::from(value_for(&args, &mut i)));
            }
            "--regression-threshold" => {
                regression_threshold = parse_or_exit(value_for(&args, &mut i), "--regression-threshold");
            }
            "--ticks" => {
                tick_count = parse_or_exit(value_for(&args, &mut i), "--ticks");
            }
            "--seed" => {
                seed = parse_or_exit(value_for(&args, &mut i), "--seed");
            }
            "--scene" => {
                scene_names.push(value_for(&args, &mut i).to_string());
            }
            "--help" | "-h" => {
                eprintln!("Usage: bench-runner [OPTIONS]");
                eprintln!("  --baseline <path>              Load baseline JSON for comparison");
                eprintln!("  --output <path>                Save current results as JSON baseline");
                eprintln!("  --config-dir <dir>             Read sky.ron and embers.ron from <dir>");
                eprintln!(
                    "  --regression-threshold <pct>   Regression threshold percentage (default: 10)"
                );
                eprintln!("  --ticks <n>                    Ticks per scene (default: 3600)");
                eprintln!("  --seed <n>                     Ember RNG seed");
                eprintln!("  --scene <name>                 Run only this scene (repeatable)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let params = match load_params(config_dir.as_deref()) {
        Ok(params) => params,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let scene_configs = match scenes::select_scenes(&scene_names) {
        Ok(scenes) => scenes,
        Err(name) => {
            eprintln!("Unknown scene: {name}");
            process::exit(1);
        }
    };

    let runner = BenchmarkRunner::new(params, tick_count, seed);
    let results: Vec<_> = scene_configs
        .iter()
        .map(|config| runner.run_scene(config))
        .collect();

    // Print markdown summary
    println!("\n## Benchmark Results\n");
    println!("{}", report::format_markdown(&results));

    // Save output baseline
    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: bench_timestamp(),
            seed,
            results: results.clone(),
        };
        match report::save_baseline(path, &baseline) {
            Ok(()) => log::info!("Saved baseline to {}", path.display()),
            Err(e) => {
                log::error!("Failed to save baseline to {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    // Compare against baseline
    if let Some(ref path) = baseline_path {
        match report::load_baseline(path) {
            Ok(Some(baseline)) => {
                if baseline.seed != seed {
                    log::warn!(
                        "Baseline seed {} differs from current seed {}; comparing timings only",
                        baseline.seed,
                        seed
                    );
                }
                let regressions = report::compare(&results, seed, &baseline, regression_threshold);
                println!(
                    "{}",
                    report::format_comparison(&regressions, regression_threshold)
                );
                if !regressions.is_empty() {
                    eprintln!(
                        "ERROR: {} regressions detected, exiting with code 1",
                        regressions.len()
                    );
                    process::exit(1);
                }
            }
            Ok(None) => log::warn!("Baseline file not found: {}", path.display()),
            Err(e) => {
                log::error!("Failed to read baseline {}: {e}", path.display());
                process::exit(1);
            }
        }
    }

    log::info!("Benchmark complete.");
}

/// Advance past a flag and return its value, exiting if it is missing.
fn value_for<'a>(args: &'a [String], i: &mut usize) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value,
        None => {
            eprintln!("Missing value for {}", args[*i - 1]);
            process::exit(1);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {flag} value: {value}");
        process::exit(1);
    })
}

/// Built-in config, or `sky.ron` + `embers.ron` from a directory.
fn load_params(dir: Option<&Path>) -> Result<EffectParams, String> {
    let Some(dir) = dir else {
        return hearth_rules::load_default_params().map_err(|e| e.to_string());
    };
    let read = |name: &str| {
        let path = dir.join(name);
        std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))
    };
    let sky = read("sky.ron")?;
    let embers = read("embers.ron")?;
    hearth_rules::load_effect_params(&sky, &embers).map_err(|e| e.to_string())
}

/// Seconds since the epoch, tagged for the baseline file.
fn bench_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("bench-{secs}")
}
