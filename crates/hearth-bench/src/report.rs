use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::runner::BenchmarkResult;

/// A saved bench run. Populations are only comparable between runs that
/// used the same ember seed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub seed: u32,
    pub results: Vec<BenchmarkResult>,
}

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("baseline I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("baseline is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a baseline. A missing file is `Ok(None)`; a corrupt one is an error.
pub fn load_baseline(path: &Path) -> Result<Option<Baseline>, BaselineError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&contents)?))
}

pub fn save_baseline(path: &Path, baseline: &Baseline) -> Result<(), BaselineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(baseline)?)?;
    Ok(())
}

/// One way a scene got worse than its baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum Regression {
    /// Mean frame time rose by more than the threshold.
    SlowerFrames { scene: String, pct: f64 },
    /// Same seed, different peak ember count: the simulation changed.
    PeakPopulation { scene: String, baseline: usize, current: usize },
    /// The hard cap had to evict more embers than before.
    MoreEvictions { scene: String, baseline: u64, current: u64 },
}

impl fmt::Display for Regression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regression::SlowerFrames { scene, pct } => {
                write!(f, "{scene}: mean frame time +{pct:.1}%")
            }
            Regression::PeakPopulation {
                scene,
                baseline,
                current,
            } => write!(f, "{scene}: peak embers {baseline} -> {current}"),
            Regression::MoreEvictions {
                scene,
                baseline,
                current,
            } => write!(f, "{scene}: evictions {baseline} -> {current}"),
        }
    }
}

/// Compare a run against a baseline. Timing is checked against
/// `threshold_pct`; population stats are checked exactly, and only when the
/// run used the baseline's seed.
pub fn compare(
    current: &[BenchmarkResult],
    seed: u32,
    baseline: &Baseline,
    threshold_pct: f64,
) -> Vec<Regression> {
    let same_seed = seed == baseline.seed;
    let mut regressions = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            continue;
        };
        let scene = &result.scene_name;

        if base.timings.mean_ms > 0.0 {
            let pct =
                (result.timings.mean_ms - base.timings.mean_ms) / base.timings.mean_ms * 100.0;
            if pct > threshold_pct {
                regressions.push(Regression::SlowerFrames {
                    scene: scene.clone(),
                    pct,
                });
            }
        }

        if !same_seed || base.tick_count != result.tick_count {
            continue;
        }
        if base.population.peak != result.population.peak {
            regressions.push(Regression::PeakPopulation {
                scene: scene.clone(),
                baseline: base.population.peak,
                current: result.population.peak,
            });
        }
        if result.population.evicted > base.population.evicted {
            regressions.push(Regression::MoreEvictions {
                scene: scene.clone(),
                baseline: base.population.evicted,
                current: result.population.evicted,
            });
        }
    }

    regressions
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[BenchmarkResult]) -> String {
    let mut out = String::new();
    out.push_str("| Scene | Ticks | Peak embers | Mean embers | Spawned | Retired | Evicted | Mean (ms) | P95 (ms) | P99 (ms) | Max (ms) |\n");
    out.push_str("|-------|-------|-------------|-------------|---------|---------|---------|-----------|----------|----------|----------|\n");

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {:.1} | {} | {} | {} | {:.3} | {:.3} | {:.3} | {:.3} |\n",
            r.scene_name,
            r.tick_count,
            r.population.peak,
            r.population.mean,
            r.population.spawned,
            r.population.retired,
            r.population.evicted,
            r.timings.mean_ms,
            r.timings.p95_ms,
            r.timings.p99_ms,
            r.timings.max_ms,
        ));
    }

    out
}

pub fn format_comparison(regressions: &[Regression], threshold_pct: f64) -> String {
    if regressions.is_empty() {
        return format!(
            "All scenes within {threshold_pct:.0}% timing threshold with matching ember populations.\n"
        );
    }

    let mut out = format!("REGRESSIONS DETECTED ({}):\n", regressions.len());
    for regression in regressions {
        out.push_str(&format!("  - {regression}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{compute_timings, PopulationStats};

    fn result(name: &str, mean_ms: f64) -> BenchmarkResult {
        BenchmarkResult {
            scene_name: name.to_string(),
            tick_count: 100,
            population: PopulationStats::default(),
            timings: compute_timings(&[mean_ms]),
        }
    }

    fn with_population(mut r: BenchmarkResult, peak: usize, evicted: u64) -> BenchmarkResult {
        r.population.peak = peak;
        r.population.evicted = evicted;
        r
    }

    fn baseline(seed: u32, results: Vec<BenchmarkResult>) -> Baseline {
        Baseline {
            timestamp: "t".into(),
            seed,
            results,
        }
    }

    #[test]
    fn test_compare_flags_slow_frames_only_past_threshold() {
        let base = baseline(1, vec![result("a", 1.0), result("b", 1.0), result("zero", 0.0)]);
        let current = [
            result("a", 1.05),
            result("b", 1.5),
            result("zero", 1.0),
            result("new", 9.0),
        ];
        let regressions = compare(&current, 1, &base, 10.0);
        assert_eq!(regressions.len(), 1);
        match &regressions[0] {
            Regression::SlowerFrames { scene, pct } => {
                assert_eq!(scene, "b");
                assert!((pct - 50.0).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_compare_flags_population_changes_with_same_seed() {
        let base = baseline(7, vec![with_population(result("desktop", 1.0), 30, 0)]);
        let current = [with_population(result("desktop", 1.0), 31, 2)];
        let regressions = compare(&current, 7, &base, 10.0);
        assert_eq!(
            regressions,
            [
                Regression::PeakPopulation {
                    scene: "desktop".into(),
                    baseline: 30,
                    current: 31
                },
                Regression::MoreEvictions {
                    scene: "desktop".into(),
                    baseline: 0,
                    current: 2
                },
            ]
        );
    }

    #[test]
    fn test_compare_ignores_population_across_seeds() {
        let base = baseline(7, vec![with_population(result("desktop", 1.0), 30, 0)]);
        let current = [with_population(result("desktop", 1.0), 12, 5)];
        assert!(compare(&current, 8, &base, 10.0).is_empty());
    }

    #[test]
    fn test_fewer_evictions_is_not_a_regression() {
        let base = baseline(7, vec![with_population(result("mobile", 1.0), 31, 4)]);
        let current = [with_population(result("mobile", 1.0), 31, 1)];
        assert!(compare(&current, 7, &base, 10.0).is_empty());
    }

    #[test]
    fn test_markdown_has_row_per_scene() {
        let table = format_markdown(&[result("desktop", 0.5), result("mobile", 0.25)]);
        assert_eq!(table.lines().count(), 4);
        assert!(table.contains("| desktop | 100 |"));
    }

    #[test]
    fn test_baseline_on_disk() {
        let dir = std::env::temp_dir().join(format!("hearth-bench-{}", std::process::id()));
        let path = dir.join("baseline.json");
        save_baseline(&path, &baseline(42, vec![result("desktop", 0.5)])).unwrap();
        let loaded = load_baseline(&path).unwrap().expect("baseline was just saved");
        assert_eq!(loaded.seed, 42);
        assert_eq!(loaded.results[0].scene_name, "desktop");

        assert!(load_baseline(&dir.join("missing.json")).unwrap().is_none());

        let corrupt = dir.join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(load_baseline(&corrupt), Err(BaselineError::Json(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_comparison_text() {
        assert!(format_comparison(&[], 10.0).contains("matching ember populations"));
        let text = format_comparison(
            &[
                Regression::SlowerFrames {
                    scene: "mobile".into(),
                    pct: 12.5,
                },
                Regression::MoreEvictions {
                    scene: "4k".into(),
                    baseline: 0,
                    current: 3,
                },
            ],
            10.0,
        );
        assert!(text.starts_with("REGRESSIONS DETECTED (2)"));
        assert!(text.contains("mobile: mean frame time +12.5%"));
        assert!(text.contains("4k: evictions 0 -> 3"));
    }
}
