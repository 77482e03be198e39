use std::time::Instant;

use hearth_render::ember_painter::EmberPainter;
use hearth_render::pixel_canvas::PixelCanvas;
use hearth_render::surface::{DrawSurface, RgbaSurface};
use hearth_rules::EffectParams;
use hearth_sim::events::HostEvent;
use hearth_sim::frame_loop::FrameLoop;
use hearth_sim::rng::SimRng;
use hearth_sim::scene::EffectScene;

use crate::scenes::SceneConfig;

/// Synthetic frame interval fed to the frame loop (60 Hz).
const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Ember population over a run.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct PopulationStats {
    pub peak: usize,
    pub mean: f64,
    pub spawned: u64,
    pub retired: u64,
    pub evicted: u64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub tick_count: u32,
    pub population: PopulationStats,
    pub timings: TimingSeries,
}

/// Runs scenes headlessly on the CPU: sky sample, gradient render, ember tick
/// and ember paint per frame, all on software surfaces.
pub struct BenchmarkRunner {
    params: EffectParams,
    tick_count: u32,
    seed: u32,
}

impl BenchmarkRunner {
    pub fn new(params: EffectParams, tick_count: u32, seed: u32) -> Self {
        Self {
            params,
            tick_count,
            seed,
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, config: &SceneConfig) -> BenchmarkResult {
        log::info!(
            "Running scene '{}' ({}x{}, document {}px)...",
            config.name,
            config.width,
            config.height,
            config.document_height
        );

        let viewport = config.viewport();
        let mut scene = EffectScene::new(
            &self.params.sky,
            self.params.embers.clone(),
            viewport,
            SimRng::new(self.seed),
        );
        scene.apply(HostEvent::SetMode(config.mode.to_string()));

        let mut sky = PixelCanvas::square(self.params.sky.buffer_size);
        let (width, height) = viewport.surface_size();
        let mut overlay = RgbaSurface::new(width, height);
        let painter = EmberPainter::new(self.params.embers.pixel_scale);

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut population = PopulationStats::default();
        let mut population_sum = 0usize;

        let mut frame_loop = FrameLoop::new(config.name);
        let mut remaining = self.tick_count;
        let mut clock = 0.0;
        frame_loop.run(
            || {
                remaining = remaining.checked_sub(1)?;
                clock += FRAME_INTERVAL_MS;
                Some(clock)
            },
            |now, _| {
                let frame_start = Instant::now();

                sky.render_checkpoint(scene.sample_sky(now));
                let report = scene.tick_embers();
                painter.draw(&mut overlay, scene.field().embers(), scene.viewport());

                frame_times.push(frame_start.elapsed().as_secs_f64() * 1000.0);

                let live = scene.field().len();
                population.peak = population.peak.max(live);
                population_sum += live;
                population.spawned += u64::from(report.spawned);
                population.retired += report.retired as u64;
                population.evicted += report.evicted as u64;
            },
        );

        if !frame_times.is_empty() {
            population.mean = population_sum as f64 / frame_times.len() as f64;
        }
        let timings = compute_timings(&frame_times);
        log::info!(
            "  Done: mean={:.3}ms, p95={:.3}ms, peak embers={}, overlay {:?}",
            timings.mean_ms,
            timings.p95_ms,
            population.peak,
            overlay.size()
        );
        log::debug!("  Final stats: {:?}", scene.stats());

        BenchmarkResult {
            scene_name: config.name.to_string(),
            tick_count: frame_times.len() as u32,
            population,
            timings,
        }
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
