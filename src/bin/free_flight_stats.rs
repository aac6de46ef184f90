// Copyright @yucwang 2026

use dacquoise_media::core::computation_node::ComputationNode;
use dacquoise_media::core::medium::Medium;
use dacquoise_media::core::medium_loader::load_medium;
use dacquoise_media::core::rng::LcgRng;
use dacquoise_media::math::constants::{Float, Vector3f};
use dacquoise_media::math::ray::Ray3f;
use dacquoise_media::math::spectrum::RGBSpectrum;

use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

const RAYS_PER_BATCH: usize = 4096;
const MAX_STEPS: usize = 10_000;

#[derive(Clone)]
struct BatchStats {
    rays: u64,
    missed: u64,
    escaped: u64,
    collided: u64,
    null_collisions: u64,
    distance_sum: f64,
    histogram: Vec<u64>,
}

impl BatchStats {
    fn new(bins: usize) -> Self {
        Self {
            rays: 0,
            missed: 0,
            escaped: 0,
            collided: 0,
            null_collisions: 0,
            distance_sum: 0.0,
            histogram: vec![0; bins],
        }
    }

    fn merge(&mut self, other: &BatchStats) {
        self.rays += other.rays;
        self.missed += other.missed;
        self.escaped += other.escaped;
        self.collided += other.collided;
        self.null_collisions += other.null_collisions;
        self.distance_sum += other.distance_sum;
        for (a, b) in self.histogram.iter_mut().zip(other.histogram.iter()) {
            *a += *b;
        }
    }
}

struct Settings {
    rays: usize,
    seed: u64,
    bins: usize,
    max_distance: Float,
    origin: Vector3f,
    dir: Vector3f,
}

/// Delta-tracks one ray to its first real collision, counting null events.
fn track(medium: &dyn Medium<3>, settings: &Settings, rng: &mut LcgRng, stats: &mut BatchStats) {
    stats.rays += 1;
    let mut ray = Ray3f::new(settings.origin, settings.dir, None, None);
    let throughput = RGBSpectrum::one();

    for _ in 0..MAX_STEPS {
        let channel = if medium.has_spectral_extinction() { rng.next_u32() % 3 } else { 0 };
        let mi = medium.sample_interaction(&ray, rng.next_f32(), channel, true);
        if !mi.is_valid() {
            stats.missed += 1;
            return;
        }
        if !mi.active() {
            stats.escaped += 1;
            return;
        }

        let radiance = medium.get_radiance(&mi, true);
        let (_, (prob_s, prob_n)) = medium.get_interaction_probabilities(&radiance, &mi, &throughput);
        let c = channel as usize;
        let total = prob_s[c] + prob_n[c];
        let prob_real = if total > 0.0 { prob_s[c] / total } else { 1.0 };

        if rng.next_f32() < prob_real {
            let distance = mi.t();
            stats.collided += 1;
            stats.distance_sum += distance as f64;
            let bin = (distance / settings.max_distance * settings.bins as Float) as usize;
            if bin < stats.histogram.len() {
                stats.histogram[bin] += 1;
            }
            return;
        }

        stats.null_collisions += 1;
        ray.advance_to(mi.t());
    }
    log::warn!("ray exceeded {} tracking steps", MAX_STEPS);
}

fn parse_vec3(value: &str) -> Option<Vector3f> {
    let parts: Vec<Float> = value
        .split(',')
        .map(|s| s.trim().parse::<Float>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        [x, y, z] => Some(Vector3f::new(*x, *y, *z)),
        _ => None,
    }
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <medium.xml> [--rays N] [--seed N] [--bins N] [--max-distance D] [--origin x,y,z] [--dir x,y,z]", args[0]);
        std::process::exit(1);
    }

    let mut settings = Settings {
        rays: 100_000,
        seed: 0,
        bins: 20,
        max_distance: 10.0,
        origin: Vector3f::zeros(),
        dir: Vector3f::new(0.0, 0.0, 1.0),
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--rays" => {
                i += 1;
                settings.rays = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(settings.rays);
            }
            "--seed" => {
                i += 1;
                settings.seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(0);
            }
            "--bins" => {
                i += 1;
                settings.bins = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(settings.bins).max(1);
            }
            "--max-distance" => {
                i += 1;
                settings.max_distance = args.get(i).and_then(|v| v.parse::<Float>().ok()).unwrap_or(settings.max_distance);
            }
            "--origin" => {
                i += 1;
                settings.origin = args.get(i).and_then(|v| parse_vec3(v)).unwrap_or(settings.origin);
            }
            "--dir" => {
                i += 1;
                settings.dir = args.get(i).and_then(|v| parse_vec3(v)).unwrap_or(settings.dir);
            }
            other => log::warn!("Ignoring unknown argument {}", other),
        }
        i += 1;
    }
    if settings.dir.norm() <= 0.0 || !(settings.max_distance > 0.0) {
        eprintln!("--dir must be non-zero and --max-distance positive");
        std::process::exit(1);
    }

    let medium = match load_medium::<3>(Path::new(&args[1])) {
        Ok(medium) => medium,
        Err(err) => {
            eprintln!("failed to load medium: {}", err);
            std::process::exit(1);
        }
    };
    log::info!("{}", medium.to_string());

    let total_batches = (settings.rays + RAYS_PER_BATCH - 1) / RAYS_PER_BATCH;
    let progress = ProgressBar::new(total_batches as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} batches")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let next_batch = AtomicUsize::new(0);
    let thread_count = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let (tx, rx) = mpsc::channel::<BatchStats>();
    let mut stats = BatchStats::new(settings.bins);
    let medium_ref: &dyn Medium<3> = medium.as_ref();
    let settings_ref = &settings;
    let next_batch_ref = &next_batch;

    thread::scope(|scope| {
        for _ in 0..thread_count {
            let tx = tx.clone();
            scope.spawn(move || {
                loop {
                    let batch_index = next_batch_ref.fetch_add(1, Ordering::Relaxed);
                    if batch_index >= total_batches {
                        break;
                    }
                    let first = batch_index * RAYS_PER_BATCH;
                    let count = RAYS_PER_BATCH.min(settings_ref.rays - first);
                    let mut rng = LcgRng::new(((settings_ref.seed & 0xFFFF_FFFF) << 32) | batch_index as u64);
                    let mut batch = BatchStats::new(settings_ref.bins);
                    for _ in 0..count {
                        track(medium_ref, settings_ref, &mut rng, &mut batch);
                    }
                    if tx.send(batch).is_err() {
                        break;
                    }
                }
            });
        }

        drop(tx);
        for _ in 0..total_batches {
            if let Ok(batch) = rx.recv() {
                stats.merge(&batch);
                progress.inc(1);
            }
        }
    });
    progress.finish_and_clear();

    let rays = stats.rays.max(1) as f64;
    println!("medium            : {}", medium.id());
    println!("sampling mode     : {}", medium.sampling_mode());
    println!("rays              : {}", stats.rays);
    println!("missed support    : {:.4}", stats.missed as f64 / rays);
    println!("escaped           : {:.4}", stats.escaped as f64 / rays);
    println!("real collisions   : {:.4}", stats.collided as f64 / rays);
    println!("null per ray      : {:.4}", stats.null_collisions as f64 / rays);
    if stats.collided > 0 {
        println!("mean free path    : {:.5}", stats.distance_sum / stats.collided as f64);
    }

    let bin_width = settings.max_distance / settings.bins as Float;
    let peak = stats.histogram.iter().copied().max().unwrap_or(0).max(1);
    for (bin, count) in stats.histogram.iter().enumerate() {
        let bar = "#".repeat((*count as f64 / peak as f64 * 50.0) as usize);
        println!("[{:8.3}, {:8.3}) {:8} {}", bin as Float * bin_width, (bin + 1) as Float * bin_width, count, bar);
    }
}
