// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};
use rangegroup::{
    group::RangeGroup,
    options::{DiffOptions, Filter},
};
use rangegroup_core::domains::RealDomain;
use serde::Serialize;
use std::{env, error::Error, fs::File, hint::black_box, io::BufWriter, time::Instant};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Reals = RangeGroup<RealDomain>;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT | FmtSpan::CLOSE)
        .init();
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize)]
struct CutoffResult {
    cutoff: usize,
    total_ms: f64,
    mean_ns_per_diff: f64,
    output_ranges: usize,
}

#[derive(Debug, Clone, Serialize)]
struct CutoffReport {
    description: String,
    seed: u64,
    samples: usize,
    max_ranges: usize,
    coverage: f64,
    results: Vec<CutoffResult>,
    fastest_cutoff: Option<usize>,
}

/// Up to `max_ranges` disjoint ranges inside `[0, 1]`, covering roughly
/// `coverage` of it, with exponentially distributed widths and gaps.
fn random_group<R: Rng + ?Sized>(
    rng: &mut R,
    max_ranges: usize,
    coverage: f64,
) -> Result<Reals, Box<dyn Error>> {
    let n = rng.random_range(0..=max_ranges);
    if n == 0 {
        return Ok(RangeGroup::empty(RealDomain));
    }
    let widths = Exp::new(n as f64 / coverage)?;
    let gaps = Exp::new(n as f64 / (1.0 - coverage))?;
    let mut pairs = Vec::with_capacity(n);
    let mut at = gaps.sample(rng);
    for _ in 0..n {
        let width = widths.sample(rng);
        if at + width > 1.0 {
            break;
        }
        pairs.push((at, at + width));
        at += width + gaps.sample(rng).max(f64::MIN_POSITIVE);
    }
    Ok(RangeGroup::new(RealDomain, pairs))
}

#[instrument(level = "debug", skip(pairs))]
fn run_cutoff(pairs: &[(Reals, Reals)], cutoff: usize) -> CutoffResult {
    let opts = DiffOptions::new(Filter::UNION)
        .track_sources(true)
        .interpolation_cutoff(cutoff);
    let mut output_ranges = 0usize;
    let t0 = Instant::now();
    for (a, b) in pairs {
        let res = black_box(a.to_diff(b, &opts));
        output_ranges += res.len();
    }
    let elapsed = t0.elapsed();
    let total_ns = elapsed.as_nanos() as f64;
    debug!(output_ranges, "diffs done");
    CutoffResult {
        cutoff,
        total_ms: total_ns / 1e6,
        mean_ns_per_diff: total_ns / pairs.len().max(1) as f64,
        output_ranges,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    enable_tracing();

    let seed: u64 = env_or("RANGEGROUP_BENCH_SEED", 0xC0FF_EE);
    let samples: usize = env_or("RANGEGROUP_BENCH_SAMPLES", 20_000);
    let max_ranges: usize = env_or("RANGEGROUP_BENCH_MAX_RANGES", 20);
    let coverage: f64 = env_or("RANGEGROUP_BENCH_COVERAGE", 0.5_f64).clamp(0.01, 0.99);
    let max_cutoff: usize = env_or("RANGEGROUP_BENCH_MAX_CUTOFF", 25);
    let out_path: String = env_or("RANGEGROUP_BENCH_OUT", "cutoff_results.json".to_string());

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let pairs = (0..samples)
        .map(|_| {
            Ok((
                random_group(&mut rng, max_ranges, coverage)?,
                random_group(&mut rng, max_ranges, coverage)?,
            ))
        })
        .collect::<Result<Vec<_>, Box<dyn Error>>>()?;
    info!(samples, max_ranges, coverage, "generated operand pairs");

    let mut results = Vec::with_capacity(max_cutoff + 1);
    for cutoff in 0..=max_cutoff {
        let result = run_cutoff(&pairs, cutoff);
        info!(
            cutoff,
            mean_ns = result.mean_ns_per_diff,
            "cutoff measured"
        );
        results.push(result);
    }

    let fastest_cutoff = results
        .iter()
        .min_by(|a, b| a.mean_ns_per_diff.total_cmp(&b.mean_ns_per_diff))
        .map(|r| r.cutoff);

    let report = CutoffReport {
        description: "Tracked union of random real range groups, timed per interpolation cutoff."
            .into(),
        seed,
        samples,
        max_ranges,
        coverage,
        results,
        fastest_cutoff,
    };

    let file = File::create(&out_path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;

    println!();
    println!("=================================================================");
    println!("===================== Cutoff Benchmark Done =====================");
    println!("=================================================================");
    println!();
    if let Some(cutoff) = fastest_cutoff {
        println!("Fastest cutoff: {}", cutoff);
    }
    println!("Wrote: {}", out_path);
    Ok(())
}
