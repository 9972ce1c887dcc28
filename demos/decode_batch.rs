//! Example: Decode multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example decode_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each file is decoded on a single thread.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use std::env;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use stratum_decode::{decode, AudioInfo, DecodeConfig};

#[derive(Serialize)]
struct ItemOut {
    file: String,
    #[serde(flatten)]
    info: Option<AudioInfo>,
    decode_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn decode_path(path: &str, config: &DecodeConfig) -> ItemOut {
    let t0 = Instant::now();
    let result = std::fs::read(path)
        .map_err(|e| format!("read failed: {e}"))
        .and_then(|bytes| decode(&bytes, config).map_err(|e| format!("decode failed: {e}")));
    let decode_time_ms = t0.elapsed().as_secs_f64() * 1000.0;

    match result {
        Ok(audio) => ItemOut {
            file: path.to_string(),
            info: Some(audio.info()),
            decode_time_ms,
            error: None,
        },
        Err(e) => ItemOut {
            file: path.to_string(),
            info: None,
            decode_time_ms,
            error: Some(e),
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: decode_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = DecodeConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> =
        pool.install(|| paths.par_iter().map(|p| decode_path(p, &config)).collect());

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.info, &o.error) {
            (Some(info), _) => println!(
                "[{}/{}] {}: {}ch x {} @ {} Hz ({:.2}s) time={:.2}ms",
                idx + 1,
                outs.len(),
                o.file,
                info.channels,
                info.samples,
                info.sample_rate,
                info.duration_seconds,
                o.decode_time_ms
            ),
            (None, error) => println!(
                "[{}/{}] {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.file,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let ok = outs.iter().filter(|o| o.info.is_some()).count();
    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok,
        outs.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
