//! Example: Decode a single audio file
//!
//! Usage:
//!   cargo run --example decode_file -- [--channels N] [--samples N] [--mp3] [--json] <file>
//!
//! `--channels` and `--samples` accept `-1` for "leave unchanged".

use std::env;

use stratum_decode::{decode, decode_mp3, DecodeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut channels: i64 = -1;
    let mut samples: i64 = -1;
    let mut mp3_only = false;
    let mut json = false;
    let mut path: Option<String> = None;

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--channels" => {
                channels = args.first().ok_or("--channels requires a value")?.parse()?;
                args.remove(0);
            }
            "--samples" => {
                samples = args.first().ok_or("--samples requires a value")?.parse()?;
                args.remove(0);
            }
            "--mp3" => mp3_only = true,
            "--json" => json = true,
            "--help" | "-h" => {
                eprintln!(
                    "Usage: decode_file [--channels N] [--samples N] [--mp3] [--json] <file>\n\
                     \n\
                     --channels N   Output channel count (-1 = as decoded)\n\
                     --samples N    Output samples per channel (-1 = as decoded)\n\
                     --mp3          Reject anything that is not MP3\n\
                     --json         Emit a JSON summary\n"
                );
                return Ok(());
            }
            _ => path = Some(a),
        }
    }

    let Some(path) = path else {
        eprintln!("ERROR: Provide an audio file path. Use --help for usage.");
        std::process::exit(2);
    };

    let contents = std::fs::read(&path)?;
    let config = DecodeConfig::from_sentinels(channels, samples);

    let audio = if mp3_only {
        decode_mp3(&contents, &config)?
    } else {
        decode(&contents, &config)?
    };

    if json {
        println!("{}", serde_json::to_string(&audio.info())?);
        return Ok(());
    }

    println!("Decoded {}:", path);
    println!("  Shape: [{}, {}]", audio.channels(), audio.samples());
    println!("  Sample rate: {} Hz", audio.sample_rate());
    println!("  Duration: {:.3} s", audio.duration_seconds());
    for (idx, row) in audio.channels_iter().enumerate() {
        let peak = row.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
        println!("  Channel {}: peak={}", idx, peak);
    }

    Ok(())
}
