//! Command line entry point.
//!
//! Usage:
//!   echo-shaper run --beatmap map.json --replay play.json [--config engine.toml] [--json]
//!   echo-shaper generate --out map.json [--seed 7] [--notes 40] [--poses FIST,OPEN,V]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use echo_shaper::logic::{ReplayEngine, ReplayOutcome};
use echo_shaper::models::engine::{generate_beatmap, load_beatmap};
use echo_shaper::models::replay::load_replay;
use echo_shaper::models::settings::{EngineSettings, load_settings};
use echo_shaper::models::stats::{HitStats, Judgement};
use echo_shaper::shared::messages::JudgementEvent;

#[derive(Parser, Debug)]
#[command(
    name = "echo-shaper",
    version,
    about = "Gesture rhythm judgement engine: replay and beatmap tools"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replays recorded input against a beatmap and prints the judgements
    Run {
        /// Beatmap JSON file
        #[arg(short, long)]
        beatmap: PathBuf,

        /// Replay JSON file
        #[arg(short, long)]
        replay: PathBuf,

        /// Engine settings TOML file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Writes a random beatmap
    Generate {
        /// Output JSON file
        #[arg(short, long)]
        out: PathBuf,

        #[arg(short, long, default_value_t = 0)]
        seed: u64,

        /// Number of notes
        #[arg(short, long, default_value_t = 40)]
        notes: usize,

        /// Comma separated target poses (FIST,OPEN,V when omitted)
        #[arg(short, long, value_delimiter = ',')]
        poses: Vec<String>,
    },
}

#[derive(Serialize)]
struct RunReport<'a> {
    events: &'a [JudgementEvent],
    stats: &'a HitStats,
    score: u32,
    max_combo: u32,
    finished: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Run {
            beatmap,
            replay,
            config,
            json,
        } => run(beatmap, replay, config, json),
        Command::Generate {
            out,
            seed,
            notes,
            poses,
        } => generate(out, seed, notes, poses),
    }
}

fn run(beatmap: PathBuf, replay: PathBuf, config: Option<PathBuf>, json: bool) -> Result<()> {
    let settings = match config {
        Some(path) => load_settings(&path)
            .with_context(|| format!("Invalid settings file {}", path.display()))?,
        None => EngineSettings::default(),
    };
    let beatmap = load_beatmap(&beatmap)
        .with_context(|| format!("Invalid beatmap {}", beatmap.display()))?;
    let replay =
        load_replay(&replay).with_context(|| format!("Invalid replay {}", replay.display()))?;

    log::info!(
        "MAIN: Replaying {} frames over {} notes",
        replay.frames.len(),
        beatmap.len()
    );
    let outcome = ReplayEngine::replay_fast(&beatmap, replay, &settings)?;

    if json {
        let report = RunReport {
            events: &outcome.events,
            stats: &outcome.stats,
            score: outcome.score,
            max_combo: outcome.max_combo,
            finished: outcome.finished,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &ReplayOutcome) {
    for event in &outcome.events {
        println!(
            "{:>9.3}s  {:<5} {:<6} {:<8} {}{}",
            event.time,
            event.note_type.as_str(),
            event.note_id,
            event.target_gesture,
            event.grade,
            if event.terminal { "" } else { " (sustain)" }
        );
    }

    println!();
    for grade in [
        Judgement::Perfect,
        Judgement::Great,
        Judgement::Miss,
        Judgement::HoldStartMiss,
        Judgement::HoldBreak,
        Judgement::HoldSuccess,
        Judgement::SwipeBreak,
        Judgement::SwipeSuccess,
    ] {
        let count = outcome.stats.count(grade);
        if count > 0 {
            println!("{:<16} {}", grade, count);
        }
    }
    println!("Score: {}  Max combo: {}", outcome.score, outcome.max_combo);
    if !outcome.finished {
        println!("Replay ended with unresolved notes");
    }
}

fn generate(out: PathBuf, seed: u64, notes: usize, poses: Vec<String>) -> Result<()> {
    // Empty falls back to the default poses.
    let beatmap = generate_beatmap(seed, &poses, notes)?;
    let json = beatmap.to_json()?;
    fs::write(&out, json).with_context(|| format!("Failed to write {}", out.display()))?;

    log::info!(
        "MAIN: Wrote {} notes to {} (seed {})",
        beatmap.len(),
        out.display(),
        seed
    );
    Ok(())
}
