//! Replay engine for frame-perfect replay reproduction.
//!
//! This engine replays a saved ReplayData by feeding each recorded input frame
//! back into a GameEngine at the same game time, so the judgements, score and
//! combo come out identical to the recorded play.

use crate::input::InputFrame;
use crate::models::engine::Beatmap;
use crate::models::error::EngineError;
use crate::models::replay::{ReplayData, ReplayFrame};
use crate::models::settings::EngineSettings;
use crate::models::stats::{HitStats, ScoreKeeper};
use crate::shared::messages::{JudgementEvent, Tee};
use crate::shared::snapshot::GameplaySnapshot;
use crate::state::GameEngine;

/// Tick length used once the recorded frames run out.
pub const TAIL_DT: f64 = 1.0 / 60.0;

/// Upper bound on the empty-input ticks after the last frame (10 minutes).
const MAX_TAIL_TICKS: u32 = 36_000;

/// Everything a replay produced.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub events: Vec<JudgementEvent>,
    pub stats: HitStats,
    pub score: u32,
    pub max_combo: u32,
    /// Every note reached its terminal outcome.
    pub finished: bool,
}

/// Engine that replays recorded input frames into a GameEngine.
pub struct ReplayEngine {
    /// The game engine that processes the replay
    engine: GameEngine,
    /// Replay frames sorted by time
    frames: Vec<ReplayFrame>,
    /// Current index in the frames array
    frame_index: usize,
    /// Game time of the last tick fed to the engine
    last_time: f64,
    tail_ticks: u32,
    /// Whether the replay has finished
    finished: bool,
    /// Collected events and running score
    sink: Tee<Vec<JudgementEvent>, ScoreKeeper>,
}

impl ReplayEngine {
    /// Creates a new ReplayEngine for a beatmap and recorded frames.
    ///
    /// Frames with a negative or non-finite time are rejected. A beatmap hash
    /// that differs from the one stored in the replay is only reported: the
    /// replay still runs.
    pub fn new(
        beatmap: &Beatmap,
        replay_data: ReplayData,
        settings: &EngineSettings,
    ) -> Result<Self, EngineError> {
        replay_data.validate()?;
        let engine = GameEngine::new(beatmap, settings.judgement.clone())?;

        if let Some(hash) = &replay_data.beatmap_hash {
            if *hash != beatmap.hash {
                log::warn!(
                    "REPLAY: Beatmap hash mismatch (replay {}, beatmap {})",
                    hash,
                    beatmap.hash
                );
            }
        }

        // Sort frames to ensure chronological order
        let mut frames = replay_data.frames;
        frames.sort_by(|a, b| a.time.total_cmp(&b.time));

        Ok(Self {
            engine,
            frames,
            frame_index: 0,
            last_time: 0.0,
            tail_ticks: 0,
            finished: false,
            sink: Tee(Vec::new(), ScoreKeeper::new(settings.scoring.clone())),
        })
    }

    /// Feeds the next recorded frame, or an empty tick once they run out.
    ///
    /// Returns `false` when there is nothing left to do.
    pub fn step(&mut self) -> bool {
        if self.finished {
            return false;
        }

        if let Some(frame) = self.frames.get(self.frame_index) {
            let delta_time = frame.time - self.last_time;
            let input = frame.input();
            self.last_time = frame.time;
            self.frame_index += 1;
            self.engine
                .tick(self.last_time, delta_time, &input, &mut self.sink);
            return true;
        }

        if self.engine.is_finished() {
            self.finished = true;
            return false;
        }

        if self.tail_ticks >= MAX_TAIL_TICKS {
            log::warn!(
                "REPLAY: Gave up at t={:.3} with {} notes unresolved",
                self.last_time,
                self.engine.beatmap_len() - self.engine.spawned() + self.engine.active_notes().len()
            );
            self.finished = true;
            return false;
        }

        self.tail_ticks += 1;
        self.last_time += TAIL_DT;
        self.engine
            .tick(self.last_time, TAIL_DT, &InputFrame::empty(), &mut self.sink);
        true
    }

    /// Gets a snapshot of the current game state.
    pub fn snapshot(&self) -> GameplaySnapshot {
        self.engine.snapshot()
    }

    /// Returns true if the replay has finished.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn events(&self) -> &[JudgementEvent] {
        &self.sink.0
    }

    /// Runs to the end and collects the results.
    pub fn finish(mut self) -> ReplayOutcome {
        while self.step() {}

        let Tee(events, keeper) = self.sink;
        let finished = self.engine.is_finished();
        log::info!(
            "REPLAY: Done, {} events, score {}, max combo {}",
            events.len(),
            keeper.score,
            keeper.max_combo
        );

        ReplayOutcome {
            events,
            stats: keeper.hit_stats,
            score: keeper.score,
            max_combo: keeper.max_combo,
            finished,
        }
    }

    /// Replays the entire replay as fast as possible.
    pub fn replay_fast(
        beatmap: &Beatmap,
        replay_data: ReplayData,
        settings: &EngineSettings,
    ) -> Result<ReplayOutcome, EngineError> {
        Ok(Self::new(beatmap, replay_data, settings)?.finish())
    }
}
