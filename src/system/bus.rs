//! Channel infrastructure between the engine and its consumers.
//!
//! The `SystemBus` lets a logic thread publish judgement events and
//! gameplay snapshots while scoring, HUD or recording code reads them
//! elsewhere.

use crate::models::engine::Note;
use crate::shared::messages::{JudgementEvent, JudgementSink};
use crate::shared::snapshot::GameplaySnapshot;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Logic → consumers: every judgement event, in emission order.
    pub judgement_tx: Sender<JudgementEvent>,
    pub judgement_rx: Receiver<JudgementEvent>,

    /// Logic → presentation: game state snapshots.
    pub snapshot_tx: Sender<GameplaySnapshot>,
    pub snapshot_rx: Receiver<GameplaySnapshot>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (judgement_tx, judgement_rx) = unbounded();

        // Bounded snapshot channel: max 2 frames queued to limit latency
        let (snapshot_tx, snapshot_rx) = bounded(2);

        Self {
            judgement_tx,
            judgement_rx,
            snapshot_tx,
            snapshot_rx,
        }
    }

    /// Publishes a snapshot, dropping it if the consumer lags behind.
    pub fn publish_snapshot(&self, snapshot: GameplaySnapshot) {
        if self.snapshot_tx.try_send(snapshot).is_err() {
            log::trace!("BUS: Snapshot dropped, channel full");
        }
    }

    /// Drains every judgement event queued so far.
    pub fn drain_judgements(&self) -> Vec<JudgementEvent> {
        self.judgement_rx.try_iter().collect()
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A sender is a sink: events are forwarded as they are emitted.
impl JudgementSink for Sender<JudgementEvent> {
    fn on_judgement(&mut self, event: &JudgementEvent) {
        if self.send(event.clone()).is_err() {
            log::warn!("BUS: Judgement receiver disconnected, event {} dropped", event.note_id);
        }
    }

    fn on_tick_end(&mut self, _active: &[Note]) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputFrame;
    use crate::models::engine::{JudgementConfig, NoteSpec};
    use crate::models::stats::Judgement;
    use crate::state::GameEngine;
    use std::thread;

    #[test]
    fn test_events_cross_threads_in_order() {
        let bus = SystemBus::new();
        let mut tx = bus.judgement_tx.clone();

        let producer = thread::spawn(move || {
            let specs = vec![NoteSpec::tap(0.0, "A"), NoteSpec::tap(0.0, "B")];
            let mut engine = GameEngine::from_specs(specs, JudgementConfig::default()).unwrap();
            let mut t = 0.0;
            while !engine.is_finished() {
                t += 0.0625;
                engine.tick(t, 0.0625, &InputFrame::gesture("A"), &mut tx);
            }
        });
        producer.join().unwrap();

        let events = bus.drain_judgements();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].target_gesture, "A");
        assert_eq!(events[1].grade, Judgement::Miss);
    }

    #[test]
    fn test_snapshot_channel_drops_when_full() {
        let bus = SystemBus::new();
        let engine = GameEngine::from_specs(vec![], JudgementConfig::default()).unwrap();
        for _ in 0..5 {
            bus.publish_snapshot(engine.snapshot());
        }
        assert_eq!(bus.snapshot_rx.try_iter().count(), 2);
    }

    #[test]
    fn test_disconnected_receiver_is_not_fatal() {
        let (mut tx, rx) = unbounded::<JudgementEvent>();
        drop(rx);
        let mut engine =
            GameEngine::from_specs(vec![NoteSpec::tap(0.0, "A")], JudgementConfig::default())
                .unwrap();
        engine.tick(2.0, 2.0, &InputFrame::empty(), &mut tx);
        assert!(engine.is_finished());
    }
}
