//! Trace sinks for per-event simulation output.
//!
//! The simulator reports every draw and replace to a [`TraceSink`]. Sinks
//! observe; they never feed back into the computation.

use tracing::info;

use crate::types::{DrawEvent, Phase};

/// Receives one record per draw/replace event.
#[cfg_attr(test, mockall::automock)]
pub trait TraceSink {
    fn record(&mut self, event: &DrawEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn record(&mut self, _event: &DrawEvent) {}
}

/// Collects the full event log.
impl TraceSink for Vec<DrawEvent> {
    fn record(&mut self, event: &DrawEvent) {
        self.push(*event);
    }
}

/// Emits a human-readable `tracing` line per event, with a header each
/// time the game moves to a new phase.
#[derive(Debug, Default)]
pub struct TracingSink {
    current_phase: Option<Phase>,
}

impl TraceSink for TracingSink {
    fn record(&mut self, event: &DrawEvent) {
        if self.current_phase != Some(event.phase) {
            info!("{}:", event.phase);
            self.current_phase = Some(event.phase);
        }
        info!(
            kind = ?event.kind,
            miss_probability = event.miss_probability,
            remaining_cards = event.remaining_cards,
            "   {event}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventKind;

    fn event(kind: EventKind, phase: Phase) -> DrawEvent {
        DrawEvent {
            kind,
            phase,
            miss_probability: 0.5,
            remaining_cards: 30,
        }
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut log: Vec<DrawEvent> = Vec::new();
        log.record(&event(EventKind::Draw, Phase::OpeningHand));
        log.record(&event(EventKind::Replace, Phase::Turn(1)));
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].kind, EventKind::Draw);
        assert_eq!(log[1].phase, Phase::Turn(1));
    }

    #[test]
    fn test_tracing_sink_tracks_phase() {
        let mut sink = TracingSink::default();
        sink.record(&event(EventKind::Draw, Phase::OpeningHand));
        assert_eq!(sink.current_phase, Some(Phase::OpeningHand));
        sink.record(&event(EventKind::Replace, Phase::Turn(2)));
        assert_eq!(sink.current_phase, Some(Phase::Turn(2)));
    }

    #[test]
    fn test_null_sink_accepts_events() {
        let mut sink = NullSink;
        sink.record(&event(EventKind::Draw, Phase::OpeningHand));
    }
}
