use crate::core::state::PhonemeEvent;
use crate::services::lipsync::viseme::{mouth_shape, MouthShape};
use std::collections::BTreeMap;
use std::time::Duration;

pub const FRAMES_PER_SECOND: u32 = 24;

/// Length of one animation frame in milliseconds.
pub const FRAME_PERIOD_MS: f64 = 1000.0 / FRAMES_PER_SECOND as f64;

/// Extension of the lip-sync file written next to each audio file.
pub const SIDECAR_EXTENSION: &str = "dat";

/// Frame containing `offset_ms`. Negative offsets land on frame 0.
pub fn quantize_ms(offset_ms: f64) -> u32 {
    (offset_ms / FRAME_PERIOD_MS).floor() as u32
}

pub fn quantize(offset: Duration) -> u32 {
    quantize_ms(offset.as_secs_f64() * 1000.0)
}

/// Frame-indexed mouth shapes for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    frames: BTreeMap<u32, MouthShape>,
}

impl Timeline {
    pub fn new() -> Self {
        let mut frames = BTreeMap::new();
        frames.insert(0, MouthShape::Rest);
        Self { frames }
    }

    /// Replays `events` in order on top of a resting mouth. Later events
    /// overwrite earlier ones that land on the same frame.
    pub fn build(events: &[PhonemeEvent]) -> Self {
        let mut timeline = Self::new();
        for event in events {
            timeline.add(event);
        }
        timeline
    }

    /// Opens the mouth at the event's start frame and closes it at its end
    /// frame. Events without a mouth shape are ignored.
    pub fn add(&mut self, event: &PhonemeEvent) {
        let Some(shape) = mouth_shape(&event.symbol) else {
            return;
        };

        let start_ms = event.start.as_secs_f64() * 1000.0;
        let end_ms = start_ms + event.duration.as_secs_f64() * 1000.0;

        self.frames.insert(quantize_ms(start_ms), shape);
        self.frames.insert(quantize_ms(end_ms), MouthShape::Rest);
    }

    pub fn get(&self, frame: u32) -> Option<MouthShape> {
        self.frames.get(&frame).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, MouthShape)> + '_ {
        self.frames.iter().map(|(frame, shape)| (*frame, *shape))
    }

    /// Sidecar text: one `<frame> <shape>` line per entry, ascending by frame.
    pub fn serialize(&self) -> String {
        let mut content = String::new();
        for (frame, shape) in self.iter() {
            content.push_str(&format!("{} {}\n", frame, shape));
        }
        content
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(symbol: &str, start_ms: u64, duration_ms: u64) -> PhonemeEvent {
        PhonemeEvent::new(
            symbol,
            Duration::from_millis(start_ms),
            Duration::from_millis(duration_ms),
        )
    }

    #[test]
    fn test_quantize_boundaries() {
        assert_eq!(quantize_ms(0.0), 0);
        assert_eq!(quantize_ms(1000.0 / 24.0), 1);
        assert_eq!(quantize_ms(2000.0 / 24.0), 2);
        assert_eq!(quantize_ms(41.0), 0);
        assert_eq!(quantize_ms(100.0), 2);
        assert_eq!(quantize_ms(1000.0), 24);
        assert_eq!(quantize_ms(-5.0), 0);
        assert_eq!(quantize_ms(f64::NAN), 0);
    }

    #[test]
    fn test_quantize_is_monotonic() {
        let mut last = 0;
        for tenth_ms in 0..50_000 {
            let frame = quantize_ms(tenth_ms as f64 / 10.0);
            assert!(frame >= last);
            last = frame;
        }
        assert_eq!(last, 119);
    }

    #[test]
    fn test_quantize_duration() {
        assert_eq!(quantize(Duration::ZERO), 0);
        assert_eq!(quantize(Duration::from_millis(100)), 2);
        assert_eq!(quantize(Duration::from_secs(2)), 48);
    }

    #[test]
    fn test_empty_timeline_rests() {
        let timeline = Timeline::build(&[]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.get(0), Some(MouthShape::Rest));
        assert_eq!(timeline.serialize(), "0 rest\n");
    }

    #[test]
    fn test_single_vowel_overwrites_seed() {
        let timeline = Timeline::build(&[event("a", 0, 100)]);
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.get(0), Some(MouthShape::Ai));
        assert_eq!(timeline.get(2), Some(MouthShape::Rest));
    }

    #[test]
    fn test_unmapped_event_is_skipped() {
        let timeline = Timeline::build(&[event("t", 200, 100)]);
        assert_eq!(timeline, Timeline::new());
    }

    #[test]
    fn test_last_write_wins() {
        // "o" closes at frame 4; "m" opens at frame 4.
        let timeline = Timeline::build(&[event("o", 100, 90), event("m", 170, 50)]);
        assert_eq!(timeline.get(2), Some(MouthShape::O));
        assert_eq!(timeline.get(4), Some(MouthShape::Mbp));
        assert_eq!(timeline.get(5), Some(MouthShape::Rest));

        // Reversed order: the rest written by "o" wins.
        let timeline = Timeline::build(&[event("m", 170, 50), event("o", 100, 90)]);
        assert_eq!(timeline.get(4), Some(MouthShape::Rest));
    }

    #[test]
    fn test_unsorted_events_serialize_ascending() {
        let timeline = Timeline::build(&[
            event("u", 500, 100),
            event("a", 0, 100),
            event("l", 250, 60),
        ]);
        assert_eq!(
            timeline.serialize(),
            "0 ai\n2 rest\n6 l\n7 rest\n12 u\n14 rest\n"
        );
    }

    #[test]
    fn test_short_event_collapses_to_rest() {
        // Start and end share a frame, so the closing rest replaces the shape.
        let timeline = Timeline::build(&[event("e", 50, 10)]);
        assert_eq!(timeline.get(1), Some(MouthShape::Rest));
        assert_eq!(timeline.serialize(), "0 rest\n1 rest\n");
    }
}
