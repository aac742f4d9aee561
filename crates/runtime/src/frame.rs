use foundation::time::Time;

use crate::clock::Clock;

/// Per-tick frame metadata.
///
/// Frames are produced by the host-driven tick, never by an internal timer:
/// the host calls `update()` once per rendered frame, before rendering.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Timestamp sampled at the start of the frame.
    pub time: Time,
    /// Milliseconds since the previous frame (0 for the first frame).
    pub dt_ms: f64,
}

impl Frame {
    pub fn first(time: Time) -> Self {
        Self {
            index: 0,
            time,
            dt_ms: 0.0,
        }
    }

    pub fn next(self, time: Time) -> Self {
        Self {
            index: self.index + 1,
            time,
            dt_ms: time.since(self.time),
        }
    }
}

/// Turns clock samples into a sequence of frames.
#[derive(Debug, Default)]
pub struct FrameTicker {
    last: Option<Frame>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> Frame {
        let now = clock.now();
        let frame = match self.last {
            Some(prev) => prev.next(now),
            None => Frame::first(now),
        };
        self.last = Some(frame);
        frame
    }

    pub fn last(&self) -> Option<Frame> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameTicker};
    use crate::clock::ManualClock;
    use foundation::time::Time;

    #[test]
    fn next_advances_index_and_dt() {
        let f0 = Frame::first(Time(100.0));
        let f1 = f0.next(Time(116.0));
        assert_eq!(f1.index, 1);
        assert_eq!(f1.dt_ms, 16.0);
    }

    #[test]
    fn ticker_samples_the_clock() {
        let clock = ManualClock::new();
        let mut ticker = FrameTicker::new();
        assert_eq!(ticker.tick(&clock).index, 0);
        clock.advance(33.0);
        let f = ticker.tick(&clock);
        assert_eq!(f.index, 1);
        assert_eq!(f.time, Time(33.0));
        assert_eq!(ticker.last(), Some(f));
    }
}
