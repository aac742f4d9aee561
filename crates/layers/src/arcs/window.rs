//! Visible index window of an animating arc tube.
//!
//! All functions are pure; the engine feeds them elapsed time and writes
//! the result into the tube geometry's draw range.

use scene::mesh::DrawRange;

/// Head progress at which a flying arc reveals its end point.
pub const FLYING_END_REVEAL: f64 = 0.98;
/// Progress at which a full-path arc reveals its end point.
pub const FULL_PATH_END_REVEAL: f64 = 0.95;

pub const MIN_FLYING_LENGTH: f64 = 0.01;
pub const MAX_FLYING_LENGTH: f64 = 0.99;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawMode {
    /// A slice of `segment_length` (fraction of the arc) travels start to end.
    Flying { segment_length: f64 },
    /// The tube grows from the start until the whole path is drawn.
    FullPath,
}

impl DrawMode {
    pub fn new(flying: bool, flying_length: f64) -> Self {
        if flying {
            DrawMode::Flying {
                segment_length: clamp_flying_length(flying_length),
            }
        } else {
            DrawMode::FullPath
        }
    }
}

pub fn clamp_flying_length(length: f64) -> f64 {
    if length.is_finite() {
        length.clamp(MIN_FLYING_LENGTH, MAX_FLYING_LENGTH)
    } else {
        MIN_FLYING_LENGTH
    }
}

/// Animation progress in [0, 1]. A non-positive duration completes at once.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if !(duration_ms > 0.0) {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Head and tail of a flying slice, both in [0, 1]. The head leaves first;
/// the tail reaches the end exactly when progress does.
pub fn flying_head_tail(progress: f64, segment_length: f64) -> (f64, f64) {
    let s = clamp_flying_length(segment_length);
    let span = 1.0 - s;
    let head = (progress / span).min(1.0);
    let tail = ((progress - s) / span).max(0.0);
    (head, tail)
}

/// Index range to draw at `progress` for a tube of `segments` tubular
/// segments and `stride` indices per segment.
pub fn draw_window(mode: DrawMode, progress: f64, segments: usize, stride: usize) -> DrawRange {
    let progress = progress.clamp(0.0, 1.0);
    let segment_index = |fraction: f64| ((fraction * segments as f64).floor() as usize).min(segments);
    match mode {
        DrawMode::Flying { segment_length } => {
            if progress >= 1.0 {
                return DrawRange::EMPTY;
            }
            let (head, tail) = flying_head_tail(progress, segment_length);
            let head = segment_index(head);
            let tail = segment_index(tail);
            DrawRange::new(tail * stride, head.saturating_sub(tail) * stride)
        }
        DrawMode::FullPath => DrawRange::new(0, segment_index(progress) * stride),
    }
}

/// Range left on screen once the animation has finished.
pub fn final_window(mode: DrawMode, segments: usize, stride: usize) -> DrawRange {
    match mode {
        DrawMode::Flying { .. } => DrawRange::EMPTY,
        DrawMode::FullPath => DrawRange::full(segments * stride),
    }
}

pub fn end_reveal_reached(mode: DrawMode, progress: f64) -> bool {
    match mode {
        DrawMode::Flying { segment_length } => {
            flying_head_tail(progress, segment_length).0 >= FLYING_END_REVEAL
        }
        DrawMode::FullPath => progress >= FULL_PATH_END_REVEAL,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        DrawMode, draw_window, end_reveal_reached, final_window, flying_head_tail, progress,
    };
    use scene::mesh::DrawRange;

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() <= eps, "{a} vs {b}");
    }

    const FLYING: DrawMode = DrawMode::Flying {
        segment_length: 0.2,
    };

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(-10.0, 1000.0), 0.0);
        assert_eq!(progress(500.0, 1000.0), 0.5);
        assert_eq!(progress(5000.0, 1000.0), 1.0);
        assert_eq!(progress(0.0, 0.0), 1.0);
    }

    #[test]
    fn flying_head_leads_the_tail() {
        let (head, tail) = flying_head_tail(0.4, 0.2);
        assert_close(head, 0.5, 1e-12);
        assert_close(tail, 0.25, 1e-12);

        let (head, tail) = flying_head_tail(0.1, 0.2);
        assert_close(head, 0.125, 1e-12);
        assert_eq!(tail, 0.0);
    }

    #[test]
    fn flying_window_bounds() {
        let stride = 48;
        let segments = 100;
        for k in 0..=100 {
            let p = k as f64 / 100.0;
            let range = draw_window(FLYING, p, segments, stride);
            assert_eq!(range.start % stride, 0);
            assert_eq!(range.count % stride, 0);
            assert!(range.end() <= segments * stride);
        }
        assert_eq!(draw_window(FLYING, 0.0, segments, stride), DrawRange::EMPTY);
        assert_eq!(draw_window(FLYING, 1.0, segments, stride), DrawRange::EMPTY);
        assert_eq!(draw_window(FLYING, 0.4, segments, stride), DrawRange::new(25 * 48, 25 * 48));
    }

    #[test]
    fn full_path_window_grows_monotonically() {
        let mut last = 0;
        for k in 0..=64 {
            let range = draw_window(DrawMode::FullPath, k as f64 / 64.0, 132, 48);
            assert_eq!(range.start, 0);
            assert!(range.count >= last);
            last = range.count;
        }
        assert_eq!(last, 132 * 48);
        assert_eq!(final_window(DrawMode::FullPath, 132, 48), DrawRange::new(0, 132 * 48));
        assert_eq!(final_window(FLYING, 132, 48), DrawRange::EMPTY);
    }

    #[test]
    fn end_reveal_thresholds() {
        assert!(!end_reveal_reached(DrawMode::FullPath, 0.94));
        assert!(end_reveal_reached(DrawMode::FullPath, 0.95));
        // head = p / 0.8 reaches 0.98 at p = 0.784
        assert!(!end_reveal_reached(FLYING, 0.78));
        assert!(end_reveal_reached(FLYING, 0.79));
    }

    #[test]
    fn flying_length_is_clamped() {
        assert_eq!(
            DrawMode::new(true, 1.5),
            DrawMode::Flying {
                segment_length: 0.99
            }
        );
        assert_eq!(
            DrawMode::new(true, 0.0),
            DrawMode::Flying {
                segment_length: 0.01
            }
        );
        assert_eq!(DrawMode::new(false, 0.3), DrawMode::FullPath);
    }
}
