/// Engine timestamp in milliseconds.
///
/// The origin is whatever the clock that produced it chose; only differences
/// between two timestamps from the same clock are meaningful.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64);

impl Time {
    pub const ZERO: Time = Time(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Time(secs * 1000.0)
    }

    pub fn millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`; never negative.
    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn offset(self, ms: f64) -> Self {
        Time(self.0 + ms)
    }
}
