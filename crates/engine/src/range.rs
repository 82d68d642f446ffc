use std::ops::RangeInclusive;

/// Linked start/end bounds over a track of known duration.
///
/// The invariant `0 <= start <= end <= total_duration` holds after every
/// mutation. The most recently set bound wins; the opposite bound's value is
/// only dragged along when the two meet exactly, mirroring a pair of sliders
/// whose ranges narrow each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSelector {
    total_duration: f64,
    start: f64,
    end: f64,
}

impl RangeSelector {
    /// Creates a selector spanning the full `[0, total_duration]` interval.
    ///
    /// Negative or non-finite durations collapse to an empty zero-length
    /// track.
    ///
    /// # Example
    /// ```
    /// use engine::RangeSelector;
    ///
    /// let range = RangeSelector::reset(100.0);
    /// assert_eq!(range.interval(), (0.0, 100.0));
    /// ```
    pub fn reset(total_duration: f64) -> Self {
        let total_duration = if total_duration.is_finite() {
            total_duration.max(0.0)
        } else {
            0.0
        };
        Self {
            total_duration,
            start: 0.0,
            end: total_duration,
        }
    }

    /// Moves the start bound, clamped into `[0, total_duration]`.
    ///
    /// When the new start passes the end bound, the end is raised to match.
    pub fn set_start(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.start = value.clamp(0.0, self.total_duration);
        if self.end < self.start {
            self.end = self.start;
        }
    }

    /// Moves the end bound, clamped into `[0, total_duration]`.
    ///
    /// When the new end passes the start bound, the start is lowered to match.
    pub fn set_end(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.end = value.clamp(0.0, self.total_duration);
        if self.start > self.end {
            self.start = self.end;
        }
    }

    /// Returns `(start, end)` with `start <= end` guaranteed.
    pub fn interval(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// Valid positions for the start bound: `[0, end]`.
    pub fn start_range(&self) -> RangeInclusive<f64> {
        0.0..=self.end
    }

    /// Valid positions for the end bound: `[start, total_duration]`.
    pub fn end_range(&self) -> RangeInclusive<f64> {
        self.start..=self.total_duration
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::reset(0.0)
    }
}
