//! Session timer. Timestamps are milliseconds since the Unix epoch
//! (`Date.now()` in the browser); the stopwatch never reads a clock itself.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum Phase {
    #[default]
    Idle,
    Running {
        started_at_ms: f64,
    },
    Stopped,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stopwatch {
    phase: Phase,
    elapsed_ms: f64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only an idle stopwatch can start; there is no restart.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running { started_at_ms: now_ms };
        true
    }

    /// Advance the elapsed time. Never moves backwards, even if `now_ms`
    /// does.
    pub fn tick(&mut self, now_ms: f64) {
        if let Phase::Running { started_at_ms } = self.phase {
            self.elapsed_ms = self.elapsed_ms.max(now_ms - started_at_ms);
        }
    }

    /// Take a final reading and freeze. No-op unless running.
    pub fn stop(&mut self, now_ms: f64) {
        if self.is_running() {
            self.tick(now_ms);
            self.phase = Phase::Stopped;
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Whole seconds elapsed.
    pub fn elapsed_seconds(&self) -> u64 {
        (self.elapsed_ms / 1000.0).floor() as u64
    }

    /// `MM:SS`, minutes keep growing past 59.
    pub fn display(&self) -> String {
        let secs = self.elapsed_seconds();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut sw = Stopwatch::new();
        sw.tick(5_000.0);
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_seconds(), 0);
    }

    #[test]
    fn elapsed_is_monotonic_while_running() {
        let mut sw = Stopwatch::new();
        assert!(sw.start(1_000.0));
        let mut last = 0.0;
        for now in [1_000.0, 1_400.0, 2_100.0, 2_050.0, 9_999.0, 12_000.0] {
            sw.tick(now);
            assert!(sw.elapsed_ms() >= last);
            last = sw.elapsed_ms();
        }
        assert_eq!(sw.elapsed_seconds(), 11);
    }

    #[test]
    fn stop_freezes() {
        let mut sw = Stopwatch::new();
        sw.start(0.0);
        sw.tick(3_000.0);
        sw.stop(4_500.0);
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_ms(), 4_500.0);
        sw.tick(60_000.0);
        sw.stop(90_000.0);
        assert_eq!(sw.elapsed_ms(), 4_500.0);
    }

    #[test]
    fn cannot_restart() {
        let mut sw = Stopwatch::new();
        assert!(sw.start(0.0));
        assert!(!sw.start(10.0));
        sw.stop(1_000.0);
        assert!(!sw.start(2_000.0));
        assert!(!sw.is_running());
    }

    #[test]
    fn display_format() {
        let mut sw = Stopwatch::new();
        sw.start(0.0);
        sw.tick(65_900.0);
        assert_eq!(sw.display(), "01:05");
        sw.tick(6_001_000.0);
        assert_eq!(sw.display(), "100:01");
    }
}
