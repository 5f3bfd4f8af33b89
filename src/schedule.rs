//! Fixed-interval timers driven by explicit elapsed time.
//!
//! Every periodic behaviour (gameplay tick, animation steps, danger toggles,
//! phase cycles) is a `FixedStep` owned by whoever performs it. Dropping the
//! owner drops the timer, so nothing keeps firing on a removed entity.

#[derive(Clone, Debug)]
pub struct FixedStep {
    period_ms: f64,
    acc_ms: f64,
}

impl FixedStep {
    pub fn new(period_ms: f64) -> Self {
        FixedStep { period_ms, acc_ms: 0.0 }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Accumulate `dt_ms` and return how many periods elapsed.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !(self.period_ms > 0.0) || !dt_ms.is_finite() {
            return 0;
        }
        self.acc_ms += dt_ms.max(0.0);
        let mut fired = 0;
        while self.acc_ms >= self.period_ms {
            self.acc_ms -= self.period_ms;
            fired += 1;
        }
        fired
    }
}

/// One-off countdown. `advance` reports expiry exactly once.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining_ms: f64,
    expired: bool,
}

impl Countdown {
    pub fn new(ms: f64) -> Self {
        Countdown { remaining_ms: ms, expired: false }
    }

    pub fn advance(&mut self, dt_ms: f64) -> bool {
        if self.expired {
            return false;
        }
        self.remaining_ms -= dt_ms;
        if self.remaining_ms <= 0.0 {
            self.expired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_counts_periods() {
        let mut s = FixedStep::new(200.0);
        assert_eq!(s.advance(150.0), 0);
        assert_eq!(s.advance(300.0), 2);
        assert_eq!(s.advance(49.0), 0);
        assert_eq!(s.advance(101.0), 1);
    }

    #[test]
    fn countdown_fires_once() {
        let mut c = Countdown::new(100.0);
        assert!(!c.advance(60.0));
        assert!(c.advance(60.0));
        assert!(!c.advance(60.0));
    }
}
