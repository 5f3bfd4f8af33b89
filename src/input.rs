//! Logical input state supplied by the host.

/// Current boolean state of every logical action. The host overwrites it
/// whenever device state changes; the world samples it on each sub-tick and
/// each gameplay tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Normal bubble.
    pub primary_fire: bool,
    /// Poison bubble.
    pub secondary_fire: bool,
}

impl InputState {
    pub fn any_direction(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Edge-triggered latch: fires once per discrete press and re-arms only
/// after the key has been observed released.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latch {
    fired: bool,
}

impl Latch {
    pub fn new() -> Self {
        Latch { fired: false }
    }

    /// Sample the key. Returns `true` on the first sample of a press.
    pub fn sample(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.fired = false;
            return false;
        }
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_fires_once() {
        let mut latch = Latch::new();
        let fires: Vec<bool> = [true, true, true, false, true]
            .iter()
            .map(|&p| latch.sample(p))
            .collect();
        assert_eq!(fires, vec![true, false, false, false, true]);
    }
}
