/// Per-turn action point budget.
///
/// Functionally a counter bounded by `max`. The per-slot "unlocked" view only
/// exists for the presentation layer and is derived from the counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPoints {
    current: u32,
    max: u32,
}

impl ActionPoints {
    pub fn new(max: u32) -> Self {
        Self { current: 0, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Spends one point. Returns `false` and leaves the budget untouched when
    /// nothing is left.
    pub fn spend(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Adds points up to the cap. Returns how many were actually gained.
    pub fn gain(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }

    /// Sets the budget for a fresh turn, capped at `max`.
    pub fn reset(&mut self, amount: u32) {
        self.current = amount.min(self.max);
    }

    /// Points that survive the turn boundary.
    pub fn carry_over(&self, cap: u32) -> u32 {
        self.current.min(cap)
    }

    /// Slot-by-slot view: the first `current` slots are lit.
    pub fn unlocked(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.max).map(|slot| slot < self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_stops_at_zero() {
        let mut points = ActionPoints::new(4);
        points.reset(1);
        assert!(points.spend());
        assert!(!points.spend());
        assert_eq!(points.current(), 0);
    }

    #[test]
    fn gain_and_reset_respect_cap() {
        let mut points = ActionPoints::new(4);
        points.reset(9);
        assert_eq!(points.current(), 4);

        points.reset(3);
        assert_eq!(points.gain(5), 1);
        assert_eq!(points.current(), 4);
    }

    #[test]
    fn carry_over_is_capped() {
        let mut points = ActionPoints::new(4);
        points.reset(3);
        assert_eq!(points.carry_over(1), 1);
        points.reset(0);
        assert_eq!(points.carry_over(1), 0);
    }

    #[test]
    fn unlocked_view_follows_counter() {
        let mut points = ActionPoints::new(4);
        points.reset(2);
        assert_eq!(
            points.unlocked().collect::<Vec<_>>(),
            vec![true, true, false, false]
        );
    }
}
