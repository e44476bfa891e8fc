//! Position state machine (FLAT ⇄ LONG).
//!
//! Invariants:
//! - `status == Flat` exactly when `quantity == 0`
//! - `trailing_high` is `Some` only while long and is cleared on full close
//! - a single lot is held at a time; entering resets the average entry price

use serde::Serialize;

/// Remaining quantity at or below this is treated as a full close.
pub const QUANTITY_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionStatus {
    Flat,
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionState {
    pub status: PositionStatus,
    pub quantity: f64,
    pub average_entry_price: f64,
    pub trailing_high: Option<f64>,
    pub last_partial_take_step: Option<usize>,
    pub last_stop_loss_step: Option<usize>,
    pub last_exit_step: Option<usize>,
}

impl Default for PositionState {
    fn default() -> Self {
        PositionState {
            status: PositionStatus::Flat,
            quantity: 0.0,
            average_entry_price: 0.0,
            trailing_high: None,
            last_partial_take_step: None,
            last_stop_loss_step: None,
            last_exit_step: None,
        }
    }
}

impl PositionState {
    pub fn is_long(&self) -> bool {
        self.status == PositionStatus::Long
    }

    pub fn is_flat(&self) -> bool {
        self.status == PositionStatus::Flat
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity * price
    }

    /// FLAT → LONG at `price`. Returns `false` (no change) if already long
    /// or the quantity is not positive.
    pub fn open(&mut self, quantity: f64, price: f64) -> bool {
        if self.is_long() || quantity <= 0.0 {
            return false;
        }
        self.status = PositionStatus::Long;
        self.quantity = quantity;
        self.average_entry_price = price;
        self.trailing_high = Some(price);
        true
    }

    /// Raise the trailing high with the current price and the window high.
    ///
    /// An unset trailing high is first seeded with max(entry, price).
    pub fn refresh_trailing_high(&mut self, price: f64, window_high: Option<f64>) -> f64 {
        let seeded = self
            .trailing_high
            .unwrap_or_else(|| self.average_entry_price.max(price));
        let high = seeded.max(price).max(window_high.unwrap_or(price));
        self.trailing_high = Some(high);
        high
    }

    /// Remove `fraction` (0..=1) of the holding. Returns the quantity sold.
    ///
    /// Goes FLAT when the remainder falls to [`QUANTITY_EPSILON`] or below.
    pub fn reduce(&mut self, fraction: f64) -> f64 {
        if !self.is_long() {
            return 0.0;
        }
        let sold = self.quantity * fraction.clamp(0.0, 1.0);
        self.quantity -= sold;
        if self.quantity <= QUANTITY_EPSILON {
            self.close();
        }
        sold
    }

    fn close(&mut self) {
        self.status = PositionStatus::Flat;
        self.quantity = 0.0;
        self.average_entry_price = 0.0;
        self.trailing_high = None;
    }

    /// Steps elapsed since `marker`, or `None` if the event never happened.
    pub fn steps_since(marker: Option<usize>, step: usize) -> Option<usize> {
        marker.map(|m| step.saturating_sub(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_position() -> PositionState {
        let mut pos = PositionState::default();
        assert!(pos.open(2.0, 100.0));
        pos
    }

    #[test]
    fn starts_flat() {
        let pos = PositionState::default();
        assert!(pos.is_flat());
        assert_eq!(pos.quantity, 0.0);
        assert!(pos.trailing_high.is_none());
    }

    #[test]
    fn open_sets_entry_and_trailing_high() {
        let pos = long_position();
        assert!(pos.is_long());
        assert_eq!(pos.quantity, 2.0);
        assert_eq!(pos.average_entry_price, 100.0);
        assert_eq!(pos.trailing_high, Some(100.0));
    }

    #[test]
    fn open_rejected_while_long() {
        let mut pos = long_position();
        assert!(!pos.open(1.0, 200.0));
        assert_eq!(pos.average_entry_price, 100.0);
        assert_eq!(pos.quantity, 2.0);
    }

    #[test]
    fn open_rejects_zero_quantity() {
        let mut pos = PositionState::default();
        assert!(!pos.open(0.0, 100.0));
        assert!(pos.is_flat());
    }

    #[test]
    fn market_value() {
        let pos = long_position();
        assert!((pos.market_value(110.0) - 220.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_reduce_keeps_entry_and_trailing_high() {
        let mut pos = long_position();
        pos.refresh_trailing_high(120.0, None);
        let sold = pos.reduce(0.4);
        assert!((sold - 0.8).abs() < 1e-12);
        assert!(pos.is_long());
        assert!((pos.quantity - 1.2).abs() < 1e-12);
        assert_eq!(pos.average_entry_price, 100.0);
        assert_eq!(pos.trailing_high, Some(120.0));
    }

    #[test]
    fn full_reduce_goes_flat() {
        let mut pos = long_position();
        let sold = pos.reduce(1.0);
        assert_eq!(sold, 2.0);
        assert!(pos.is_flat());
        assert_eq!(pos.quantity, 0.0);
        assert_eq!(pos.average_entry_price, 0.0);
        assert!(pos.trailing_high.is_none());
    }

    #[test]
    fn reduce_clamps_fraction() {
        let mut pos = long_position();
        pos.reduce(1.5);
        assert!(pos.is_flat());
    }

    #[test]
    fn reduce_when_flat_is_noop() {
        let mut pos = PositionState::default();
        assert_eq!(pos.reduce(1.0), 0.0);
        assert!(pos.is_flat());
    }

    #[test]
    fn dust_remainder_closes() {
        let mut pos = PositionState::default();
        pos.open(1e-12, 100.0);
        pos.reduce(0.5);
        assert!(pos.is_flat());
    }

    #[test]
    fn trailing_high_takes_max_of_inputs() {
        let mut pos = long_position();
        assert_eq!(pos.refresh_trailing_high(105.0, Some(110.0)), 110.0);
        assert_eq!(pos.refresh_trailing_high(104.0, None), 110.0);
        assert_eq!(pos.refresh_trailing_high(115.0, Some(112.0)), 115.0);
    }

    #[test]
    fn trailing_high_seeded_when_missing() {
        let mut pos = long_position();
        pos.trailing_high = None;
        assert_eq!(pos.refresh_trailing_high(90.0, None), 100.0);
    }

    #[test]
    fn steps_since_marker() {
        assert_eq!(PositionState::steps_since(None, 10), None);
        assert_eq!(PositionState::steps_since(Some(4), 10), Some(6));
    }
}
