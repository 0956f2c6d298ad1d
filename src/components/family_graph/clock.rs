//! Frame time sources for camera animation.

use std::cell::Cell;

/// Supplies the current time in milliseconds to the frame driver.
pub trait Clock {
	fn now_ms(&self) -> f64;
}

/// Wall clock of the hosting browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
	fn now_ms(&self) -> f64 {
		js_sys::Date::now()
	}
}

/// Hand-driven clock for deterministic animation tests.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: Cell<f64>,
}

impl ManualClock {
	pub fn new(start_ms: f64) -> Self {
		Self {
			now: Cell::new(start_ms),
		}
	}

	pub fn set(&self, now_ms: f64) {
		self.now.set(now_ms);
	}

	pub fn advance(&self, delta_ms: f64) {
		self.now.set(self.now.get() + delta_ms);
	}
}

impl Clock for ManualClock {
	fn now_ms(&self) -> f64 {
		self.now.get()
	}
}
