//! Pan/zoom camera mapping world space onto the canvas.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: where the layout places nodes. Independent of canvas
//!   size and zoom.
//! - **Screen-space**: canvas pixels. The camera's `(x, y)` world point is
//!   drawn at the canvas center and world distances are multiplied by
//!   `scale`.
//!
//! Animated transitions are time-driven: the caller passes the current time
//! to [`Camera::animate_to`] and to every [`Camera::tick`], so tests can drive
//! them with a manual clock.

use std::fmt;

use serde::Deserialize;

use super::types::Point;

/// Zoom limits and wheel sensitivity.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
	pub min_scale: f64,
	pub max_scale: f64,
	/// Exponent applied per wheel notch. Lower = slower zoom.
	pub zoom_intensity: f64,
	/// Scale the camera starts at when a data set is loaded.
	pub initial_scale: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.5,
			max_scale: 3.0,
			zoom_intensity: 0.035,
			initial_scale: 1.0,
		}
	}
}

/// Canvas size in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// A complete camera pose, used as animation endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
	pub x: f64,
	pub y: f64,
	pub scale: f64,
}

/// Invoked once when an animation settles on its target.
pub type DoneCallback = Box<dyn FnOnce()>;

/// Progress reported by [`Camera::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
	/// No animation in flight; the camera was not touched.
	Idle,
	/// The camera moved and the animation continues.
	Running,
	/// The camera landed exactly on the target this frame.
	Finished,
}

struct CameraAnimation {
	from: CameraTarget,
	to: CameraTarget,
	start_ms: f64,
	duration_ms: f64,
	on_done: Option<DoneCallback>,
}

impl fmt::Debug for CameraAnimation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CameraAnimation")
			.field("from", &self.from)
			.field("to", &self.to)
			.field("start_ms", &self.start_ms)
			.field("duration_ms", &self.duration_ms)
			.field("has_on_done", &self.on_done.is_some())
			.finish()
	}
}

/// World point shown at the canvas center plus a uniform zoom factor.
#[derive(Debug)]
pub struct Camera {
	pub x: f64,
	pub y: f64,
	/// Screen pixels per world unit.
	pub scale: f64,
	animation: Option<CameraAnimation>,
}

impl Default for Camera {
	fn default() -> Self {
		Self::new(1.0)
	}
}

impl Camera {
	pub fn new(scale: f64) -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			scale,
			animation: None,
		}
	}

	pub fn pose(&self) -> CameraTarget {
		CameraTarget {
			x: self.x,
			y: self.y,
			scale: self.scale,
		}
	}

	pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
		Point::new(
			(world.x - self.x) * self.scale + viewport.width / 2.0,
			(world.y - self.y) * self.scale + viewport.height / 2.0,
		)
	}

	pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
		Point::new(
			(screen.x - viewport.width / 2.0) / self.scale + self.x,
			(screen.y - viewport.height / 2.0) / self.scale + self.y,
		)
	}

	pub fn center_on(&mut self, world: Point) {
		self.x = world.x;
		self.y = world.y;
	}

	/// Move the view by a screen-space drag delta. Content follows the
	/// pointer at the same pixel speed whatever the zoom.
	pub fn pan_by_screen(&mut self, dx: f64, dy: f64) {
		self.x -= dx / self.scale;
		self.y -= dy / self.scale;
	}

	/// Multiplicative zoom, `direction` is +1 to zoom in and -1 to zoom out.
	pub fn zoom(&mut self, direction: f64, config: &CameraConfig) {
		let factor = (direction * config.zoom_intensity).exp();
		self.scale = (self.scale * factor).clamp(config.min_scale, config.max_scale);
	}

	pub fn is_animating(&self) -> bool {
		self.animation.is_some()
	}

	/// Start an eased transition from the current pose to `target`.
	///
	/// Supersedes any animation in flight: the new one starts from wherever
	/// the camera is right now, and the old completion callback is dropped
	/// without being called.
	pub fn animate_to(
		&mut self,
		target: CameraTarget,
		duration_ms: f64,
		now_ms: f64,
		on_done: Option<DoneCallback>,
	) {
		self.animation = Some(CameraAnimation {
			from: self.pose(),
			to: target,
			start_ms: now_ms,
			duration_ms,
			on_done,
		});
	}

	/// Point an in-flight animation at a new world position, keeping its
	/// zoom and timing. The remaining flight starts from the current pose.
	pub fn retarget(&mut self, world: Point) {
		let pose = self.pose();
		if let Some(animation) = self.animation.as_mut() {
			animation.from = pose;
			animation.to.x = world.x;
			animation.to.y = world.y;
		}
	}

	/// Abandon any animation in flight. Its completion callback is dropped.
	pub fn cancel_animation(&mut self) {
		self.animation = None;
	}

	/// Advance the current animation to `now_ms`. Call once per frame and
	/// repaint unless the result is [`AnimationStatus::Idle`].
	pub fn tick(&mut self, now_ms: f64) -> AnimationStatus {
		let Some(animation) = &self.animation else {
			return AnimationStatus::Idle;
		};

		let t = if animation.duration_ms > 0.0 {
			((now_ms - animation.start_ms) / animation.duration_ms).clamp(0.0, 1.0)
		} else {
			1.0
		};

		if t < 1.0 {
			let (from, to) = (animation.from, animation.to);
			let eased = ease_in_out(t);
			self.x = lerp(from.x, to.x, eased);
			self.y = lerp(from.y, to.y, eased);
			self.scale = lerp(from.scale, to.scale, eased);
			return AnimationStatus::Running;
		}

		if let Some(finished) = self.animation.take() {
			self.x = finished.to.x;
			self.y = finished.to.y;
			self.scale = finished.to.scale;
			if let Some(on_done) = finished.on_done {
				on_done();
			}
		}
		AnimationStatus::Finished
	}
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}

/// Quadratic ease-in-out over `t` in `[0, 1]`.
pub fn ease_in_out(t: f64) -> f64 {
	if t < 0.5 {
		2.0 * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use proptest::prelude::*;

	use super::*;

	const VIEW: Viewport = Viewport::new(800.0, 600.0);

	fn counter() -> (Rc<Cell<u32>>, DoneCallback) {
		let count = Rc::new(Cell::new(0));
		let inner = count.clone();
		(count, Box::new(move || inner.set(inner.get() + 1)))
	}

	#[test]
	fn camera_point_maps_to_canvas_center() {
		let camera = Camera {
			x: 120.0,
			y: -40.0,
			..Camera::new(2.0)
		};
		assert_eq!(camera.world_to_screen(Point::new(120.0, -40.0), VIEW), Point::new(400.0, 300.0));
		assert_eq!(camera.world_to_screen(Point::new(130.0, -40.0), VIEW), Point::new(420.0, 300.0));
	}

	#[test]
	fn drag_at_double_zoom_moves_half_as_far_in_world() {
		let mut camera = Camera::new(2.0);
		camera.center_on(Point::new(10.0, 20.0));
		camera.pan_by_screen(30.0, -8.0);
		assert_eq!((camera.x, camera.y), (10.0 - 15.0, 20.0 + 4.0));
	}

	#[test]
	fn zoom_is_clamped() {
		let config = CameraConfig::default();
		let mut camera = Camera::default();
		for _ in 0..200 {
			camera.zoom(1.0, &config);
		}
		assert_eq!(camera.scale, 3.0);
		for _ in 0..200 {
			camera.zoom(-1.0, &config);
		}
		assert_eq!(camera.scale, 0.5);
	}

	#[test]
	fn zoom_in_then_out_returns_to_start() {
		let config = CameraConfig::default();
		let mut camera = Camera::default();
		camera.zoom(1.0, &config);
		assert!((camera.scale - 0.035f64.exp()).abs() < 1e-12);
		camera.zoom(-1.0, &config);
		assert!((camera.scale - 1.0).abs() < 1e-12);
	}

	#[test]
	fn ease_curve_endpoints_and_midpoint() {
		assert_eq!(ease_in_out(0.0), 0.0);
		assert_eq!(ease_in_out(0.25), 0.125);
		assert_eq!(ease_in_out(0.5), 0.5);
		assert_eq!(ease_in_out(0.75), 0.875);
		assert_eq!(ease_in_out(1.0), 1.0);
	}

	#[test]
	fn animation_eases_and_settles_exactly() {
		let mut camera = Camera::default();
		let (done, on_done) = counter();
		let target = CameraTarget {
			x: 100.0,
			y: 50.0,
			scale: 2.0,
		};
		camera.animate_to(target, 700.0, 1000.0, Some(on_done));

		assert_eq!(camera.tick(1000.0), AnimationStatus::Running);
		assert_eq!(camera.pose(), CameraTarget { x: 0.0, y: 0.0, scale: 1.0 });

		assert_eq!(camera.tick(1350.0), AnimationStatus::Running);
		assert_eq!(camera.pose(), CameraTarget { x: 50.0, y: 25.0, scale: 1.5 });
		assert_eq!(done.get(), 0);

		assert_eq!(camera.tick(1800.0), AnimationStatus::Finished);
		assert_eq!(camera.pose(), target);
		assert_eq!(done.get(), 1);
		assert!(!camera.is_animating());

		assert_eq!(camera.tick(2000.0), AnimationStatus::Idle);
		assert_eq!(done.get(), 1);
	}

	#[test]
	fn superseding_animation_drops_first_callback() {
		let mut camera = Camera::default();
		let (first_done, first) = counter();
		let (second_done, second) = counter();

		camera.animate_to(CameraTarget { x: 100.0, y: 0.0, scale: 3.0 }, 100.0, 0.0, Some(first));
		camera.tick(50.0);
		let mid = camera.pose();
		assert_eq!(mid.x, 50.0);

		let target = CameraTarget {
			x: -20.0,
			y: 10.0,
			scale: 1.0,
		};
		camera.animate_to(target, 100.0, 50.0, Some(second));
		// Restart from the mid-flight pose, not from the first animation's origin.
		assert_eq!(camera.tick(50.0), AnimationStatus::Running);
		assert_eq!(camera.pose(), mid);

		assert_eq!(camera.tick(150.0), AnimationStatus::Finished);
		assert_eq!(camera.pose(), target);
		assert_eq!(first_done.get(), 0);
		assert_eq!(second_done.get(), 1);
	}

	#[test]
	fn retargeted_flight_keeps_zoom_and_timing() {
		let mut camera = Camera::default();
		let (done, on_done) = counter();
		camera.animate_to(CameraTarget { x: 100.0, y: 0.0, scale: 3.0 }, 100.0, 0.0, Some(on_done));
		camera.tick(50.0);

		camera.center_on(Point::new(500.0, 500.0));
		camera.retarget(Point::new(40.0, 20.0));
		assert_eq!(camera.tick(100.0), AnimationStatus::Finished);
		assert_eq!(camera.pose(), CameraTarget { x: 40.0, y: 20.0, scale: 3.0 });
		assert_eq!(done.get(), 1);
	}

	#[test]
	fn cancelled_flight_stays_put() {
		let mut camera = Camera::default();
		let (done, on_done) = counter();
		camera.animate_to(CameraTarget { x: 100.0, y: 0.0, scale: 3.0 }, 100.0, 0.0, Some(on_done));
		camera.cancel_animation();
		assert_eq!(camera.tick(200.0), AnimationStatus::Idle);
		assert_eq!(camera.pose(), CameraTarget { x: 0.0, y: 0.0, scale: 1.0 });
		assert_eq!(done.get(), 0);
	}

	#[test]
	fn zero_duration_lands_on_first_tick() {
		let mut camera = Camera::default();
		let target = CameraTarget {
			x: 5.0,
			y: 6.0,
			scale: 0.75,
		};
		camera.animate_to(target, 0.0, 10.0, None);
		assert_eq!(camera.tick(10.0), AnimationStatus::Finished);
		assert_eq!(camera.pose(), target);
	}

	proptest! {
		#[test]
		fn screen_world_round_trip(
			cx in -1e4f64..1e4,
			cy in -1e4f64..1e4,
			scale in 0.5f64..3.0,
			sx in -2000f64..4000.0,
			sy in -2000f64..4000.0,
		) {
			let camera = Camera { x: cx, y: cy, ..Camera::new(scale) };
			let back = camera.world_to_screen(camera.screen_to_world(Point::new(sx, sy), VIEW), VIEW);
			prop_assert!((back.x - sx).abs() < 1e-6);
			prop_assert!((back.y - sy).abs() < 1e-6);
		}

		#[test]
		fn wheel_sequences_stay_in_bounds(steps in prop::collection::vec(prop::bool::ANY, 0..300)) {
			let config = CameraConfig::default();
			let mut camera = Camera::default();
			for zoom_in in steps {
				camera.zoom(if zoom_in { 1.0 } else { -1.0 }, &config);
				prop_assert!((0.5..=3.0).contains(&camera.scale));
			}
		}
	}
}
