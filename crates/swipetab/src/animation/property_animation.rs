//! Frame-driven, scrubbable, reversible animation of view frames.
//!
//! A [`PropertyAnimation`] interpolates each tracked view between a start and
//! an end frame. Time is supplied by the caller through [`tick`]; nothing here
//! reads a clock, so a transition advances exactly as fast as the host's
//! frame loop drives it.
//!
//! [`tick`]: PropertyAnimation::tick

use std::time::Duration;

use swipetab_core::Rect;

use super::context::ViewStack;
use super::easing::Easing;

/// End point an animation stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPosition {
    Start,
    End,
}

/// Start and end frame of one view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTrack {
    pub tab: usize,
    pub from: Rect,
    pub to: Rect,
}

impl FrameTrack {
    pub fn new(tab: usize, from: Rect, to: Rect) -> Self {
        Self { tab, from, to }
    }

    /// Frame at eased progress `t`.
    pub fn frame_at(&self, easing: Easing, t: f32) -> Rect {
        let t = easing.apply(t);
        let origin = self.from.origin.to_vec2().lerp(self.to.origin.to_vec2(), t);
        let from_size = glam::Vec2::new(self.from.width(), self.from.height());
        let to_size = glam::Vec2::new(self.to.width(), self.to.height());
        let size = from_size.lerp(to_size, t);
        Rect::new(origin.x, origin.y, size.x, size.y)
    }
}

/// Animation over a set of frame tracks.
///
/// The animation is created paused at fraction 0. It can be scrubbed with
/// [`set_fraction_complete`](Self::set_fraction_complete) while paused, then
/// continued forward or in reverse.
#[derive(Debug, Clone)]
pub struct PropertyAnimation {
    duration: Duration,
    easing: Easing,
    tracks: Vec<FrameTrack>,
    /// Linear (uneased) progress in `[0, 1]`.
    fraction: f32,
    running: bool,
    reversed: bool,
}

impl PropertyAnimation {
    /// Create a paused animation at fraction 0.
    pub fn new(duration: Duration, easing: Easing, tracks: Vec<FrameTrack>) -> Self {
        Self {
            duration,
            easing,
            tracks,
            fraction: 0.0,
            running: false,
            reversed: false,
        }
    }

    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn tracks(&self) -> &[FrameTrack] {
        &self.tracks
    }

    #[inline]
    pub fn fraction_complete(&self) -> f32 {
        self.fraction
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Start (or resume) playback in the current direction.
    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Scrub to `fraction`. Ignored while running.
    pub fn set_fraction_complete(&mut self, fraction: f32) {
        if !self.running {
            self.fraction = fraction.clamp(0.0, 1.0);
        }
    }

    /// Play toward the start instead of the end.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Resume from the current fraction, covering only the remaining
    /// distance in the remaining share of the duration.
    pub fn continue_animation(&mut self, reversed: bool) {
        self.reversed = reversed;
        self.running = true;
    }

    /// Advance by `delta`. Returns the end point once reached.
    ///
    /// A paused animation never finishes. A zero duration finishes on the
    /// first tick.
    pub fn tick(&mut self, delta: Duration) -> Option<AnimationPosition> {
        if !self.running {
            return None;
        }

        let step = if self.duration.is_zero() {
            1.0
        } else {
            delta.as_secs_f32() / self.duration.as_secs_f32()
        };

        if self.reversed {
            self.fraction = (self.fraction - step).max(0.0);
        } else {
            self.fraction = (self.fraction + step).min(1.0);
        }

        let position = self.position_reached();
        if position.is_some() {
            self.running = false;
        }
        position
    }

    /// Stop and jump to an end point.
    pub fn finish_at(&mut self, position: AnimationPosition) {
        self.running = false;
        self.fraction = match position {
            AnimationPosition::Start => 0.0,
            AnimationPosition::End => 1.0,
        };
    }

    /// Frame of `tab` at the current fraction.
    pub fn frame(&self, tab: usize) -> Option<Rect> {
        self.tracks
            .iter()
            .find(|track| track.tab == tab)
            .map(|track| track.frame_at(self.easing, self.fraction))
    }

    /// Write the current frame of every track into `stack`.
    pub fn apply(&self, stack: &mut ViewStack) {
        for track in &self.tracks {
            stack.set_frame(track.tab, track.frame_at(self.easing, self.fraction));
        }
    }

    fn position_reached(&self) -> Option<AnimationPosition> {
        if self.reversed && self.fraction <= 0.0 {
            Some(AnimationPosition::Start)
        } else if !self.reversed && self.fraction >= 1.0 {
            Some(AnimationPosition::End)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::context::TabView;
    use swipetab_core::Size;

    fn bounds() -> Rect {
        Rect::from_size(Size::new(300.0, 400.0))
    }

    fn slide(duration_ms: u64) -> PropertyAnimation {
        PropertyAnimation::new(
            Duration::from_millis(duration_ms),
            Easing::Linear,
            vec![
                FrameTrack::new(0, bounds(), bounds().with_origin_x(-300.0)),
                FrameTrack::new(1, bounds().with_origin_x(300.0), bounds()),
            ],
        )
    }

    fn x(animation: &PropertyAnimation, tab: usize) -> f32 {
        animation.frame(tab).map(|f| f.left()).unwrap_or(f32::NAN)
    }

    #[test]
    fn test_starts_paused() {
        let mut animation = slide(300);
        assert!(!animation.is_running());
        assert_eq!(animation.tick(Duration::from_millis(500)), None);
        assert_eq!(animation.fraction_complete(), 0.0);
    }

    #[test]
    fn test_runs_to_end() {
        let mut animation = slide(300);
        animation.start();
        assert_eq!(animation.tick(Duration::from_millis(150)), None);
        assert!((x(&animation, 0) + 150.0).abs() < 1e-3);
        assert!((x(&animation, 1) - 150.0).abs() < 1e-3);
        assert_eq!(animation.tick(Duration::from_millis(200)), Some(AnimationPosition::End));
        assert!(!animation.is_running());
        assert_eq!(x(&animation, 1), 0.0);
    }

    #[test]
    fn test_scrub_then_continue() {
        let mut animation = slide(300);
        animation.set_fraction_complete(0.6);
        assert_eq!(animation.fraction_complete(), 0.6);

        animation.continue_animation(false);
        animation.set_fraction_complete(0.1);
        assert_eq!(animation.fraction_complete(), 0.6);

        assert_eq!(animation.tick(Duration::from_millis(60)), None);
        assert_eq!(animation.tick(Duration::from_millis(100)), Some(AnimationPosition::End));
    }

    #[test]
    fn test_reverse_to_start() {
        let mut animation = slide(300);
        animation.set_fraction_complete(0.2);
        animation.continue_animation(true);
        assert!(animation.is_reversed());
        assert_eq!(animation.tick(Duration::from_millis(90)), Some(AnimationPosition::Start));
        assert_eq!(x(&animation, 0), 0.0);
        assert_eq!(x(&animation, 1), 300.0);
    }

    #[test]
    fn test_zero_duration_finishes_on_first_tick() {
        let mut animation = slide(0);
        animation.start();
        assert_eq!(animation.tick(Duration::ZERO), Some(AnimationPosition::End));
    }

    #[test]
    fn test_finish_at_and_apply() {
        let mut animation = slide(300);
        animation.start();
        animation.tick(Duration::from_millis(100));
        animation.finish_at(AnimationPosition::End);

        let mut stack = ViewStack::with_view(TabView::new(0, bounds()));
        stack.push(TabView::new(1, bounds().with_origin_x(300.0)));
        animation.apply(&mut stack);
        assert_eq!(stack.frame(0).map(|f| f.left()), Some(-300.0));
        assert_eq!(stack.frame(1).map(|f| f.left()), Some(0.0));
    }
}
