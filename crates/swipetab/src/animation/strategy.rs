//! Animation strategies: where the outgoing and incoming tab views start and
//! end for each transition style.
//!
//! A strategy only writes frames into the [`TransitionContext`]; timing and
//! interpolation belong to the animator.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::context::{TransitionContext, ViewOrder, ViewRole};
use crate::error::TransitionError;

/// Parallax divisor for [`AnimationStyle::Push`].
pub const PUSH_PARALLAX_DIVISOR: f32 = 6.0;

/// Edge of a transition: the side of the container the content travels
/// toward.
///
/// `Left` is the forward direction (toward a higher tab index): the incoming
/// view enters from the right and the outgoing view leaves to the left.
/// `Right` is the mirror image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Naive edge for a move between two tab indices.
    ///
    /// Moving to a lower index is `Right`, anything else is `Left`. Wrap-around
    /// overrides are applied by the coordinator.
    pub fn between(from: usize, to: usize) -> Self {
        if from > to { Direction::Right } else { Direction::Left }
    }

    /// Edge matching a horizontal finger movement, or `None` for zero.
    ///
    /// A finger moving left (negative `dx`) drags the content left.
    pub fn from_horizontal(dx: f32) -> Option<Self> {
        if dx < 0.0 {
            Some(Direction::Left)
        } else if dx > 0.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// Sign of the horizontal motion of the content.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Index step taken when swiping toward this edge.
    #[inline]
    pub fn index_step(self) -> isize {
        match self {
            Direction::Left => 1,
            Direction::Right => -1,
        }
    }

    /// The mirrored edge.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Positions the outgoing (`from`) and incoming (`to`) views of a transition.
///
/// Implementations must be pure with respect to their own state: the same
/// context and direction always produce the same frames.
pub trait AnimationStrategy: fmt::Debug + Send + Sync {
    /// Insert the incoming view and place both views at their start frames.
    fn prepare(
        &self,
        context: &mut TransitionContext,
        direction: Direction,
    ) -> Result<(), TransitionError>;

    /// Write the end frames the animation moves the views to.
    fn animate(
        &self,
        context: &mut TransitionContext,
        direction: Direction,
    ) -> Result<(), TransitionError>;
}

/// Built-in transition styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationStyle {
    /// The outgoing view stays put while the incoming view slides over it.
    Overlap,
    /// Both views move together, edge to edge.
    #[default]
    SideBySide,
    /// The incoming view is revealed underneath with a parallax offset.
    Push,
}

impl AnimationStyle {
    /// Where the incoming view goes relative to the outgoing one.
    pub fn view_order(self) -> ViewOrder {
        match self {
            AnimationStyle::Push => ViewOrder::Below,
            AnimationStyle::Overlap | AnimationStyle::SideBySide => ViewOrder::Above,
        }
    }

    /// Distance the incoming view starts from the origin in a container of
    /// `width`.
    fn incoming_offset(self, width: f32) -> f32 {
        match self {
            AnimationStyle::Push => width / PUSH_PARALLAX_DIVISOR,
            AnimationStyle::Overlap | AnimationStyle::SideBySide => width,
        }
    }
}

impl AnimationStrategy for AnimationStyle {
    fn prepare(
        &self,
        context: &mut TransitionContext,
        direction: Direction,
    ) -> Result<(), TransitionError> {
        let offset = self.incoming_offset(context.bounds().width());
        context.insert_incoming(self.view_order())?;
        context.set_offset(ViewRole::To, -direction.sign() * offset)?;
        match self {
            AnimationStyle::Overlap => Ok(()),
            AnimationStyle::SideBySide | AnimationStyle::Push => {
                context.set_offset(ViewRole::From, 0.0)
            }
        }
    }

    fn animate(
        &self,
        context: &mut TransitionContext,
        direction: Direction,
    ) -> Result<(), TransitionError> {
        context.set_offset(ViewRole::To, 0.0)?;
        match self {
            AnimationStyle::Overlap => Ok(()),
            // The outgoing view always leaves completely, uncovering a
            // pushed view underneath.
            AnimationStyle::SideBySide | AnimationStyle::Push => {
                let width = context.bounds().width();
                context.set_offset(ViewRole::From, direction.sign() * width)
            }
        }
    }
}

/// Strategy selection: a built-in style or a host-supplied implementation.
#[derive(Debug, Clone)]
pub enum SwipeAnimation {
    Style(AnimationStyle),
    Custom(Arc<dyn AnimationStrategy>),
}

impl SwipeAnimation {
    /// Wrap a custom strategy.
    pub fn custom(strategy: impl AnimationStrategy + 'static) -> Self {
        SwipeAnimation::Custom(Arc::new(strategy))
    }

    /// The strategy to run.
    pub fn strategy(&self) -> &dyn AnimationStrategy {
        match self {
            SwipeAnimation::Style(style) => style,
            SwipeAnimation::Custom(strategy) => strategy.as_ref(),
        }
    }

    /// The built-in style, if this is not a custom strategy.
    pub fn style(&self) -> Option<AnimationStyle> {
        match self {
            SwipeAnimation::Style(style) => Some(*style),
            SwipeAnimation::Custom(_) => None,
        }
    }
}

impl Default for SwipeAnimation {
    fn default() -> Self {
        SwipeAnimation::Style(AnimationStyle::default())
    }
}

impl From<AnimationStyle> for SwipeAnimation {
    fn from(style: AnimationStyle) -> Self {
        SwipeAnimation::Style(style)
    }
}

impl PartialEq for SwipeAnimation {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SwipeAnimation::Style(a), SwipeAnimation::Style(b)) => a == b,
            (SwipeAnimation::Custom(a), SwipeAnimation::Custom(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

/// One transition between two tabs. Built once and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub from_index: usize,
    pub to_index: usize,
    pub direction: Direction,
    pub style: SwipeAnimation,
}

impl TransitionRequest {
    /// Create a request.
    pub fn new(
        from_index: usize,
        to_index: usize,
        direction: Direction,
        style: impl Into<SwipeAnimation>,
    ) -> Self {
        Self {
            from_index,
            to_index,
            direction,
            style: style.into(),
        }
    }
}

static_assertions::assert_impl_all!(SwipeAnimation: Send, Sync);
static_assertions::assert_impl_all!(TransitionRequest: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::context::{TabView, ViewStack};
    use swipetab_core::{Rect, Size};

    const WIDTH: f32 = 320.0;

    fn bounds() -> Rect {
        Rect::from_size(Size::new(WIDTH, 480.0))
    }

    fn context(style: AnimationStyle, direction: Direction) -> TransitionContext {
        let stack = ViewStack::with_view(TabView::new(0, bounds()));
        TransitionContext::new(TransitionRequest::new(0, 1, direction, style), bounds(), stack)
    }

    fn x(context: &TransitionContext, role: ViewRole) -> f32 {
        context.view_frame(role).map(|frame| frame.left()).unwrap_or(f32::NAN)
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0, 1), Direction::Left);
        assert_eq!(Direction::between(3, 1), Direction::Right);
        assert_eq!(Direction::between(2, 2), Direction::Left);
    }

    #[test]
    fn test_direction_from_horizontal() {
        assert_eq!(Direction::from_horizontal(-3.0), Some(Direction::Left));
        assert_eq!(Direction::from_horizontal(3.0), Some(Direction::Right));
        assert_eq!(Direction::from_horizontal(0.0), None);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Left.index_step(), 1);
    }

    #[test]
    fn test_overlap_keeps_from_view() {
        let style = AnimationStyle::Overlap;
        let mut ctx = context(style, Direction::Left);
        style.prepare(&mut ctx, Direction::Left).unwrap();
        assert_eq!(x(&ctx, ViewRole::To), WIDTH);
        assert_eq!(x(&ctx, ViewRole::From), 0.0);
        assert_eq!(ctx.stack().tabs(), vec![0, 1]);

        style.animate(&mut ctx, Direction::Left).unwrap();
        assert_eq!(x(&ctx, ViewRole::To), 0.0);
        assert_eq!(x(&ctx, ViewRole::From), 0.0);
    }

    #[test]
    fn test_side_by_side_is_symmetric() {
        let style = AnimationStyle::SideBySide;
        for direction in [Direction::Left, Direction::Right] {
            let mut ctx = context(style, direction);
            style.prepare(&mut ctx, direction).unwrap();
            assert_eq!(x(&ctx, ViewRole::To), -direction.sign() * WIDTH);
            assert_eq!(x(&ctx, ViewRole::From), 0.0);

            style.animate(&mut ctx, direction).unwrap();
            assert_eq!(x(&ctx, ViewRole::To), 0.0);
            assert_eq!(x(&ctx, ViewRole::From), direction.sign() * WIDTH);
        }
    }

    #[test]
    fn test_push_parallax_and_order() {
        let style = AnimationStyle::Push;
        let mut ctx = context(style, Direction::Right);
        style.prepare(&mut ctx, Direction::Right).unwrap();
        assert_eq!(ctx.stack().tabs(), vec![1, 0]);
        assert_eq!(x(&ctx, ViewRole::To), -WIDTH / 6.0);

        style.animate(&mut ctx, Direction::Right).unwrap();
        assert_eq!(x(&ctx, ViewRole::To), 0.0);
        assert_eq!(x(&ctx, ViewRole::From), WIDTH);
    }

    #[test]
    fn test_push_uncovers_incoming_view() {
        let style = AnimationStyle::Push;
        let mut ctx = context(style, Direction::Left);
        style.prepare(&mut ctx, Direction::Left).unwrap();
        assert_eq!(x(&ctx, ViewRole::To), WIDTH / 6.0);
        assert_eq!(x(&ctx, ViewRole::From), 0.0);

        style.animate(&mut ctx, Direction::Left).unwrap();
        assert_eq!(x(&ctx, ViewRole::From), -WIDTH);
    }

    #[test]
    fn test_prepare_without_from_view_fails() {
        let request = TransitionRequest::new(0, 1, Direction::Left, AnimationStyle::SideBySide);
        let mut ctx = TransitionContext::new(request, bounds(), ViewStack::new());
        assert_eq!(
            AnimationStyle::SideBySide.prepare(&mut ctx, Direction::Left),
            Err(TransitionError::MissingView { tab: 0 })
        );
    }

    #[test]
    fn test_swipe_animation_equality() {
        #[derive(Debug)]
        struct Still;
        impl AnimationStrategy for Still {
            fn prepare(&self, c: &mut TransitionContext, _: Direction) -> Result<(), TransitionError> {
                c.insert_incoming(ViewOrder::Above)
            }
            fn animate(&self, _: &mut TransitionContext, _: Direction) -> Result<(), TransitionError> {
                Ok(())
            }
        }

        let custom = SwipeAnimation::custom(Still);
        assert_eq!(custom, custom.clone());
        assert_ne!(custom, SwipeAnimation::custom(Still));
        assert_eq!(SwipeAnimation::default(), AnimationStyle::SideBySide.into());
        assert_eq!(custom.style(), None);
    }
}
