//! The container's view stack and the per-transition context.

use std::fmt;

use swipetab_core::Rect;

use super::strategy::{Direction, TransitionRequest};
use crate::error::TransitionError;
use swipetab_core::logging::targets;

/// A tab's root view as seen by the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabView {
    pub tab: usize,
    pub frame: Rect,
}

impl TabView {
    pub fn new(tab: usize, frame: Rect) -> Self {
        Self { tab, frame }
    }
}

/// Z-order placement of an inserted view relative to a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewOrder {
    Above,
    Below,
}

/// Which of the two transitioning views an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRole {
    /// The outgoing view.
    From,
    /// The incoming view.
    To,
}

/// Subviews of the tab container, ordered bottom to top.
///
/// Each tab appears at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewStack {
    views: Vec<TabView>,
}

impl ViewStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack holding a single view.
    pub fn with_view(view: TabView) -> Self {
        Self { views: vec![view] }
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn contains(&self, tab: usize) -> bool {
        self.position(tab).is_some()
    }

    /// Views from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &TabView> {
        self.views.iter()
    }

    /// Tab indices from bottom to top.
    pub fn tabs(&self) -> Vec<usize> {
        self.views.iter().map(|view| view.tab).collect()
    }

    /// The topmost view.
    pub fn top(&self) -> Option<&TabView> {
        self.views.last()
    }

    pub fn get(&self, tab: usize) -> Option<&TabView> {
        self.views.iter().find(|view| view.tab == tab)
    }

    pub fn frame(&self, tab: usize) -> Option<Rect> {
        self.get(tab).map(|view| view.frame)
    }

    /// Set the frame of a view. Returns `false` if the tab is not in the stack.
    pub fn set_frame(&mut self, tab: usize, frame: Rect) -> bool {
        match self.views.iter_mut().find(|view| view.tab == tab) {
            Some(view) => {
                view.frame = frame;
                true
            }
            None => false,
        }
    }

    /// Add a view on top, replacing any existing view for the same tab.
    pub fn push(&mut self, view: TabView) {
        self.remove(view.tab);
        self.views.push(view);
    }

    /// Insert a view directly above or below `sibling`.
    ///
    /// Returns `false` (and leaves the stack untouched) if `sibling` is not
    /// present or is the view being inserted.
    pub fn insert(&mut self, view: TabView, order: ViewOrder, sibling: usize) -> bool {
        if view.tab == sibling || !self.contains(sibling) {
            return false;
        }
        self.remove(view.tab);
        let Some(index) = self.position(sibling) else {
            return false;
        };
        let index = match order {
            ViewOrder::Above => index + 1,
            ViewOrder::Below => index,
        };
        self.views.insert(index, view);
        true
    }

    pub fn remove(&mut self, tab: usize) -> Option<TabView> {
        let index = self.position(tab)?;
        Some(self.views.remove(index))
    }

    pub fn clear(&mut self) {
        self.views.clear();
    }

    fn position(&self, tab: usize) -> Option<usize> {
        self.views.iter().position(|view| view.tab == tab)
    }
}

impl fmt::Display for ViewStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, view) in self.views.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}@{}", view.tab, view.frame.left())?;
        }
        f.write_str("]")
    }
}

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The incoming tab is now the only visible view.
    Completed,
    /// The view stack was restored to its pre-transition state.
    Cancelled,
}

impl TransitionOutcome {
    #[inline]
    pub fn is_completed(self) -> bool {
        self == TransitionOutcome::Completed
    }
}

/// State shared by the animator, the strategy and the interaction controller
/// for the lifetime of one transition.
///
/// The context owns the container's view stack while the transition runs;
/// [`into_stack`](Self::into_stack) hands it back once an outcome is known.
#[derive(Debug)]
pub struct TransitionContext {
    request: TransitionRequest,
    bounds: Rect,
    stack: ViewStack,
    from_initial_frame: Option<Rect>,
    incoming: Option<TabView>,
    is_animated: bool,
    is_interactive: bool,
    cancelled: bool,
    outcome: Option<TransitionOutcome>,
}

impl TransitionContext {
    /// Create a context for `request` over `stack`.
    ///
    /// The incoming view starts out detached, framed to `bounds`. The context
    /// is animated and non-interactive by default.
    pub fn new(request: TransitionRequest, bounds: Rect, stack: ViewStack) -> Self {
        let from_initial_frame = stack.frame(request.from_index);
        let incoming = TabView::new(request.to_index, bounds);
        Self {
            request,
            bounds,
            stack,
            from_initial_frame,
            incoming: Some(incoming),
            is_animated: true,
            is_interactive: false,
            cancelled: false,
            outcome: None,
        }
    }

    /// Set whether the transition should animate.
    pub fn with_animated(mut self, animated: bool) -> Self {
        self.is_animated = animated;
        self
    }

    /// Set whether the transition is driven by a gesture.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.is_interactive = interactive;
        self
    }

    pub fn request(&self) -> &TransitionRequest {
        &self.request
    }

    pub fn direction(&self) -> Direction {
        self.request.direction
    }

    /// The container's content area.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn stack(&self) -> &ViewStack {
        &self.stack
    }

    pub fn is_animated(&self) -> bool {
        self.is_animated
    }

    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Frame of the outgoing view when the context was created.
    pub fn from_initial_frame(&self) -> Option<Rect> {
        self.from_initial_frame
    }

    /// Tab index of the view playing `role`.
    pub fn tab(&self, role: ViewRole) -> usize {
        match role {
            ViewRole::From => self.request.from_index,
            ViewRole::To => self.request.to_index,
        }
    }

    /// Current frame of a view, whether inserted or still detached.
    pub fn view_frame(&self, role: ViewRole) -> Option<Rect> {
        let tab = self.tab(role);
        self.stack.frame(tab).or_else(|| {
            self.incoming
                .filter(|view| view.tab == tab)
                .map(|view| view.frame)
        })
    }

    /// Whether the incoming view has been added to the stack.
    pub fn is_incoming_inserted(&self) -> bool {
        self.incoming.is_none() && self.stack.contains(self.request.to_index)
    }

    /// Insert the incoming view relative to the outgoing view.
    ///
    /// Calling this again once the view is inserted is a no-op.
    pub fn insert_incoming(&mut self, order: ViewOrder) -> Result<(), TransitionError> {
        self.ensure_pending()?;
        let Some(view) = self.incoming else {
            return if self.stack.contains(self.request.to_index) {
                Ok(())
            } else {
                Err(TransitionError::MissingView {
                    tab: self.request.to_index,
                })
            };
        };
        if !self.stack.insert(view, order, self.request.from_index) {
            return Err(TransitionError::MissingView {
                tab: self.request.from_index,
            });
        }
        self.incoming = None;
        Ok(())
    }

    /// Set the frame of a view.
    pub fn set_frame(&mut self, role: ViewRole, frame: Rect) -> Result<(), TransitionError> {
        self.ensure_pending()?;
        let tab = self.tab(role);
        if self.stack.set_frame(tab, frame) {
            return Ok(());
        }
        match self.incoming.as_mut() {
            Some(view) if view.tab == tab => {
                view.frame = frame;
                Ok(())
            }
            _ => Err(TransitionError::MissingView { tab }),
        }
    }

    /// Move a view horizontally to `dx` points from the container's origin.
    pub fn set_offset(&mut self, role: ViewRole, dx: f32) -> Result<(), TransitionError> {
        let frame = self
            .view_frame(role)
            .ok_or(TransitionError::MissingView { tab: self.tab(role) })?;
        self.set_frame(role, frame.with_origin_x(self.bounds.left() + dx))
    }

    /// Whether the transition has been cancelled.
    pub fn transition_was_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Flag the transition as cancelled. The animator still has to finish
    /// (or reverse) before the context completes.
    pub fn mark_cancelled(&mut self) {
        if self.outcome.is_none() {
            self.cancelled = true;
        }
    }

    /// Report the end of the transition.
    ///
    /// Completing removes the outgoing view. Not completing removes the
    /// incoming view and puts the outgoing view back at its original frame.
    /// Only the first call has any effect; later calls return the recorded
    /// outcome.
    pub fn complete_transition(&mut self, did_complete: bool) -> TransitionOutcome {
        if let Some(outcome) = self.outcome {
            tracing::trace!(
                target: targets::ANIMATION,
                ?outcome,
                "transition already completed"
            );
            return outcome;
        }

        let outcome = if did_complete {
            if let Some(view) = self.incoming.take() {
                self.stack.push(view);
            }
            self.stack.remove(self.request.from_index);
            TransitionOutcome::Completed
        } else {
            self.cancelled = true;
            self.incoming = None;
            self.stack.remove(self.request.to_index);
            if let Some(frame) = self.from_initial_frame {
                self.stack.set_frame(self.request.from_index, frame);
            }
            TransitionOutcome::Cancelled
        };

        tracing::debug!(
            target: targets::ANIMATION,
            from = self.request.from_index,
            to = self.request.to_index,
            ?outcome,
            stack = %self.stack,
            "transition completed"
        );
        self.outcome = Some(outcome);
        outcome
    }

    /// The outcome, once reported.
    pub fn outcome(&self) -> Option<TransitionOutcome> {
        self.outcome
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }

    /// Release the view stack.
    pub fn into_stack(self) -> ViewStack {
        self.stack
    }

    pub(crate) fn stack_mut(&mut self) -> &mut ViewStack {
        &mut self.stack
    }

    fn ensure_pending(&self) -> Result<(), TransitionError> {
        if self.outcome.is_some() {
            Err(TransitionError::AlreadyCompleted)
        } else {
            Ok(())
        }
    }
}

static_assertions::assert_impl_all!(TransitionContext: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::strategy::AnimationStyle;
    use swipetab_core::Size;

    fn bounds() -> Rect {
        Rect::from_size(Size::new(320.0, 480.0))
    }

    fn context() -> TransitionContext {
        let request = TransitionRequest::new(1, 2, Direction::Left, AnimationStyle::SideBySide);
        TransitionContext::new(request, bounds(), ViewStack::with_view(TabView::new(1, bounds())))
    }

    #[test]
    fn test_stack_insert_order() {
        let mut stack = ViewStack::with_view(TabView::new(0, bounds()));
        assert!(stack.insert(TabView::new(1, bounds()), ViewOrder::Above, 0));
        assert!(stack.insert(TabView::new(2, bounds()), ViewOrder::Below, 1));
        assert_eq!(stack.tabs(), vec![0, 2, 1]);
        assert!(!stack.insert(TabView::new(3, bounds()), ViewOrder::Above, 7));
        assert!(!stack.insert(TabView::new(1, bounds()), ViewOrder::Above, 1));
        assert_eq!(stack.to_string(), "[0@0 2@0 1@0]");
    }

    #[test]
    fn test_stack_push_replaces() {
        let mut stack = ViewStack::new();
        stack.push(TabView::new(0, bounds()));
        stack.push(TabView::new(1, bounds()));
        stack.push(TabView::new(0, bounds().with_origin_x(5.0)));
        assert_eq!(stack.tabs(), vec![1, 0]);
        assert_eq!(stack.frame(0).map(|f| f.left()), Some(5.0));
        assert_eq!(stack.top().map(|v| v.tab), Some(0));
    }

    #[test]
    fn test_complete_removes_from_view() {
        let mut ctx = context();
        ctx.insert_incoming(ViewOrder::Above).unwrap();
        assert!(ctx.is_incoming_inserted());
        assert_eq!(ctx.complete_transition(true), TransitionOutcome::Completed);
        assert_eq!(ctx.stack().tabs(), vec![2]);
    }

    #[test]
    fn test_cancel_restores_stack() {
        let mut ctx = context();
        let before = ctx.stack().clone();
        ctx.insert_incoming(ViewOrder::Above).unwrap();
        ctx.set_offset(ViewRole::From, -200.0).unwrap();
        ctx.set_offset(ViewRole::To, 120.0).unwrap();

        assert_eq!(ctx.complete_transition(false), TransitionOutcome::Cancelled);
        assert!(ctx.transition_was_cancelled());
        assert_eq!(ctx.into_stack(), before);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut ctx = context();
        ctx.insert_incoming(ViewOrder::Above).unwrap();
        assert_eq!(ctx.complete_transition(false), TransitionOutcome::Cancelled);
        assert_eq!(ctx.complete_transition(true), TransitionOutcome::Cancelled);
        assert_eq!(ctx.stack().tabs(), vec![1]);
        assert_eq!(
            ctx.insert_incoming(ViewOrder::Above),
            Err(TransitionError::AlreadyCompleted)
        );
    }

    #[test]
    fn test_complete_without_insertion_adds_incoming() {
        let mut ctx = context();
        ctx.complete_transition(true);
        assert_eq!(ctx.stack().tabs(), vec![2]);
        assert_eq!(ctx.stack().frame(2), Some(bounds()));
    }

    #[test]
    fn test_detached_incoming_frame() {
        let mut ctx = context();
        ctx.set_offset(ViewRole::To, 320.0).unwrap();
        assert_eq!(ctx.view_frame(ViewRole::To).map(|f| f.left()), Some(320.0));
        assert!(!ctx.is_incoming_inserted());
        ctx.insert_incoming(ViewOrder::Below).unwrap();
        assert_eq!(ctx.stack().tabs(), vec![2, 1]);
        assert_eq!(ctx.stack().frame(2).map(|f| f.left()), Some(320.0));
    }
}
