//! # Selection controller
//!
//! Turns a stream of pointer events into selection notifications. Implemented as a two-state machine:
//!
//! * `Idle` - no gesture in progress. `Press` (or a stray `Move`) starts tracking.
//! * `Tracking` - each `Press`/`Move` asks the palette what is under the pointer, notifying listeners if the
//!   selection changed.
//!
//! `Release` is answered in either state: it confirms the selection if made inside the surface and cancels otherwise,
//! then returns to `Idle`. `Cancel` from the host ends a gesture silently.
//!
//! Only one pointer is tracked. A second simultaneous pointer is not told apart from the first.

use crate::{
    color::Color,
    listener::{Listener, ListenerRegistry, Notification, NotifyError, Source},
    palette::Palette,
    units::{Bounds, Point},
};

#[derive(strum::AsRefStr, strum::EnumIter, PartialEq, Eq, Copy, Clone, Hash, Debug)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
    /// The host abandoned the pointer, eg. it was captured by something else.
    Cancel,
    /// Pointer motion with nothing pressed.
    Hover,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    /// In the host surface's local space.
    pub position: Point,
}
impl PointerEvent {
    #[must_use]
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
    #[must_use]
    pub fn press(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Press, x, y)
    }
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Move, x, y)
    }
    #[must_use]
    pub fn release(x: f32, y: f32) -> Self {
        Self::new(PointerPhase::Release, x, y)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Tracking,
}

bitflags::bitflags! {
    /// What the host should do with an event after the controller has seen it.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
    #[repr(transparent)]
    pub struct Response : u8 {
        /// The event was handled, and should not reach whatever lies under the picker.
        const CONSUMED = 0b0000_0001;
        /// The selection changed, the palette needs to be redrawn.
        const REDRAW   = 0b0000_0010;
    }
}
impl Response {
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self.contains(Self::CONSUMED)
    }
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        self.contains(Self::REDRAW)
    }
}

pub struct SelectionController<P> {
    palette: P,
    listeners: ListenerRegistry,
    /// Last known rect of the host surface. Releases are tested against this, not the palette's geometry.
    bounds: Bounds,
    gesture: Gesture,
}
impl<P: Palette> SelectionController<P> {
    /// Wrap a palette. Pass `&mut palette` to leave ownership with the caller.
    pub fn new(palette: P, bounds: Bounds) -> Self {
        Self {
            palette,
            listeners: ListenerRegistry::new(),
            bounds,
            gesture: Gesture::Idle,
        }
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.palette.selected_color()
    }
    /// Set the selection without notifying anyone.
    pub fn set_color(&mut self, color: Color) {
        log::trace!("programmatic select {color}");
        self.palette.select_color(color);
    }
    /// The host surface was resized. Keeps the current origin.
    pub fn on_size_changed(&mut self, width: f32, height: f32) {
        self.bounds = self.bounds.with_size(width, height);
        self.palette.update_size(width, height);
    }
    /// The host surface moved or was resized. Only the size is forwarded to the palette.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.palette.update_size(bounds.width(), bounds.height());
    }
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }
    pub fn draw(&self, surface: &mut P::Surface) {
        self.palette.draw(surface);
    }
    /// Append a listener. Registering the same listener twice notifies it twice.
    pub fn add_listener(&mut self, listener: impl Listener + 'static) {
        self.listeners.add(listener);
    }
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
    pub fn palette(&self) -> &P {
        &self.palette
    }
    pub fn palette_mut(&mut self) -> &mut P {
        &mut self.palette
    }
    pub fn into_palette(self) -> P {
        self.palette
    }
    /// Feed one pointer event through the state machine.
    ///
    /// # Errors
    /// A listener failed, and the listeners after it did not hear about this event.
    /// Any state change (selection, gesture) has already been applied, so the host should still redraw.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) -> Result<Response, NotifyError> {
        let PointerEvent { phase, position } = event;
        log::trace!(
            "{} at ({}, {}) while {:?}",
            phase.as_ref(),
            position.x,
            position.y,
            self.gesture
        );
        match (phase, self.gesture) {
            (PointerPhase::Press | PointerPhase::Move, _) => {
                self.gesture = Gesture::Tracking;
                if !self.palette.select_at(position) {
                    // Swallowed, even if the palette had nothing there.
                    return Ok(Response::CONSUMED);
                }
                let color = self.palette.selected_color();
                log::debug!("selection changed to {color}");
                self.notify(Notification::Changed(color))?;
                Ok(Response::CONSUMED | Response::REDRAW)
            }
            // A release always settles the pick, even without a press before it.
            (PointerPhase::Release, _) => {
                // Leave the gesture first, so a failing listener can't strand us in `Tracking`.
                self.gesture = Gesture::Idle;
                let notification = if self.bounds.contains(position) {
                    let color = self.palette.selected_color();
                    log::debug!("selection confirmed as {color}");
                    Notification::Selected(color)
                } else {
                    log::debug!("selection cancelled, released outside {:?}", self.bounds);
                    Notification::Cancel
                };
                self.notify(notification)?;
                Ok(Response::CONSUMED)
            }
            (PointerPhase::Cancel, Gesture::Tracking) => {
                log::debug!("gesture abandoned by host");
                self.gesture = Gesture::Idle;
                Ok(Response::empty())
            }
            (PointerPhase::Cancel | PointerPhase::Hover, _) => Ok(Response::empty()),
        }
    }
    fn notify(&mut self, notification: Notification) -> Result<(), NotifyError> {
        // Split borrow - listeners get the palette through `Source` while the registry iterates.
        let Self {
            palette,
            listeners,
            bounds,
            ..
        } = self;
        let mut source = Source::new(palette, *bounds);
        match notification {
            Notification::Changed(color) => listeners.notify_changed(&mut source, color),
            Notification::Selected(color) => listeners.notify_selected(&mut source, color),
            Notification::Cancel => listeners.notify_cancel(&mut source),
        }
    }
}
impl<P> std::fmt::Debug for SelectionController<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("listeners", &self.listeners)
            .field("bounds", &self.bounds)
            .field("gesture", &self.gesture)
            .finish_non_exhaustive()
    }
}
