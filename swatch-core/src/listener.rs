//! # Listeners
//!
//! Observers of the picker's selection. Listeners are notified synchronously, in the order they were registered,
//! every time the selection changes, is confirmed, or is cancelled.
//!
//! Registration is append-only. The same listener may be registered more than once (see the impl for
//! `Rc<RefCell<L>>`), in which case it is notified once per registration.

use crate::{color::Color, palette::Palette, units::Bounds};

#[derive(thiserror::Error, Debug)]
pub enum ListenerError {
    #[error("notification receiver disconnected")]
    Disconnected,
    #[error("listener is already borrowed")]
    Busy,
    #[error("listener rejected the notification: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(
    strum::AsRefStr, strum::EnumIter, PartialEq, Eq, Copy, Clone, Hash, Debug,
)]
pub enum NotificationKind {
    Changed,
    Selected,
    Cancel,
}

/// A single notification, as a value. Useful for sending through channels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Notification {
    /// The selection moved to this color mid-gesture.
    Changed(Color),
    /// The gesture ended inside the surface, confirming this color.
    Selected(Color),
    /// The gesture ended outside the surface.
    Cancel,
}
impl Notification {
    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Changed(_) => NotificationKind::Changed,
            Self::Selected(_) => NotificationKind::Selected,
            Self::Cancel => NotificationKind::Cancel,
        }
    }
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        match self {
            Self::Changed(c) | Self::Selected(c) => Some(*c),
            Self::Cancel => None,
        }
    }
}
impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Changed(c) => write!(f, "changed {c}"),
            Self::Selected(c) => write!(f, "selected {c}"),
            Self::Cancel => f.write_str("cancel"),
        }
    }
}

/// A listener failed, stopping the fan-out. Listeners after `index` were not notified.
#[derive(thiserror::Error, Debug)]
#[error("listener #{index} failed handling {kind:?}")]
pub struct NotifyError {
    pub index: usize,
    pub kind: NotificationKind,
    #[source]
    pub source: ListenerError,
}

/// Object-safe view of a palette's selection.
pub(crate) trait SelectionAccess {
    fn get(&self) -> Color;
    fn set(&mut self, color: Color);
}
impl<P: Palette> SelectionAccess for P {
    fn get(&self) -> Color {
        self.selected_color()
    }
    fn set(&mut self, color: Color) {
        self.select_color(color);
    }
}

/// The picker that emitted a notification. Listeners may read and set the selection through it while being notified.
pub struct Source<'a> {
    selection: &'a mut dyn SelectionAccess,
    bounds: Bounds,
}
impl<'a> Source<'a> {
    pub(crate) fn new(selection: &'a mut dyn SelectionAccess, bounds: Bounds) -> Self {
        Self { selection, bounds }
    }
    /// The palette's current selection. This may differ from the color of the notification being handled,
    /// if an earlier listener has set it.
    #[must_use]
    pub fn color(&self) -> Color {
        self.selection.get()
    }
    /// Silently set the selection. No further notifications are emitted, and listeners later in the current fan-out
    /// still receive the original color.
    pub fn set_color(&mut self, color: Color) {
        self.selection.set(color);
    }
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// Observer of a picker. Every method defaults to doing nothing.
///
/// Returning an error aborts the fan-out: listeners registered after this one will not hear about this event.
pub trait Listener {
    fn on_color_changed(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        let _ = (source, color);
        Ok(())
    }
    fn on_color_selected(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        let _ = (source, color);
        Ok(())
    }
    fn on_cancel(&mut self, source: &mut Source<'_>) -> Result<(), ListenerError> {
        let _ = source;
        Ok(())
    }
}

impl<L: Listener + ?Sized> Listener for Box<L> {
    fn on_color_changed(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        (**self).on_color_changed(source, color)
    }
    fn on_color_selected(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        (**self).on_color_selected(source, color)
    }
    fn on_cancel(&mut self, source: &mut Source<'_>) -> Result<(), ListenerError> {
        (**self).on_cancel(source)
    }
}
/// Share one listener between several registrations, or keep a handle to it for inspection.
impl<L: Listener + ?Sized> Listener for std::rc::Rc<std::cell::RefCell<L>> {
    fn on_color_changed(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        self.try_borrow_mut()
            .map_err(|_| ListenerError::Busy)?
            .on_color_changed(source, color)
    }
    fn on_color_selected(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        self.try_borrow_mut()
            .map_err(|_| ListenerError::Busy)?
            .on_color_selected(source, color)
    }
    fn on_cancel(&mut self, source: &mut Source<'_>) -> Result<(), ListenerError> {
        self.try_borrow_mut()
            .map_err(|_| ListenerError::Busy)?
            .on_cancel(source)
    }
}
/// Forward every notification into a channel. Fails with [`ListenerError::Disconnected`] once the receiver is gone.
impl Listener for crossbeam::channel::Sender<Notification> {
    fn on_color_changed(&mut self, _: &mut Source<'_>, color: Color) -> Result<(), ListenerError> {
        self.send(Notification::Changed(color))
            .map_err(|_| ListenerError::Disconnected)
    }
    fn on_color_selected(&mut self, _: &mut Source<'_>, color: Color) -> Result<(), ListenerError> {
        self.send(Notification::Selected(color))
            .map_err(|_| ListenerError::Disconnected)
    }
    fn on_cancel(&mut self, _: &mut Source<'_>) -> Result<(), ListenerError> {
        self.send(Notification::Cancel)
            .map_err(|_| ListenerError::Disconnected)
    }
}

type ColorCallback = Box<dyn FnMut(&mut Source<'_>, Color) -> Result<(), ListenerError>>;
type CancelCallback = Box<dyn FnMut(&mut Source<'_>) -> Result<(), ListenerError>>;

/// A listener built from closures. Unset callbacks do nothing.
#[derive(Default)]
pub struct FnListener {
    changed: Option<ColorCallback>,
    selected: Option<ColorCallback>,
    cancel: Option<CancelCallback>,
}
impl FnListener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn with_changed(
        mut self,
        f: impl FnMut(&mut Source<'_>, Color) -> Result<(), ListenerError> + 'static,
    ) -> Self {
        self.changed = Some(Box::new(f));
        self
    }
    #[must_use]
    pub fn with_selected(
        mut self,
        f: impl FnMut(&mut Source<'_>, Color) -> Result<(), ListenerError> + 'static,
    ) -> Self {
        self.selected = Some(Box::new(f));
        self
    }
    #[must_use]
    pub fn with_cancel(
        mut self,
        f: impl FnMut(&mut Source<'_>) -> Result<(), ListenerError> + 'static,
    ) -> Self {
        self.cancel = Some(Box::new(f));
        self
    }
}
impl Listener for FnListener {
    fn on_color_changed(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        self.changed.as_mut().map_or(Ok(()), |f| f(source, color))
    }
    fn on_color_selected(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), ListenerError> {
        self.selected.as_mut().map_or(Ok(()), |f| f(source, color))
    }
    fn on_cancel(&mut self, source: &mut Source<'_>) -> Result<(), ListenerError> {
        self.cancel.as_mut().map_or(Ok(()), |f| f(source))
    }
}

/// Ordered, append-only set of listeners.
#[derive(Default)]
pub struct ListenerRegistry {
    // Pickers rarely have more than a couple of observers.
    listeners: smallvec::SmallVec<[Box<dyn Listener>; 2]>,
}
impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Append a listener. No check is made for duplicates.
    pub fn add(&mut self, listener: impl Listener + 'static) {
        self.listeners.push(Box::new(listener));
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
    pub(crate) fn notify_changed(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), NotifyError> {
        self.notify(source, Notification::Changed(color))
    }
    pub(crate) fn notify_selected(
        &mut self,
        source: &mut Source<'_>,
        color: Color,
    ) -> Result<(), NotifyError> {
        self.notify(source, Notification::Selected(color))
    }
    pub(crate) fn notify_cancel(&mut self, source: &mut Source<'_>) -> Result<(), NotifyError> {
        self.notify(source, Notification::Cancel)
    }
    /// Deliver to every listener in registration order, stopping at the first failure.
    pub(crate) fn notify(
        &mut self,
        source: &mut Source<'_>,
        notification: Notification,
    ) -> Result<(), NotifyError> {
        for (index, listener) in self.listeners.iter_mut().enumerate() {
            let result = match notification {
                Notification::Changed(color) => listener.on_color_changed(source, color),
                Notification::Selected(color) => listener.on_color_selected(source, color),
                Notification::Cancel => listener.on_cancel(source),
            };
            if let Err(err) = result {
                log::warn!("listener #{index} failed on {notification}: {err}");
                return Err(NotifyError {
                    index,
                    kind: notification.kind(),
                    source: err,
                });
            }
        }
        Ok(())
    }
}
impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("len", &self.len())
            .finish()
    }
}
