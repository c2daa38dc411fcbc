pub mod color;
pub mod controller;
pub mod listener;
pub mod palette;
pub mod units;

pub use color::Color;
pub use controller::{Gesture, PointerEvent, PointerPhase, Response, SelectionController};
pub use listener::{FnListener, Listener, ListenerError, ListenerRegistry, Notification, Source};
pub use palette::Palette;
pub use units::{Bounds, Point};
