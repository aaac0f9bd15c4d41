mod draggable;
mod scroll_view;
mod scrollbar;
mod toggle;

pub use draggable::Draggable;
pub use scroll_view::{ScrollAxis, ScrollView};
pub use scrollbar::Scrollbar;
pub use toggle::Toggle;
