mod marquee;
mod popup;
mod status_bar;

pub use marquee::{fade_columns, MarqueeWidget};
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
