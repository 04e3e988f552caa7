pub mod config;
pub mod error;
pub mod frame;
pub mod marquee;
pub mod signal;

pub use config::{AppConfig, ContainerWidth, Direction, MarqueeConfig, ThemeConfig, ThemeMode};
pub use error::{Error, Result};
pub use frame::{AnimationHandle, FrameTick};
pub use marquee::{MarqueeEngine, MarqueeItem};
pub use signal::{ThemeSignal, ThemeSubscription};
