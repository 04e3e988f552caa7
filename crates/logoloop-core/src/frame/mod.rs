mod service;

pub use service::{AnimationHandle, FrameLoop, FrameTick};
