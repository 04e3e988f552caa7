//! Infinite marquee engine
//!
//! Measures one copy of the content, decides how many copies tile the
//! container, and integrates a smoothed scroll offset frame by frame.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `timing` - Frame delta, exponential easing and wrap arithmetic
//! - `content` - Items shown on the track
//! - `media` - Intrinsic image sizes
//!
//! ## L3 Molecular Layer
//! - `layout` - Layout measurer (sequence width, copy count)
//! - `motion` - Velocity integrator
//! - `settle` - Image load/error settling
//! - `observe` - Resize observation with window fallback
//! - `track` - Placement of copies for the render driver
//!
//! ## L2 Organism Layer
//! - `engine` - Per-instance state combining the above
//! - `simulate` - Headless runs with synthetic timestamps
//!
//! # Usage
//!
//! ```ignore
//! use logoloop_core::marquee::{MarqueeEngine, MeasureTrigger};
//!
//! let mut engine = MarqueeEngine::new(&config.marquee);
//! engine.measure(container_width, sequence_width, MeasureTrigger::Mount);
//! engine.begin();
//!
//! // once per frame
//! let transform = engine.frame(Instant::now());
//! ```

// L4 Atomic Layer
pub mod content;
pub mod media;
pub mod timing;

// L3 Molecular Layer
pub mod layout;
pub mod motion;
pub mod observe;
pub mod settle;
pub mod track;

// L2 Organism Layer
pub mod engine;
pub mod simulate;

pub use content::{accessible_labels, InlineItem, MarqueeItem, MediaItem, FALLBACK_LINK_LABEL};
pub use engine::{GoverningInputs, MarqueeEngine};
pub use media::{media_columns, probe_dimensions};
pub use layout::{copies_needed, LayoutMeasurer, LayoutState, MeasureTrigger};
pub use motion::{MotionState, VelocityIntegrator};
pub use observe::{ObservedTarget, ResizeWatch};
pub use settle::{ImageSettleTracker, SettleOutcome, SettleRound};
pub use simulate::{simulate, Simulation, SimulationSample};
pub use track::{ItemKey, PlacedItem, TrackPlan, Transform};
