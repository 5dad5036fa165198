//! Time subsystem.
//!
//! - `FrameClock`: one per window; `tick()` once per presented frame
//! - `AnimationClock`: wall-clock animation phase, no per-frame state

mod animation_clock;
mod frame_clock;

pub use animation_clock::AnimationClock;
pub use frame_clock::{FrameClock, FrameTime};
