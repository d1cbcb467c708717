//! JSON-RPC 2.0 command boundary for frontend integration.
//!
//! Implements bidirectional messaging between the engine and an embedding
//! frontend via iframe postMessage: requests with IDs receive responses,
//! notifications flow one way. Parameter validation happens here, before any
//! command event is dispatched, so a rejected request mutates nothing.
//!
//! ## Methods
//!
//! - `set_model`: switch the generated shape (`tree`, `heart`, `flower`,
//!   `saturn`, `fireworks`)
//! - `set_particle_count`: change the particle budget (clamped to capacity)
//! - `set_base_color`: flat manual color override (`#rrggbb`)
//! - `set_segment_colors`: two-color override split by structural segment
//! - `clear_base_color`: drop the manual override
//! - `set_gesture_enabled` / `set_emotion_enabled`: pin or free the vision
//!   channels
//! - `get_fps`: current smoothed frame rate
//! - `get_vision_state`: last acted-on sample, live scale, degraded flag
//!
//! ## Notifications
//!
//! - `vision_sample`: emitted whenever the acted-on gesture/emotion sample
//!   changes

pub mod web_rpc;
