/// Per-second exponential approach rates. The product rate * delta_time is
/// clamped to 1.0 at the call site, so values above ~60 snap instantly.
pub const SCALE_CONVERGENCE_RATE: f32 = 5.0;
pub const POSITION_CONVERGENCE_RATE: f32 = 2.0;
pub const COLOR_CONVERGENCE_RATE: f32 = 2.0;

/// Cosmetic idle shimmer displacement, applied fresh each tick.
pub const SHIMMER_AMPLITUDE: f32 = 0.02;

/// Per-particle point size, drawn once at allocation.
pub const SIZE_MIN: f32 = 1.0;
pub const SIZE_RANGE: f32 = 1.5;

/// Edge length of the cube the initial random cloud is scattered in.
pub const SPAWN_EXTENT: f32 = 100.0;

/// Scale the swarm starts at before any gesture sample arrives.
pub const DEFAULT_SCALE: f32 = 0.9;

pub const MAX_PARTICLES: usize = 50_000;
pub const DEFAULT_PARTICLE_BUDGET: usize = 50_000;

/// Idle yaw applied to the swarm entity, radians per second.
pub const AUTO_ROTATE_RATE: f32 = 0.06;
