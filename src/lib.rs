//! Projectile flight paths: the closed-form drag-free parabola, an RK4
//! integrator for quadratic drag, and the metrics and playback built on them.

pub mod core;
