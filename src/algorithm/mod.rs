/// Output assembly from fully collapsed waves
pub mod assembly;
/// Efficient bitset implementation for pattern domain tracking
pub mod bitset;
/// Main solver loop and generation entry points
pub mod executor;
/// Constraint propagation to a fixed point
pub mod propagation;
/// Cell observation and random pattern selection
pub mod selection;
