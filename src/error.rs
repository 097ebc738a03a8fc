//! Error types for physics operations.

use core::fmt;

/// A body, world or collider description that cannot be simulated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Width and height must be finite and non-negative.
    InvalidSize,
    /// Position must be finite.
    NonFinitePosition,
    /// Offset must be finite.
    NonFiniteOffset,
    /// Mass must be positive and finite.
    InvalidMass,
    /// Bounce must be in [0, 1] on both axes.
    InvalidBounce,
    /// Drag must be finite and non-negative.
    InvalidDrag,
    /// Maximum velocity and speed must be finite and non-negative.
    InvalidMaxVelocity,
    /// Frames per second must be positive and finite.
    InvalidFps,
    /// World bounds need a finite origin and a non-negative finite size.
    InvalidWorldBounds,
    /// Cell size must be positive and finite.
    InvalidCellSize,
    /// Gravity and other vectors must be finite.
    NonFiniteVector,
    /// A step or frame delta must be finite and non-negative.
    InvalidTimeStep,
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::InvalidSize => write!(f, "width and height must be finite and non-negative"),
            ConfigurationError::NonFinitePosition => write!(f, "position must be finite"),
            ConfigurationError::NonFiniteOffset => write!(f, "offset must be finite"),
            ConfigurationError::InvalidMass => write!(f, "mass must be positive and finite"),
            ConfigurationError::InvalidBounce => write!(f, "bounce must be in [0, 1]"),
            ConfigurationError::InvalidDrag => write!(f, "drag must be finite and non-negative"),
            ConfigurationError::InvalidMaxVelocity => {
                write!(f, "max velocity must be finite and non-negative")
            }
            ConfigurationError::InvalidFps => write!(f, "fps must be positive and finite"),
            ConfigurationError::InvalidWorldBounds => write!(f, "world bounds must be finite with a non-negative size"),
            ConfigurationError::InvalidCellSize => write!(f, "cell size must be positive and finite"),
            ConfigurationError::NonFiniteVector => write!(f, "vector components must be finite"),
            ConfigurationError::InvalidTimeStep => write!(f, "time step must be finite and non-negative"),
        }
    }
}

/// Errors that can occur during physics operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// A configuration was rejected; nothing was modified.
    Configuration(ConfigurationError),
    /// `step`/`update` was called while a step was already running.
    Reentrancy,
    /// The handle refers to a body, group or collider that no longer exists.
    StaleHandle,
    /// A group only holds bodies of one kind.
    GroupKindMismatch,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::Configuration(e) => write!(f, "invalid configuration: {}", e),
            PhysicsError::Reentrancy => write!(f, "world cannot be stepped from inside a step"),
            PhysicsError::StaleHandle => write!(f, "handle does not refer to a live object"),
            PhysicsError::GroupKindMismatch => {
                write!(f, "group members must all be dynamic or all be static")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

impl core::error::Error for PhysicsError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            PhysicsError::Configuration(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for PhysicsError {
    fn from(e: ConfigurationError) -> Self {
        PhysicsError::Configuration(e)
    }
}
