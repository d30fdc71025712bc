//! Algorithm constants and runtime configuration defaults

// Pattern extraction settings
/// Default side length of extracted patterns
pub const DEFAULT_PATTERN_SIZE: usize = 2;

/// Default number of wave cells per axis
pub const DEFAULT_CELL_COUNT: usize = 10;

// Solver retry policy
/// Observation attempts allowed per wave cell before a full restart
pub const DEFAULT_ATTEMPT_FACTOR: usize = 2;

/// Full restarts allowed before generation is abandoned
pub const DEFAULT_MAX_RESTARTS: usize = 10;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed number of wave cells
pub const MAX_WAVE_CELLS: usize = 1_000_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 50;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of outputs produced per sample
pub const DEFAULT_OUTPUT_COUNT: usize = 1;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to collapse animation filenames
pub const ANIMATION_SUFFIX: &str = "_collapse";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
