// Library surface for the playground binary, headless tests, and reuse.
// The two primitives (typewriter, position) own no rendering; everything
// terminal-specific stays in main.rs and ui.
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod logging;
pub mod position;
pub mod runtime;
pub mod timer;
pub mod typewriter;

pub use error::{Error, Result};
pub use position::{compute_placement, Align, Coordinate, Placement, Positioner, Rect, Side};
pub use typewriter::{Phase, Typewriter, TypewriterConfig};
