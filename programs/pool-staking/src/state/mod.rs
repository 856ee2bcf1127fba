// =============================================================================
// State Module
// =============================================================================
// Registry -> Pool -> Position. The registry hands out pool ids, each pool
// carries its own reward accumulator, and each position checkpoints against
// its pool's accumulator.
// =============================================================================

pub mod pool;
pub mod position;
pub mod registry;

pub use pool::*;
pub use position::*;
pub use registry::*;
