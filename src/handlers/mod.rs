pub mod health;
pub mod overlay;
pub mod page;
pub mod predict;

use crate::postprocess::geometry::Size;
use crate::predict::Predictor;

/// Shared across all handlers.
pub struct AppState {
    pub predictor: Predictor,
    /// Size of the results-page overlay container.
    pub overlay: Size,
}
