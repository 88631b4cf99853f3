//! Engine-facing configuration.

use serde::{Deserialize, Serialize};

/// Clearing options that affect the emitted result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClearingConfig {
    /// Surface each winner's adjusted value in the output.
    #[serde(default)]
    pub include_adjusted_value: bool,
}
