//! Factor dataset configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for the ICRP 103 factor dataset source.
///
/// By default the dataset embedded in the binary is used; a file path
/// can be supplied to load an external copy instead. Either way the
/// dataset is read and validated exactly once at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FactorsConfig {
    /// Optional path to an external factor dataset JSON file
    pub dataset_path: Option<String>,
}

impl FactorsConfig {
    /// Validate factors configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(path) = &self.dataset_path {
            if path.trim().is_empty() {
                return Err(ValidationError::EmptyDatasetPath);
            }
        }
        Ok(())
    }
}
