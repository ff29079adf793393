//! JSON request documents accepted by each command.

use classbook_service::catalog::ClassFilter;
use classbook_service::model::{ClassDefinition, QueryWindow};
use serde::Deserialize;

use crate::error::AppResult;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandRequest {
    pub window: QueryWindow,
    pub class: ClassDefinition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub candidate: ClassDefinition,
    /// Existing classes; only those sharing the candidate's branch and its
    /// instructor or room are checked.
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub window: QueryWindow,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub filter: ClassFilter,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// ## Summary
/// Runs [`ClassDefinition::validate`] over every class in a request.
///
/// ## Errors
/// Returns the first validation failure.
pub fn validate_all<'a>(classes: impl IntoIterator<Item = &'a ClassDefinition>) -> AppResult<()> {
    for class in classes {
        class.validate()?;
    }
    Ok(())
}
