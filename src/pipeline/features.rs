//! Fixed-list feature pruning

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::debug;

/// Result of dropping the pruned feature list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureReport {
    pub original_features: usize,
    pub removed_features: usize,
    pub final_features: usize,
    pub removed_list: Vec<String>,
    pub remaining_features: Vec<String>,
}

/// Names from `pruned` that are columns of `df`, in `pruned` order
pub fn features_to_drop(df: &DataFrame, pruned: &[String]) -> Vec<String> {
    let existing: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    pruned
        .iter()
        .filter(|name| existing.contains(name))
        .cloned()
        .collect()
}

/// Drop the intersection of `pruned` with the columns of `df`.
///
/// Names that are not columns are ignored, so a second call removes nothing.
pub fn remove_features(df: &DataFrame, pruned: &[String]) -> (DataFrame, FeatureReport) {
    let original_features = df.width();
    let to_drop = features_to_drop(df, pruned);

    // Drop columns directly from DataFrame
    let reduced = df.drop_many(&to_drop);
    debug!(removed = to_drop.len(), remaining = reduced.width(), "Pruned features");

    let report = FeatureReport {
        original_features,
        removed_features: to_drop.len(),
        final_features: reduced.width(),
        removed_list: to_drop,
        remaining_features: reduced
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    (reduced, report)
}
