//! Compare the operator's selection with the current catalog.
//!
//! Selections are never pruned automatically: an enabled id that disappeared
//! upstream is reported as *stale* so the settings page can flag it, and it
//! stays persisted until the operator unticks it.
use std::collections::{BTreeMap, HashSet};

use crate::catalog::ModelRecord;

/// Catalog grouped for display plus the stale part of the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Records per namespace, namespaces ascending, catalog order inside.
    pub grouped: BTreeMap<String, Vec<ModelRecord>>,
    /// Enabled ids missing from the catalog, in selection order.
    pub stale: Vec<String>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.grouped.is_empty()
    }

    /// Keep only records whose id or name contains `query`
    /// (case-insensitive). Groups left empty are dropped; `stale` is kept.
    pub fn filtered(&self, query: &str) -> Reconciliation {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.clone();
        }

        let grouped = self
            .grouped
            .iter()
            .filter_map(|(namespace, records)| {
                let matching: Vec<ModelRecord> = records
                    .iter()
                    .filter(|record| {
                        record.id.to_lowercase().contains(&query)
                            || record.name.to_lowercase().contains(&query)
                    })
                    .cloned()
                    .collect();
                (!matching.is_empty()).then(|| (namespace.clone(), matching))
            })
            .collect();

        Reconciliation {
            grouped,
            stale: self.stale.clone(),
        }
    }
}

/// Group `catalog` by namespace and find the enabled ids it no longer lists.
pub fn reconcile(catalog: &[ModelRecord], enabled: &[String]) -> Reconciliation {
    let known: HashSet<&str> = catalog.iter().map(|record| record.id.as_str()).collect();

    let stale = enabled
        .iter()
        .filter(|id| !known.contains(id.as_str()))
        .cloned()
        .collect();

    let mut grouped: BTreeMap<String, Vec<ModelRecord>> = BTreeMap::new();
    for record in catalog {
        grouped
            .entry(record.namespace.clone())
            .or_default()
            .push(record.clone());
    }

    Reconciliation { grouped, stale }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(ids: &[&str]) -> Vec<ModelRecord> {
        ids.iter().map(|id| ModelRecord::from_id(id)).collect()
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn groups_sorted_by_namespace_with_other_bucket() {
        let result = reconcile(
            &catalog(&["zai-org/GLM-4.6", "gpt2", "Qwen/Qwen3-8B", "Qwen/Qwen3-32B", "deepseek-ai/R1"]),
            &[],
        );

        let namespaces: Vec<&str> = result.grouped.keys().map(String::as_str).collect();
        assert_eq!(namespaces, vec!["Other", "Qwen", "deepseek-ai", "zai-org"]);

        let qwen: Vec<&str> = result.grouped["Qwen"].iter().map(|r| r.id.as_str()).collect();
        assert_eq!(qwen, vec!["Qwen/Qwen3-8B", "Qwen/Qwen3-32B"]);
        assert_eq!(result.grouped["Other"][0].id, "gpt2");
    }

    #[test]
    fn stale_is_enabled_minus_catalog_in_enabled_order() {
        let result = reconcile(
            &catalog(&["a/one", "b/two"]),
            &ids(&["gone/x", "a/one", "gone/a"]),
        );

        assert_eq!(result.stale, vec!["gone/x", "gone/a"]);
    }

    #[test]
    fn no_stale_when_selection_is_subset() {
        let result = reconcile(&catalog(&["a/one", "b/two", "c"]), &ids(&["c", "a/one"]));
        assert!(result.stale.is_empty());
    }

    #[test]
    fn empty_catalog_makes_every_selection_stale() {
        let result = reconcile(&[], &ids(&["a/one"]));
        assert!(result.is_empty());
        assert_eq!(result.stale, vec!["a/one"]);
    }

    #[test]
    fn filter_is_case_insensitive_and_drops_empty_groups() {
        let result = reconcile(
            &catalog(&["meta-llama/Llama-3.1-8B", "Qwen/Qwen3-8B", "Qwen/QwQ-32B"]),
            &ids(&["old/model"]),
        );

        let filtered = result.filtered("  qwen3 ");
        assert_eq!(filtered.grouped.len(), 1);
        assert_eq!(filtered.grouped["Qwen"].len(), 1);
        assert_eq!(filtered.stale, vec!["old/model"]);

        assert_eq!(result.filtered(""), result);
        assert!(result.filtered("mistral").is_empty());
    }
}
