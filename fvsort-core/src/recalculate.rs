//! Batch recalculation of custom orders
//!
//! After a site's alphabet or confusables change, every stored entry needs a
//! fresh cleaned title and custom order. [`recalculate`] computes both and
//! reports which entries changed and which unknown characters remain.

use crate::collation::OOV_FLAG;
use crate::site::{has_unknown_characters, SiteAlphabet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A stored entry: its title and the custom order saved with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    #[serde(default)]
    pub custom_order: Option<String>,
}

impl Entry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            custom_order: None,
        }
    }

    pub fn with_custom_order(title: impl Into<String>, custom_order: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            custom_order: Some(custom_order.into()),
        }
    }
}

/// An entry whose title or custom order changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedEntry {
    /// Title before cleanup
    pub title: String,
    /// Cleaned title, empty when the title did not change
    pub cleaned_title: String,
    pub is_title_updated: bool,
    pub previous_custom_order: Option<String>,
    /// New custom order, empty when it did not change
    pub new_custom_order: String,
}

/// Result of recalculating a batch of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationReport {
    /// Occurrences of each unknown character, keyed by its custom order (`⚑` + character)
    pub unknown_character_count: BTreeMap<String, usize>,
    pub updated_entries: Vec<UpdatedEntry>,
}

/// Per-entry outcome before merging
struct Outcome {
    entry: Entry,
    updated: Option<UpdatedEntry>,
    unknown: Vec<String>,
}

/// Clean the title and compute its custom order
pub fn recalculate_entry(site: &SiteAlphabet, entry: &Entry) -> Entry {
    let cleaned_title = site.clean_confusables(&entry.title);
    let custom_order = site.custom_order(&cleaned_title);
    Entry {
        title: cleaned_title,
        custom_order: Some(custom_order),
    }
}

fn process(site: &SiteAlphabet, entry: &Entry) -> Outcome {
    let recalculated = recalculate_entry(site, entry);
    let cleaned_title = recalculated.title.as_str();
    let new_order = recalculated.custom_order.as_deref().unwrap_or_default();

    let order_changed = entry.custom_order.as_deref() != Some(new_order);
    let title_changed = entry.title != cleaned_title;
    let updated = (order_changed || title_changed).then(|| UpdatedEntry {
        title: entry.title.clone(),
        cleaned_title: if title_changed {
            cleaned_title.to_string()
        } else {
            String::new()
        },
        is_title_updated: title_changed,
        previous_custom_order: entry.custom_order.clone(),
        new_custom_order: if order_changed {
            new_order.to_string()
        } else {
            String::new()
        },
    });

    // split by character, then look each one up on its own
    let unknown = if new_order.contains(OOV_FLAG) {
        site.character_list(cleaned_title)
            .iter()
            .map(|ch| site.custom_order(ch))
            .filter(|order| has_unknown_characters(order))
            .collect()
    } else {
        Vec::new()
    };

    Outcome {
        entry: recalculated,
        updated,
        unknown,
    }
}

fn process_all(site: &SiteAlphabet, entries: &[Entry]) -> Vec<Outcome> {
    #[cfg(feature = "parallel")]
    {
        entries.par_iter().map(|entry| process(site, entry)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        entries.iter().map(|entry| process(site, entry)).collect()
    }
}

/// Recalculate every entry and report the changes
///
/// Updated entries are listed in input order.
pub fn recalculate(site: &SiteAlphabet, entries: &[Entry]) -> RecalculationReport {
    recalculate_with_entries(site, entries).0
}

/// Like [`recalculate`], also returning every entry with its new title and custom order
pub fn recalculate_with_entries(
    site: &SiteAlphabet,
    entries: &[Entry],
) -> (RecalculationReport, Vec<Entry>) {
    let mut report = RecalculationReport::default();
    let mut recalculated = Vec::with_capacity(entries.len());

    for outcome in process_all(site, entries) {
        for order in outcome.unknown {
            *report.unknown_character_count.entry(order).or_insert(0) += 1;
        }
        if let Some(updated) = outcome.updated {
            report.updated_entries.push(updated);
        }
        recalculated.push(outcome.entry);
    }

    log::info!(
        "Recalculated {} entries for {}: {} updated, {} unknown characters",
        entries.len(),
        site.code(),
        report.updated_entries.len(),
        report.unknown_character_count.len()
    );

    (report, recalculated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::confusables::ConfusableMap;

    fn site() -> SiteAlphabet {
        let alphabet = Alphabet::with_variants(["a", "b", "c"], [("A", "a")]).unwrap();
        let confusables = ConfusableMap::from_pairs([("á", "a")]).unwrap();
        SiteAlphabet::new("fv-test", "FV Test", alphabet, vec!["-".to_string()], confusables)
            .unwrap()
    }

    #[test]
    fn test_unchanged_entries_are_not_reported() {
        let site = site();
        let order = site.custom_order("abc");
        let report = recalculate(&site, &[Entry::with_custom_order("abc", order)]);
        assert!(report.updated_entries.is_empty());
        assert!(report.unknown_character_count.is_empty());
    }

    #[test]
    fn test_title_and_order_updates() {
        let site = site();
        let report = recalculate(&site, &[Entry::new("ábc")]);

        assert_eq!(report.updated_entries.len(), 1);
        let updated = &report.updated_entries[0];
        assert_eq!(updated.title, "ábc");
        assert_eq!(updated.cleaned_title, "abc");
        assert!(updated.is_title_updated);
        assert_eq!(updated.previous_custom_order, None);
        assert_eq!(updated.new_custom_order, site.custom_order("abc"));
    }

    #[test]
    fn test_order_only_update() {
        let site = site();
        let report = recalculate(&site, &[Entry::with_custom_order("ab", "stale")]);
        let updated = &report.updated_entries[0];
        assert_eq!(updated.cleaned_title, "");
        assert!(!updated.is_title_updated);
        assert_eq!(updated.previous_custom_order.as_deref(), Some("stale"));
        assert_eq!(updated.new_custom_order, "!#");
    }

    #[test]
    fn test_unknown_character_counts() {
        let site = site();
        let entries = [Entry::new("adx"), Entry::new("d-d"), Entry::new("abc")];
        let report = recalculate(&site, &entries);

        assert_eq!(report.unknown_character_count.get("⚑d"), Some(&3));
        assert_eq!(report.unknown_character_count.get("⚑x"), Some(&1));
        assert_eq!(report.unknown_character_count.len(), 2);
    }

    #[test]
    fn test_updated_entries_keep_input_order() {
        let site = site();
        let entries: Vec<Entry> = (0..50).map(|i| Entry::new(format!("a{i}"))).collect();
        let (report, recalculated) = recalculate_with_entries(&site, &entries);

        let titles: Vec<_> = report.updated_entries.iter().map(|e| e.title.clone()).collect();
        let expected: Vec<_> = entries.iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, expected);
        assert_eq!(recalculated.len(), 50);
        assert!(recalculated.iter().all(|e| e.custom_order.is_some()));
    }

    #[test]
    fn test_report_serializes_like_task_result() {
        let site = site();
        let report = recalculate(&site, &[Entry::new("ád")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["unknown_character_count"]["⚑d"], 1);
        assert_eq!(json["updated_entries"][0]["cleaned_title"], "ad");
        assert_eq!(json["updated_entries"][0]["is_title_updated"], true);
    }
}
