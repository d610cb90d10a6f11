//! Suffix policy
//!
//! Narrows the active languages for a file from its name.

use crate::config::SuffixRule;
use crate::lang::Language;
use std::collections::{BTreeMap, BTreeSet};

/// Active languages for a file stem.
///
/// The first enabled suffix rule (in `en`, `ru`, `uk` order) whose suffix
/// ends the stem wins and narrows the set to that one language. Otherwise
/// the globally enabled languages apply.
pub fn active_languages(
    stem: &str,
    enable_languages: &[Language],
    suffix_filters: &BTreeMap<Language, SuffixRule>,
) -> BTreeSet<Language> {
    for lang in Language::ALL {
        if let Some(rule) = suffix_filters.get(&lang) {
            if rule.enabled && !rule.suffix.is_empty() && stem.ends_with(&rule.suffix) {
                return BTreeSet::from([lang]);
            }
        }
    }
    enable_languages.iter().copied().collect()
}
