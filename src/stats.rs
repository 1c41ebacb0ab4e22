//! Offline analytics over the liked-users file
//!
//! Tabulates how often every attribute value occurs across all liked users,
//! for operator inspection. Reads the like-store only; no network.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde_json::Value;

use crate::api::profile::Profile;
use crate::store::LikeStore;

/// attribute name -> value -> occurrence count
pub type FieldFrequencies = BTreeMap<String, BTreeMap<String, usize>>;

/// Count attribute values across profiles. Missing values are tallied under
/// `(none)`; the `id` field is unique per entry and skipped.
pub fn tabulate(profiles: &[Profile]) -> FieldFrequencies {
    let mut freq: FieldFrequencies = BTreeMap::new();

    for profile in profiles {
        let Ok(Value::Object(fields)) = serde_json::to_value(profile) else {
            continue;
        };
        for (name, value) in fields {
            if name == "id" {
                continue;
            }
            let rendered = match value {
                Value::Null => "(none)".to_string(),
                Value::String(s) if s.is_empty() => "(none)".to_string(),
                Value::String(s) => s,
                other => other.to_string(),
            };
            *freq.entry(name).or_default().entry(rendered).or_default() += 1;
        }
    }

    freq
}

/// Load the like-store at `path` and print the frequency table.
pub fn show_stats(path: &Path) -> Result<()> {
    let store = LikeStore::load(path)?;
    let profiles: Vec<Profile> = store.iter().cloned().collect();

    println!("{} liked users in {}", profiles.len(), path.display());
    for (field, values) in tabulate(&profiles) {
        println!("\n{}:", field);
        // most frequent first, ties by value for stable output
        let mut rows: Vec<(&String, &usize)> = values.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (value, count) in rows {
            println!("  {:>4}  {}", count, value);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, school: Option<&str>, gender: Option<&str>) -> Profile {
        let mut p = Profile::with_id(id);
        p.school = school.map(str::to_string);
        p.gender = gender.map(str::to_string);
        p
    }

    #[test]
    fn test_tabulate_counts_values() {
        let profiles = vec![
            profile("u1", Some("MIT"), Some("female")),
            profile("u2", Some("MIT"), Some("male")),
            profile("u3", Some("ENS"), Some("female")),
        ];

        let freq = tabulate(&profiles);
        assert_eq!(freq["school"]["MIT"], 2);
        assert_eq!(freq["school"]["ENS"], 1);
        assert_eq!(freq["gender"]["female"], 2);
    }

    #[test]
    fn test_tabulate_groups_missing_values() {
        let profiles = vec![
            profile("u1", None, None),
            profile("u2", Some(""), None),
        ];

        let freq = tabulate(&profiles);
        assert_eq!(freq["school"]["(none)"], 2);
        assert_eq!(freq["gender"]["(none)"], 2);
    }

    #[test]
    fn test_tabulate_skips_id() {
        let freq = tabulate(&[profile("u1", None, None)]);
        assert!(!freq.contains_key("id"));
    }
}
