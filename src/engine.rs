//! Decision engine
//!
//! Evaluates one crossing candidate at a time against the like-store. The
//! engine only decides; dispatching the like/dislike call is the run loop's
//! job.

use anyhow::Result;

use crate::api::client::SessionClient;
use crate::api::profile::Profile;
use crate::store::LikeStore;

/// Outcome for a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    NoAction,
    Like,
    Dislike,
}

/// A profile with no school, or a one-character one, is the signal the
/// platform leaves on inactive or placeholder accounts.
pub fn has_real_school(school: Option<&str>) -> bool {
    school.map_or(false, |s| s.chars().count() >= 2)
}

/// Decide what to do with `candidate_id` crossed `nb_times` times.
///
/// Rule order:
/// 1. a single crossing is not a meaningful signal: no action, no fetch;
/// 2. already in the like-store: no action (the stored crossing count is
///    refreshed when the listing reports a newer one);
/// 3. otherwise fetch the full profile and filter on the school field.
///
/// The store is persisted after every mutation.
pub async fn determine_action(
    client: &SessionClient,
    store: &mut LikeStore,
    candidate_id: &str,
    nb_times: u32,
) -> Result<Decision> {
    if nb_times == 1 {
        return Ok(Decision::NoAction);
    }

    if store.contains(candidate_id) {
        refresh_crossing_count(store, candidate_id, nb_times)?;
        return Ok(Decision::NoAction);
    }

    let mut profile = client.fetch_profile(candidate_id).await?;
    profile.nb_times = Some(nb_times);
    apply_profile_decision(store, profile)
}

/// Post-fetch half of the rule: filter the fetched profile on its school
/// field and record the outcome in the store.
pub fn apply_profile_decision(store: &mut LikeStore, profile: Profile) -> Result<Decision> {
    if has_real_school(profile.school.as_deref()) {
        tracing::debug!(id = %profile.id, school = ?profile.school, "liking candidate");
        store.put(profile);
        store.save()?;
        Ok(Decision::Like)
    } else {
        // The store was already checked before the fetch, so this removal
        // only fires on a re-evaluation path where the entry went stale.
        tracing::debug!(id = %profile.id, "disliking candidate without a school");
        if store.remove(&profile.id).is_some() {
            store.save()?;
        }
        Ok(Decision::Dislike)
    }
}

/// Keep the stored crossing count current with what the listing reports.
fn refresh_crossing_count(store: &mut LikeStore, id: &str, nb_times: u32) -> Result<()> {
    let stale = store
        .get(id)
        .map_or(false, |p| p.nb_times != Some(nb_times));
    if stale {
        if let Some(entry) = store.get_mut(id) {
            entry.nb_times = Some(nb_times);
        }
        store.save()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> LikeStore {
        LikeStore::load(dir.path().join("likes.json")).expect("load")
    }

    fn profile(id: &str, school: Option<&str>) -> Profile {
        let mut p = Profile::with_id(id);
        p.school = school.map(str::to_string);
        p
    }

    #[test]
    fn test_has_real_school() {
        assert!(!has_real_school(None));
        assert!(!has_real_school(Some("")));
        assert!(!has_real_school(Some("X")));
        assert!(has_real_school(Some("MIT")));
        assert!(has_real_school(Some("École Normale")));
    }

    #[test]
    fn test_two_char_school_is_enough() {
        assert!(has_real_school(Some("IT")));
    }

    #[test]
    fn test_apply_decision_likes_real_school() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        let mut p = profile("u1", Some("MIT"));
        p.nb_times = Some(5);
        let decision = apply_profile_decision(&mut store, p).expect("decide");

        assert_eq!(decision, Decision::Like);
        assert!(store.contains("u1"));
        assert_eq!(store.get("u1").and_then(|p| p.nb_times), Some(5));
        // persisted write-through
        assert!(dir.path().join("likes.json").exists());
    }

    #[test]
    fn test_apply_decision_dislikes_missing_school() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);

        let decision =
            apply_profile_decision(&mut store, profile("u2", None)).expect("decide");

        assert_eq!(decision, Decision::Dislike);
        assert!(!store.contains("u2"));
        // nothing was mutated, nothing was flushed
        assert!(!dir.path().join("likes.json").exists());
    }

    #[test]
    fn test_apply_decision_removes_stale_entry_on_dislike() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(&dir);
        store.put(profile("u3", Some("MIT")));
        store.save().expect("save");

        let decision =
            apply_profile_decision(&mut store, profile("u3", Some("X"))).expect("decide");

        assert_eq!(decision, Decision::Dislike);
        assert!(!store.contains("u3"));
        let reloaded = store_in(&dir);
        assert!(!reloaded.contains("u3"));
    }
}
