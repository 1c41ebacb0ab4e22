//! Profile record for one remote user

use serde::{Deserialize, Serialize};

/// Field list requested from the per-user resource. The platform returns the
/// full (huge) document unless the query is narrowed to these.
pub const PROFILE_FIELDS: &str =
    "id,fb_id,twitter_id,first_name,display_name,nickname,age,gender,school,job,workplace,has_charmed_me";

/// One remote user's attributes.
///
/// Constructed either from a profile fetch response or from a persisted
/// like-store entry. `id` is the sole key used for lookup and persistence
/// ordering; everything else is optional because the platform omits fields
/// freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    /// Some platform endpoints call this `facebook_id` instead.
    #[serde(default, alias = "facebook_id")]
    pub fb_id: Option<String>,
    #[serde(default)]
    pub twitter_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub workplace: Option<String>,
    #[serde(default)]
    pub has_charmed_me: Option<bool>,
    /// Number of crossings with the authenticated user. Only the crossings
    /// listing reports this, so it is absent on a plain profile fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nb_times: Option<u32>,
}

impl Profile {
    /// Minimal record with just an identifier; the rest stays unset.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fb_id: None,
            twitter_id: None,
            first_name: None,
            display_name: None,
            nickname: None,
            age: None,
            gender: None,
            school: None,
            job: None,
            workplace: None,
            has_charmed_me: None,
            nb_times: None,
        }
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .display_name
            .as_deref()
            .or(self.first_name.as_deref())
            .unwrap_or(&self.id);
        match &self.fb_id {
            Some(fb_id) => write!(f, "{} (http://www.facebook.com/{})", name, fb_id),
            None => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facebook_id_alias() {
        let p: Profile = serde_json::from_str(r#"{"id": "u1", "facebook_id": "fb123"}"#)
            .expect("parse profile");
        assert_eq!(p.fb_id.as_deref(), Some("fb123"));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let p: Profile = serde_json::from_str(
            r#"{"id": "u1", "distance": 12.5, "last_meet_position": {"lat": 0}}"#,
        )
        .expect("parse profile");
        assert_eq!(p.id, "u1");
        assert!(p.school.is_none());
    }

    #[test]
    fn test_nb_times_not_serialized_when_absent() {
        let json = serde_json::to_string(&Profile::with_id("u1")).expect("serialize");
        assert!(!json.contains("nb_times"));
    }

    #[test]
    fn test_display_with_fb_id() {
        let mut p = Profile::with_id("u1");
        p.display_name = Some("Alice".to_string());
        p.fb_id = Some("fb123".to_string());
        assert_eq!(p.to_string(), "Alice (http://www.facebook.com/fb123)");
    }
}
