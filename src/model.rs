//! Wire types exchanged with the second-brain API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a stored content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Note,
    Url,
    Image,
    Doc,
    /// Any kind this client does not know; rendered icon-only.
    #[serde(other)]
    Other,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContentKind::Note => "Note",
            ContentKind::Url => "Url",
            ContentKind::Image => "Image",
            ContentKind::Doc => "Doc",
            ContentKind::Other => "Other",
        };
        f.write_str(name)
    }
}

/// A single stored note or link, as listed by the API.
///
/// Items are never edited in place; the list is refetched after any change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Note text. Primary for [`ContentKind::Note`].
    #[serde(rename = "content", default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Saved link. Primary for [`ContentKind::Url`].
    #[serde(alias = "link", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

/// Content submitted through the add-content action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NewContent {
    Link { title: String, link: String },
    Note { title: String, content: String },
}

impl NewContent {
    #[must_use]
    pub fn link(title: impl Into<String>, link: impl Into<String>) -> Self {
        NewContent::Link {
            title: title.into(),
            link: link.into(),
        }
    }

    #[must_use]
    pub fn note(title: impl Into<String>, content: impl Into<String>) -> Self {
        NewContent::Note {
            title: title.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            NewContent::Link { title, .. } | NewContent::Note { title, .. } => title,
        }
    }
}

/// Username/password pair for signin and signup.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// `{ content: [...] }` listing envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentList {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: Option<String>,
}

/// Optional `{ message }` in signup and error bodies.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MessageBody {
    pub message: Option<String>,
}

/// Answer and matching items from a search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub relevant_content: Vec<ContentItem>,
}

impl SearchResult {
    /// Message shown after a search: the answer, or a generic completion note.
    #[must_use]
    pub fn message(&self) -> &str {
        self.answer
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or("Search completed successfully")
    }
}

/// Response to enabling sharing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    #[serde(default)]
    pub share_link: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl ShareLink {
    /// The link to hand out: `shareLink`, else `hash`.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.share_link
            .as_deref()
            .or(self.hash.as_deref())
            .filter(|l| !l.is_empty())
    }
}

/// Read-only view of another user's collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedBrain {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_with_server_field_names() {
        let json = r#"{"content":[
            {"_id":"a1","title":"Groceries","type":"Note","content":"milk, eggs","createdAt":"2025-07-27T12:00:00Z"},
            {"id":"b2","title":"Talk","type":"Url","link":"https://youtu.be/x","imageUrl":"https://img/x.png","createdAt":"2025-07-28T08:30:00Z"}
        ]}"#;
        let list: ContentList = serde_json::from_str(json).unwrap();
        assert_eq!(list.content.len(), 2);

        let note = &list.content[0];
        assert_eq!(note.id, "a1");
        assert_eq!(note.kind, ContentKind::Note);
        assert_eq!(note.body.as_deref(), Some("milk, eggs"));
        assert!(note.url.is_none());

        let link = &list.content[1];
        assert_eq!(link.kind, ContentKind::Url);
        assert_eq!(link.url.as_deref(), Some("https://youtu.be/x"));
        assert_eq!(link.image_url.as_deref(), Some("https://img/x.png"));
    }

    #[test]
    fn unknown_kind_falls_back_to_other() {
        let json = r#"{"id":"c","title":"t","type":"social","url":"https://x.com/a"}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind, ContentKind::Other);
        assert_eq!(item.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn new_content_serializes_to_link_or_note_shape() {
        let link = serde_json::to_value(NewContent::link("Docs", "https://docs.rs")).unwrap();
        assert_eq!(link, serde_json::json!({"title": "Docs", "link": "https://docs.rs"}));

        let note = serde_json::to_value(NewContent::note("Groceries", "milk")).unwrap();
        assert_eq!(note, serde_json::json!({"title": "Groceries", "content": "milk"}));
    }

    #[test]
    fn share_link_prefers_share_link_over_hash() {
        let both: ShareLink = serde_json::from_str(r#"{"shareLink":"abc","hash":"def"}"#).unwrap();
        assert_eq!(both.link(), Some("abc"));
        let hash_only: ShareLink = serde_json::from_str(r#"{"hash":"def"}"#).unwrap();
        assert_eq!(hash_only.link(), Some("def"));
        assert_eq!(ShareLink::default().link(), None);
    }

    #[test]
    fn search_message_defaults_when_answer_missing() {
        let result: SearchResult = serde_json::from_str(r#"{"relevantContent":[]}"#).unwrap();
        assert_eq!(result.message(), "Search completed successfully");
        let answered = SearchResult {
            answer: Some("Two notes mention milk".into()),
            ..SearchResult::default()
        };
        assert_eq!(answered.message(), "Two notes mention milk");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("alice", "hunter22");
        let shown = format!("{creds:?}");
        assert!(shown.contains("alice"));
        assert!(!shown.contains("hunter22"));
    }
}
