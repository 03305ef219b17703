use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An article as the backend owns it. The client never mutates one in
/// place; every change goes through a mutation operation and a refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Backend-assigned identifier, serialized under the `_id` key.
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    /// Optional on the wire; the backend normalizes absent to "".
    #[serde(default)]
    pub description: String,
    /// Empty until a summarize operation populates it server-side.
    #[serde(default)]
    pub summary: String,
    /// Naive UTC: the backend emits timestamps without a timezone suffix.
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Article {
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

/// Payload for the create operation. Summary is not user-settable at
/// creation but the backend schema carries the field, so it is sent empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub description: String,
    pub summary: String,
}

/// Partial-update payload. `None` fields are omitted from the body;
/// server-assigned timestamps are not representable here at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// Response of `POST /articles/{id}/summarize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Response of `POST /articles/{id}/embed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn article_deserializes_backend_payload() {
        let json = r#"{
            "_id": "665f1c2ab1e4d2a3c4b5d6e7",
            "title": "On caching",
            "content": "Tags beat timestamps.",
            "description": "",
            "summary": "",
            "created_at": "2024-06-04T09:15:30.123456",
            "updated_at": "2024-06-04T10:00:00"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, "665f1c2ab1e4d2a3c4b5d6e7");
        assert_eq!(article.title, "On caching");
        assert!(!article.has_summary());
        assert!(article.updated_at > article.created_at);
    }

    #[test]
    fn article_tolerates_missing_optional_fields() {
        let json = r#"{
            "_id": "abc",
            "title": "t",
            "content": "c",
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.description, "");
        assert_eq!(article.summary, "");
    }

    #[test]
    fn article_id_round_trips_under_wire_key() {
        let json = r#"{
            "_id": "abc",
            "title": "t",
            "content": "c",
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["_id"], "abc");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn update_payload_omits_unset_fields() {
        let update = ArticleUpdate {
            description: Some("only this".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["description"]);
    }

    #[test]
    fn update_payload_cannot_carry_timestamps() {
        let update = ArticleUpdate {
            title: Some("t".to_string()),
            content: Some("c".to_string()),
            description: Some("d".to_string()),
            summary: Some("s".to_string()),
        };

        let value = serde_json::to_value(&update).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.get("created_at").is_none());
        assert!(obj.get("updated_at").is_none());
    }
}
