use serde::{Deserialize, Deserializer, Serialize};

/// Who produced a turn in the caller's chat log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    User,
    Ai,
    /// Anything the caller stored that is neither `user` nor `ai`, including
    /// entries with no `type` at all.
    #[default]
    #[serde(other)]
    Other,
}

/// One entry of the chat history owned and persisted by the caller.
///
/// The core reads a suffix of these per request and never stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(rename = "type", default)]
    kind: TurnKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    timestamp: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Turn {
    pub fn new(kind: TurnKind, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnKind::User, content, String::new())
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(TurnKind::Ai, content, String::new())
    }

    pub fn kind(&self) -> TurnKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_deserializes_caller_shape() {
        let turn: Turn = serde_json::from_str(
            r#"{"type":"ai","content":"<p>hello</p>","timestamp":"10:42"}"#,
        )
        .unwrap();
        assert_eq!(turn.kind(), TurnKind::Ai);
        assert_eq!(turn.content(), "<p>hello</p>");
        assert_eq!(turn.timestamp(), "10:42");
    }

    #[test]
    fn test_unknown_turn_type_is_other() {
        let turn: Turn = serde_json::from_str(r#"{"type":"system","content":"x"}"#).unwrap();
        assert_eq!(turn.kind(), TurnKind::Other);
        assert_eq!(turn.timestamp(), "");
    }

    #[test]
    fn test_missing_type_is_other() {
        let turn: Turn = serde_json::from_str(r#"{"content":"orphan"}"#).unwrap();
        assert_eq!(turn.kind(), TurnKind::Other);
        assert_eq!(turn.content(), "orphan");
    }

    #[test]
    fn test_null_content_and_timestamp_are_empty() {
        let turn: Turn =
            serde_json::from_str(r#"{"type":"ai","content":null,"timestamp":null}"#).unwrap();
        assert_eq!(turn.kind(), TurnKind::Ai);
        assert_eq!(turn.content(), "");
        assert_eq!(turn.timestamp(), "");
    }
}
