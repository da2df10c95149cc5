use serde::Serialize;

use crate::error::MediGuardError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, MediGuardError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::to_pretty;
    use crate::entities::chat::{ChatReply, GroundingSource};

    #[test]
    fn to_pretty_serializes_reply_in_camel_case() {
        let reply = ChatReply {
            text: "SUMMARY: **Aspirin**".into(),
            grounding_sources: vec![GroundingSource {
                title: "Aspirin".into(),
                url: "https://en.wikipedia.org/wiki/Aspirin".into(),
            }],
        };
        let json = to_pretty(&reply).expect("json");
        assert!(json.contains('\n'));
        assert!(json.contains("\"groundingSources\""));
        assert!(json.contains("\"title\": \"Aspirin\""));
    }
}
