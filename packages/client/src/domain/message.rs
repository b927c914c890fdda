//! Message content variants accepted by `sendMessage`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::{
    error::ValidationError,
    validation::{MAX_POLL_OPTIONS, is_valid_coordinates, is_valid_media_data, is_valid_poll_options, is_valid_url},
};

/// Free-form `options` object forwarded with send/reply/group calls.
pub type Options = Map<String, Value>;

/// Base64 media attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageMedia {
    pub mimetype: String,
    /// Base64-encoded file contents
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesize: Option<u64>,
}

impl MessageMedia {
    pub fn new(mimetype: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mimetype: mimetype.into(),
            data: data.into(),
            filename: None,
            filesize: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Poll {
    /// Question shown above the options
    pub name: String,
    pub options: Vec<String>,
    /// Poll settings such as `allowMultipleAnswers`
    pub settings: Options,
}

/// Content of one outgoing message, tagged by the API's `contentType`.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Media(MessageMedia),
    MediaFromUrl(String),
    Location(Location),
    /// vCard of an existing contact
    Contact { contact_id: String },
    Poll(Poll),
    /// Content types this crate does not model; sent as-is without checks.
    Other { content_type: String, content: Value },
}

impl MessageContent {
    /// The `contentType` tag understood by the API.
    pub fn content_type(&self) -> &str {
        match self {
            Self::Text(_) => "string",
            Self::Media(_) => "MessageMedia",
            Self::MediaFromUrl(_) => "MessageMediaFromURL",
            Self::Location(_) => "Location",
            Self::Contact { .. } => "Contact",
            Self::Poll(_) => "Poll",
            Self::Other { content_type, .. } => content_type,
        }
    }

    /// The `content` field of the request body.
    pub fn to_content(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Media(media) => serde_json::to_value(media).unwrap_or(Value::Null),
            Self::MediaFromUrl(url) => Value::String(url.clone()),
            Self::Location(location) => json!({
                "latitude": location.latitude,
                "longitude": location.longitude,
                "description": location.description,
            }),
            Self::Contact { contact_id } => json!({ "contactId": contact_id }),
            Self::Poll(poll) => json!({
                "pollName": poll.name,
                "pollOptions": poll.options,
                "options": poll.settings,
            }),
            Self::Other { content, .. } => content.clone(),
        }
    }

    /// Pre-flight check for the variant. Text and unmodelled types always pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::Text(_) | Self::Other { .. } => Ok(()),
            Self::Media(_) => {
                if is_valid_media_data(&self.to_content()) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidMediaData)
                }
            }
            Self::MediaFromUrl(url) => {
                if is_valid_url(url) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidUrl(url.clone()))
                }
            }
            Self::Location(location) => {
                if is_valid_coordinates(location.latitude, location.longitude) {
                    Ok(())
                } else {
                    Err(ValidationError::InvalidCoordinates {
                        latitude: location.latitude,
                        longitude: location.longitude,
                    })
                }
            }
            Self::Contact { contact_id } => {
                if contact_id.trim().is_empty() {
                    Err(ValidationError::EmptyContactId)
                } else {
                    Ok(())
                }
            }
            Self::Poll(poll) => {
                if poll.name.trim().is_empty() {
                    return Err(ValidationError::EmptyPollName);
                }
                if !is_valid_poll_options(&poll.options) {
                    return Err(ValidationError::InvalidPollOptions {
                        max: MAX_POLL_OPTIONS,
                    });
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<MessageMedia> for MessageContent {
    fn from(media: MessageMedia) -> Self {
        Self::Media(media)
    }
}

impl From<Location> for MessageContent {
    fn from(location: Location) -> Self {
        Self::Location(location)
    }
}

impl From<Poll> for MessageContent {
    fn from(poll: Poll) -> Self {
        Self::Poll(poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_tags() {
        // テスト項目: 各バリアントが API の contentType タグに対応する
        assert_eq!(MessageContent::from("hi").content_type(), "string");
        assert_eq!(
            MessageContent::MediaFromUrl("https://example.com/a.png".into()).content_type(),
            "MessageMediaFromURL"
        );
        assert_eq!(
            MessageContent::Other {
                content_type: "Buttons".into(),
                content: json!({})
            }
            .content_type(),
            "Buttons"
        );
    }

    #[test]
    fn test_poll_content_shape() {
        // テスト項目: Poll は pollName / pollOptions / options を持つ content になる
        // given (前提条件):
        let mut settings = Options::new();
        settings.insert("allowMultipleAnswers".into(), json!(true));
        let poll = MessageContent::Poll(Poll {
            name: "Lunch?".into(),
            options: vec!["Pizza".into(), "Sushi".into()],
            settings,
        });

        // then (期待する結果):
        assert_eq!(
            poll.to_content(),
            json!({
                "pollName": "Lunch?",
                "pollOptions": ["Pizza", "Sushi"],
                "options": {"allowMultipleAnswers": true}
            })
        );
        assert_eq!(poll.validate(), Ok(()));
    }

    #[test]
    fn test_media_content_omits_missing_filename() {
        let media = MessageContent::from(MessageMedia::new("image/png", "eA=="));

        assert_eq!(media.to_content(), json!({"mimetype": "image/png", "data": "eA=="}));
        assert_eq!(media.validate(), Ok(()));
    }

    #[test]
    fn test_validation_failures() {
        // テスト項目: 種類ごとのバリデーションが失敗を返す
        let bad_media = MessageContent::from(MessageMedia::new("image/png", "not base64!"));
        let bad_url = MessageContent::MediaFromUrl("nope".into());
        let bad_location = MessageContent::from(Location {
            latitude: 91.0,
            longitude: 0.0,
            description: String::new(),
        });
        let empty_poll = MessageContent::from(Poll {
            name: "Q".into(),
            options: vec![],
            settings: Options::new(),
        });
        let unnamed_poll = MessageContent::from(Poll {
            name: " ".into(),
            options: vec!["A".into()],
            settings: Options::new(),
        });

        assert_eq!(bad_media.validate(), Err(ValidationError::InvalidMediaData));
        assert_eq!(bad_url.validate(), Err(ValidationError::InvalidUrl("nope".into())));
        assert!(matches!(
            bad_location.validate(),
            Err(ValidationError::InvalidCoordinates { .. })
        ));
        assert_eq!(
            empty_poll.validate(),
            Err(ValidationError::InvalidPollOptions { max: 12 })
        );
        assert_eq!(unnamed_poll.validate(), Err(ValidationError::EmptyPollName));
        assert_eq!(
            MessageContent::Contact { contact_id: "".into() }.validate(),
            Err(ValidationError::EmptyContactId)
        );
    }

    #[test]
    fn test_unknown_content_type_bypasses_validation() {
        // テスト項目: 未知の contentType は検証せずにそのまま通す
        let other = MessageContent::Other {
            content_type: "Sticker".into(),
            content: json!(null),
        };

        assert_eq!(other.validate(), Ok(()));
        assert_eq!(other.to_content(), Value::Null);
    }
}
