// src/client/payload.rs
//
// The legacy API answered some list endpoints with a bare array and others
// with an envelope. Both shapes are accepted here, at the parse boundary,
// and normalized to one; no call site ever branches on the shape.

use crate::client::ClientError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Envelope {
        success: bool,
        #[serde(default)]
        message: Option<String>,
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Result<Vec<T>, ClientError> {
        match self {
            ListPayload::Bare(items) => Ok(items),
            ListPayload::Envelope {
                success: true,
                data,
                ..
            } => Ok(data),
            ListPayload::Envelope { message, .. } => Err(ClientError::Api(
                message.unwrap_or_else(|| "server reported failure".to_string()),
            )),
        }
    }
}

pub fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, ClientError> {
    serde_json::from_str::<ListPayload<T>>(body)?.into_items()
}

/// Single-item responses are always enveloped.
#[derive(Debug, Deserialize)]
pub struct ItemEnvelope<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn parse_item<T: DeserializeOwned>(body: &str) -> Result<T, ClientError> {
    let envelope: ItemEnvelope<T> = serde_json::from_str(body)?;
    match envelope {
        ItemEnvelope {
            success: true,
            data: Some(data),
            ..
        } => Ok(data),
        ItemEnvelope { message, .. } => Err(ClientError::Api(
            message.unwrap_or_else(|| "server reported failure".to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
        name: String,
    }

    #[test]
    fn bare_array_and_envelope_normalize_identically() {
        let bare = r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#;
        let envelope = r#"{"success":true,"data":[{"id":1,"name":"a"},{"id":2,"name":"b"}]}"#;

        let from_bare: Vec<Item> = parse_list(bare).unwrap();
        let from_envelope: Vec<Item> = parse_list(envelope).unwrap();
        assert_eq!(from_bare, from_envelope);
    }

    #[test]
    fn failure_envelope_surfaces_server_message() {
        let body = r#"{"success":false,"message":"failed to load"}"#;
        match parse_list::<Item>(body) {
            Err(ClientError::Api(msg)) => assert_eq!(msg, "failed to load"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            parse_list::<Item>("not json"),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn item_envelope_round_trip() {
        let body = r#"{"success":true,"data":{"id":7,"name":"x"}}"#;
        let item: Item = parse_item(body).unwrap();
        assert_eq!(item.id, 7);

        let err = parse_item::<Item>(r#"{"success":false,"message":"slug already in use"}"#)
            .unwrap_err();
        assert!(matches!(err, ClientError::Api(m) if m == "slug already in use"));
    }
}
