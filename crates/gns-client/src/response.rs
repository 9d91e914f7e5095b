use gns_common::NotificationResponse;
use tracing::warn;

use crate::error::{ApiErrorBody, ClientError};

/// Map a status code and body onto the client's result.
///
/// A JSON `null` body decodes as an empty map. Any other body that is not a
/// JSON object is tolerated on success (the caller gets an empty map) and
/// reported verbatim on failure.
pub(crate) fn interpret(status: u16, body: &[u8]) -> Result<NotificationResponse, ClientError> {
    let failed = status >= 400;
    let decoded = serde_json::from_slice::<Option<NotificationResponse>>(body)
        .map(Option::unwrap_or_default);

    match decoded {
        Ok(map) if failed => Err(ClientError::Api {
            status,
            body: ApiErrorBody::Decoded(map),
        }),
        Ok(map) => Ok(map),
        Err(_) if failed => Err(ClientError::Api {
            status,
            body: ApiErrorBody::Raw(String::from_utf8_lossy(body).into_owned()),
        }),
        Err(e) => {
            warn!(status, "response body is not a JSON object, returning empty result: {e}");
            Ok(NotificationResponse::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_object_returns_map() {
        let map = interpret(200, br#"{"status":"ok"}"#).unwrap();
        assert_eq!(map.get("status").and_then(|v| v.as_str()), Some("ok"));
    }

    #[test]
    fn success_with_garbage_returns_empty_map() {
        assert!(interpret(200, b"not-json").unwrap().is_empty());
        assert!(interpret(204, b"").unwrap().is_empty());
        assert!(interpret(200, b"[1,2]").unwrap().is_empty());
    }

    #[test]
    fn null_body_decodes_as_empty_map() {
        assert!(interpret(200, b"null").unwrap().is_empty());

        match interpret(400, b"null") {
            Err(ClientError::Api {
                status: 400,
                body: ApiErrorBody::Decoded(map),
            }) => assert!(map.is_empty()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn status_399_is_still_success() {
        assert!(interpret(399, b"{}").is_ok());
    }

    #[test]
    fn failure_with_object_keeps_decoded_body() {
        match interpret(400, br#"{"error":"Validation failed"}"#) {
            Err(ClientError::Api {
                status: 400,
                body: ApiErrorBody::Decoded(map),
            }) => assert_eq!(map["error"], "Validation failed"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn failure_with_garbage_keeps_raw_text() {
        match interpret(502, b"<html>bad gateway</html>") {
            Err(ClientError::Api {
                status: 502,
                body: ApiErrorBody::Raw(text),
            }) => assert_eq!(text, "<html>bad gateway</html>"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
