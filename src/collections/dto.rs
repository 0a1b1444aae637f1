use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Response body of the collection store.
///
/// Stores either answer with the bare payload, with `{ "data": ... }`, or
/// with `{ "success": bool, "data": ..., "message": ... }`. Any object that
/// carries `success` is read as the latter, so a failure never falls
/// through to a defaulted bare record.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Status {
        success: bool,
        #[serde(default)]
        data: Option<serde_json::Value>,
        #[serde(default)]
        message: Option<String>,
    },
    Data {
        data: T,
    },
    Bare(T),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Malformed(String),
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Unwraps the payload. `success: false` becomes the store's message
    /// whether or not `data` is present.
    pub fn into_inner(self) -> Result<T, EnvelopeError> {
        match self {
            Envelope::Status {
                success: false,
                message,
                ..
            } => Err(EnvelopeError::Rejected(
                message.unwrap_or_else(|| "request rejected by store".to_string()),
            )),
            Envelope::Status {
                data: Some(data), ..
            } => serde_json::from_value(data).map_err(|e| EnvelopeError::Malformed(e.to_string())),
            Envelope::Status { data: None, .. } => Err(EnvelopeError::Malformed(
                "successful response carried no data".to_string(),
            )),
            Envelope::Data { data } | Envelope::Bare(data) => Ok(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;

    #[test]
    fn test_bare_list() {
        let envelope: Envelope<Vec<Course>> =
            serde_json::from_str(r#"[{"_id":"a1","id":"py101","title":"Python Basics"}]"#)
                .expect("decode");
        let courses = envelope.into_inner().expect("payload");
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].key.as_deref(), Some("a1"));
        assert_eq!(courses[0].title, "Python Basics");
    }

    #[test]
    fn test_wrapped_record() {
        let envelope: Envelope<Course> =
            serde_json::from_str(r#"{"success":true,"data":{"_id":"a1","id":"py101"}}"#)
                .expect("decode");
        let course = envelope.into_inner().expect("payload");
        assert_eq!(course.id, "py101");
    }

    #[test]
    fn test_wrapped_failure_carries_message() {
        let envelope: Envelope<Vec<Course>> =
            serde_json::from_str(r#"{"success":false,"data":[],"message":"db offline"}"#)
                .expect("decode");
        assert_eq!(
            envelope.into_inner().unwrap_err(),
            EnvelopeError::Rejected("db offline".to_string())
        );
    }

    #[test]
    fn test_failure_without_data_is_not_a_record() {
        let envelope: Envelope<Course> =
            serde_json::from_str(r#"{"success":false,"message":"Course id already exists"}"#)
                .expect("decode");
        assert_eq!(
            envelope.into_inner().unwrap_err(),
            EnvelopeError::Rejected("Course id already exists".to_string())
        );
    }

    #[test]
    fn test_failure_with_foreign_data_shape() {
        let envelope: Envelope<Vec<Course>> =
            serde_json::from_str(r#"{"success":false,"data":{"errors":["boom"]}}"#)
                .expect("decode");
        assert!(matches!(
            envelope.into_inner(),
            Err(EnvelopeError::Rejected(_))
        ));
    }

    #[test]
    fn test_data_without_status() {
        let envelope: Envelope<Course> =
            serde_json::from_str(r#"{"data":{"_id":"a1","id":"py101"}}"#).expect("decode");
        assert_eq!(envelope.into_inner().expect("payload").key.as_deref(), Some("a1"));
    }

    #[test]
    fn test_success_with_mismatched_data_is_malformed() {
        let envelope: Envelope<Vec<Course>> =
            serde_json::from_str(r#"{"success":true,"data":{"id":"py101"}}"#).expect("decode");
        assert!(matches!(
            envelope.into_inner(),
            Err(EnvelopeError::Malformed(_))
        ));
    }
}
