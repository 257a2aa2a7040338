//! Typed decoding of `event_data` payloads.
//!
//! The same decoder backs write-time validation and build-time parsing, so a
//! payload accepted by the writer is always accepted by the builder.

use serde_json::{Map, Value};

use super::event::EventType;
use super::tooth::{validate_code, Surface};
use crate::errors::PayloadError;

/// Decoded payload of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPayload {
    CodeInsert { codes: Vec<String> },
    CodeRemove { codes: Vec<String> },
    GeneralNote { notes: String },
    SurfaceCodeSet {
        surface: Surface,
        code: String,
        notes: Option<String>,
    },
    SurfaceCodeRemove { surface: Surface },
    SurfaceNote { surface: Surface, notes: String },
    Reset,
}

impl EventPayload {
    /// Decode `data` according to `event_type`.
    pub fn parse(event_type: EventType, data: &Value) -> Result<Self, PayloadError> {
        if event_type == EventType::ToothReset {
            return match data {
                Value::Null | Value::Object(_) => Ok(EventPayload::Reset),
                _ => Err(PayloadError::NotAnObject),
            };
        }

        let obj = data.as_object().ok_or(PayloadError::NotAnObject)?;
        let payload = match event_type {
            EventType::ToothCodeInsert => EventPayload::CodeInsert {
                codes: codes(obj)?,
            },
            EventType::ToothCodeRemove => EventPayload::CodeRemove {
                codes: codes(obj)?,
            },
            EventType::ToothGeneralNoteUpdate => EventPayload::GeneralNote {
                notes: required_str(obj, "general_notes")?.to_string(),
            },
            EventType::ToothSurfaceCodeSet => {
                let code = required_str(obj, "code")?;
                validate_code(code)?;
                EventPayload::SurfaceCodeSet {
                    surface: surface(obj)?,
                    code: code.to_string(),
                    notes: optional_str(obj, "notes")?.map(str::to_string),
                }
            }
            EventType::ToothSurfaceCodeRemove => EventPayload::SurfaceCodeRemove {
                surface: surface(obj)?,
            },
            EventType::ToothSurfaceNoteUpdate => EventPayload::SurfaceNote {
                surface: surface(obj)?,
                notes: required_str(obj, "notes")?.to_string(),
            },
            EventType::ToothReset => EventPayload::Reset,
        };
        Ok(payload)
    }
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, PayloadError> {
    optional_str(obj, field)?.ok_or(PayloadError::MissingField(field))
}

fn optional_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, PayloadError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(PayloadError::WrongType {
            field,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

fn surface(obj: &Map<String, Value>) -> Result<Surface, PayloadError> {
    required_str(obj, "surface")?.parse()
}

/// `whole_tooth_code` is either one code or a non-empty list of codes.
fn codes(obj: &Map<String, Value>) -> Result<Vec<String>, PayloadError> {
    const FIELD: &str = "whole_tooth_code";
    let codes: Vec<String> = match obj.get(FIELD) {
        None | Some(Value::Null) => return Err(PayloadError::MissingField(FIELD)),
        Some(Value::String(code)) => vec![code.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(code) => Ok(code.clone()),
                other => Err(PayloadError::WrongType {
                    field: FIELD,
                    reason: format!("expected a string element, got {other}"),
                }),
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(PayloadError::WrongType {
                field: FIELD,
                reason: format!("expected a string or list of strings, got {other}"),
            })
        }
    };
    if codes.is_empty() {
        return Err(PayloadError::WrongType {
            field: FIELD,
            reason: "list must not be empty".to_string(),
        });
    }
    for code in &codes {
        validate_code(code)?;
    }
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn code_insert_accepts_single_code_and_list() {
        let one = EventPayload::parse(EventType::ToothCodeInsert, &json!({"whole_tooth_code": "amf"}));
        assert_eq!(one.unwrap(), EventPayload::CodeInsert { codes: vec!["amf".into()] });

        let many = EventPayload::parse(
            EventType::ToothCodeInsert,
            &json!({"whole_tooth_code": ["amf", "crn"]}),
        );
        assert_eq!(
            many.unwrap(),
            EventPayload::CodeInsert { codes: vec!["amf".into(), "crn".into()] }
        );
    }

    #[test]
    fn empty_general_note_is_an_explicit_clear() {
        let p = EventPayload::parse(EventType::ToothGeneralNoteUpdate, &json!({"general_notes": ""}));
        assert_eq!(p.unwrap(), EventPayload::GeneralNote { notes: String::new() });
    }

    #[test]
    fn surface_code_set_requires_surface_and_code() {
        let missing_code =
            EventPayload::parse(EventType::ToothSurfaceCodeSet, &json!({"surface": "O"}));
        assert_eq!(missing_code.unwrap_err(), PayloadError::MissingField("code"));

        let bad_surface = EventPayload::parse(
            EventType::ToothSurfaceCodeSet,
            &json!({"surface": "X", "code": "car"}),
        );
        assert_eq!(bad_surface.unwrap_err(), PayloadError::InvalidSurface("X".into()));
    }

    #[test]
    fn surface_code_set_notes_are_optional() {
        let p = EventPayload::parse(
            EventType::ToothSurfaceCodeSet,
            &json!({"surface": "O", "code": "car"}),
        )
        .unwrap();
        assert_eq!(
            p,
            EventPayload::SurfaceCodeSet { surface: Surface::Occlusal, code: "car".into(), notes: None }
        );
    }

    #[test]
    fn reset_accepts_null_and_object() {
        assert_eq!(EventPayload::parse(EventType::ToothReset, &Value::Null).unwrap(), EventPayload::Reset);
        assert_eq!(EventPayload::parse(EventType::ToothReset, &json!({})).unwrap(), EventPayload::Reset);
        assert!(EventPayload::parse(EventType::ToothReset, &json!("x")).is_err());
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let err = EventPayload::parse(EventType::ToothSurfaceNoteUpdate, &json!([1, 2])).unwrap_err();
        assert_eq!(err, PayloadError::NotAnObject);
    }

    #[test]
    fn wrong_typed_field_is_rejected() {
        let err = EventPayload::parse(EventType::ToothGeneralNoteUpdate, &json!({"general_notes": 5}))
            .unwrap_err();
        assert!(matches!(err, PayloadError::WrongType { field: "general_notes", .. }));
    }
}
