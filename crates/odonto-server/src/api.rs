//! Request and response bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use odonto_core::config::ServerConfig;
use odonto_core::errors::ValidationError;
use odonto_core::models::tooth::validate_fdi_tooth;
use odonto_core::models::EventFilter;
use odonto_core::{Event, EventDraft, EventType, ToothState};

/// `POST /odontogram/logs` body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppendRequest {
    pub events: Vec<EventDraft>,
}

/// `POST /odontogram/logs` response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppendResponse {
    pub success: bool,
    pub count: usize,
    pub events: Vec<Event>,
}

/// `GET /odontogram/logs` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    pub patient_uuid: Option<String>,
    pub tooth_id: Option<String>,
    pub event_type: Option<String>,
    pub visit_id: Option<i64>,
    pub from_sequence: Option<i64>,
    pub to_sequence: Option<i64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub event_id: Option<String>,
}

/// `GET /odontogram` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotQuery {
    pub patient_uuid: Option<String>,
    /// Historical read bound.
    pub sequence_number: Option<i64>,
    pub visit_id: Option<i64>,
}

/// `GET /odontogram` response.
#[derive(Debug, Clone, Serialize)]
pub struct OdontogramResponse<'a> {
    pub patient_uuid: &'a str,
    pub teeth: &'a BTreeMap<String, ToothState>,
    pub last_event_sequence: i64,
    pub max_logical_timestamp: i64,
    pub max_sequence_number: i64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl LogsQuery {
    /// Split into the patient uuid and a validated listing filter.
    pub fn into_filter(self, server: &ServerConfig) -> Result<(String, EventFilter), ValidationError> {
        let patient_uuid = self
            .patient_uuid
            .filter(|uuid| !uuid.is_empty())
            .ok_or(ValidationError::MissingField("patient_uuid"))?;

        let event_type = self
            .event_type
            .as_deref()
            .map(str::parse::<EventType>)
            .transpose()?;
        if let Some(tooth_id) = &self.tooth_id {
            validate_fdi_tooth(tooth_id)?;
        }

        let limit = self.limit.unwrap_or(server.default_page_size);
        if limit == 0 || limit > server.max_page_size {
            return Err(ValidationError::InvalidPagination(format!(
                "limit must be between 1 and {}",
                server.max_page_size
            )));
        }
        if let (Some(from), Some(to)) = (self.from_sequence, self.to_sequence) {
            if from > to {
                return Err(ValidationError::InvalidPagination(format!(
                    "from_sequence {from} is greater than to_sequence {to}"
                )));
            }
        }

        let filter = EventFilter {
            tooth_id: self.tooth_id,
            event_type,
            visit_id: self.visit_id,
            from_sequence: self.from_sequence,
            to_sequence: self.to_sequence,
            event_id: self.event_id.filter(|id| !id.is_empty()),
            limit,
            offset: self.offset.unwrap_or(0),
        };
        Ok((patient_uuid, filter))
    }
}

impl SnapshotQuery {
    pub fn patient_uuid(&self) -> Result<&str, ValidationError> {
        self.patient_uuid
            .as_deref()
            .filter(|uuid| !uuid.is_empty())
            .ok_or(ValidationError::MissingField("patient_uuid"))
    }

    pub fn historical_sequence(&self) -> Result<Option<i64>, ValidationError> {
        match self.sequence_number {
            Some(seq) if seq < 0 => Err(ValidationError::InvalidPagination(format!(
                "sequence_number must be non-negative, got {seq}"
            ))),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(uuid: &str) -> LogsQuery {
        LogsQuery {
            patient_uuid: Some(uuid.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_fill_limit_and_offset() {
        let (uuid, filter) = query("p").into_filter(&ServerConfig::default()).unwrap();
        assert_eq!(uuid, "p");
        assert_eq!(filter.limit, 100);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn patient_uuid_is_required() {
        let err = LogsQuery::default().into_filter(&ServerConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("patient_uuid"));
    }

    #[test]
    fn limit_above_configured_maximum_is_rejected() {
        let server = ServerConfig {
            max_page_size: 10,
            default_page_size: 5,
            ..Default::default()
        };
        let q = LogsQuery {
            limit: Some(11),
            ..query("p")
        };
        assert!(matches!(
            q.into_filter(&server),
            Err(ValidationError::InvalidPagination(_))
        ));
    }

    #[test]
    fn inverted_sequence_range_is_rejected() {
        let q = LogsQuery {
            from_sequence: Some(5),
            to_sequence: Some(2),
            ..query("p")
        };
        assert!(q.into_filter(&ServerConfig::default()).is_err());
    }

    #[test]
    fn bad_tooth_and_event_type_are_rejected() {
        let q = LogsQuery {
            tooth_id: Some("19".into()),
            ..query("p")
        };
        assert_eq!(
            q.into_filter(&ServerConfig::default()).unwrap_err(),
            ValidationError::InvalidToothId("19".into())
        );

        let q = LogsQuery {
            event_type: Some("tooth_paint".into()),
            ..query("p")
        };
        assert_eq!(
            q.into_filter(&ServerConfig::default()).unwrap_err(),
            ValidationError::UnknownEventType("tooth_paint".into())
        );
    }

    #[test]
    fn negative_historical_sequence_is_rejected() {
        let q = SnapshotQuery {
            sequence_number: Some(-1),
            ..Default::default()
        };
        assert!(q.historical_sequence().is_err());
    }
}
