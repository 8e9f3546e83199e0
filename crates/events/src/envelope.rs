use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freightdesk_core::EventId;

use crate::event::Event;

/// Recorded form of an event: stream metadata plus the payload.
///
/// `sequence_number` is the aggregate version after the event was applied, so
/// it increases by one per event within a stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: EventId,
    stream_id: String,
    stream_type: String,
    sequence_number: u64,
    event_type: String,
    schema_version: u32,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E: Event> EventEnvelope<E> {
    /// Wrap `payload` for `stream_id`, copying type/version/time from the event.
    pub fn record(
        stream_type: impl Into<String>,
        stream_id: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            stream_id: stream_id.into(),
            stream_type: stream_type.into(),
            sequence_number,
            event_type: payload.event_type().to_string(),
            schema_version: payload.version(),
            occurred_at: payload.occurred_at(),
            payload,
        }
    }
}

impl<E> EventEnvelope<E> {
    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub fn stream_type(&self) -> &str {
        &self.stream_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }

    /// Storage key unique within a collection of envelopes.
    pub fn record_key(&self) -> String {
        format!("{}:{:010}", self.stream_id, self.sequence_number)
    }
}
