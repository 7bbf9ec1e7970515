use contracts::{Event, EventType, SCHEMA_VERSION_V1};
use serde_json::Value;

use super::QuizRun;

impl QuizRun {
    pub(super) fn push_event(
        &mut self,
        now_ms: u64,
        event_type: EventType,
        stage_id: Option<String>,
        details: Option<Value>,
    ) -> String {
        let sequence = self.next_event_sequence;
        self.next_event_sequence += 1;
        let event_id = format!("evt:{sequence}");
        self.event_log.push(Event {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            run_id: self.config.run_id.clone(),
            at_ms: now_ms,
            event_id: event_id.clone(),
            sequence,
            event_type,
            stage_id,
            details,
        });
        event_id
    }
}
