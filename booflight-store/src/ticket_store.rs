use booflight_core::ticket::Ticket;
use booflight_core::{CoreError, CoreResult};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Session-scoped store for the single in-progress ticket. The stored value
/// is the serialized JSON string; serialization happens only at this edge.
/// `save` overwrites, `clear` removes, sessions never share state.
#[derive(Default)]
pub struct TicketStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl TicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, session: &str, ticket: &Ticket) -> CoreResult<()> {
        let blob = serde_json::to_string(ticket)
            .map_err(|e| CoreError::InternalError(format!("Failed to serialize ticket: {}", e)))?;
        self.blobs.lock().await.insert(session.to_string(), blob);
        Ok(())
    }

    pub async fn load(&self, session: &str) -> CoreResult<Option<Ticket>> {
        let blobs = self.blobs.lock().await;
        match blobs.get(session) {
            None => Ok(None),
            Some(blob) => serde_json::from_str(blob)
                .map(Some)
                .map_err(|e| CoreError::InternalError(format!("Stored ticket is corrupt: {}", e))),
        }
    }

    pub async fn clear(&self, session: &str) {
        self.blobs.lock().await.remove(session);
    }
}
