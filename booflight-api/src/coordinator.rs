use std::collections::HashMap;
use tokio::sync::Mutex;

/// Tracks the latest search generation per session. Starting a new search
/// invalidates the handle of any prior in-flight one, so its eventual
/// response is discarded instead of racing the newer result.
#[derive(Default)]
pub struct SearchCoordinator {
    generations: Mutex<HashMap<String, u64>>,
}

pub struct SearchHandle<'a> {
    coordinator: &'a SearchCoordinator,
    session: String,
    generation: u64,
}

impl SearchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn begin(&self, session: &str) -> SearchHandle<'_> {
        let mut generations = self.generations.lock().await;
        let generation = generations
            .entry(session.to_string())
            .and_modify(|g| *g += 1)
            .or_insert(1);
        SearchHandle {
            coordinator: self,
            session: session.to_string(),
            generation: *generation,
        }
    }
}

impl SearchHandle<'_> {
    /// False once a newer search has started for the same session.
    pub async fn is_current(&self) -> bool {
        self.coordinator
            .generations
            .lock()
            .await
            .get(&self.session)
            .copied()
            == Some(self.generation)
    }
}
