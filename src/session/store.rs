//! Shared store owning every conversation turn's surface.
//!
//! Provides a cloneable handle over the sessions and the batch scheduler.
//! Producers enqueue raw frames; the tick driver drains them through the
//! surface reducer; the rendering layer queries committed state and
//! subscribes to render notices.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::component::ComponentNode;
use crate::data_model::resolve_bound;
use crate::mvi::Reducer;
use crate::protocol::{decode, unwrap_batch};
use crate::scheduler::{BatchConfig, BatchScheduler, QueuedEnvelope, TickOutcome, TickSource};
use crate::surface::{SurfaceReducer, SurfaceState};

use super::{SessionError, SessionId};

/// One conversation turn.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub surface: SurfaceState,
    /// True while the turn's stream is open.
    pub is_loading: bool,
    /// Last transport error, if the turn ended on one.
    pub error: Option<String>,
}

/// Published whenever a commit changes a session's render version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderNotice {
    pub session: SessionId,
    pub render_version: u64,
}

/// Cloneable handle to the session store.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
    notices: Arc<watch::Sender<Option<RenderNotice>>>,
}

struct StoreInner {
    sessions: HashMap<SessionId, Session>,
    scheduler: BatchScheduler,
}

impl SessionStore {
    pub fn new(config: BatchConfig, ticks: Box<dyn TickSource>) -> Self {
        let (notices, _) = watch::channel(None);
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                sessions: HashMap::new(),
                scheduler: BatchScheduler::new(config, ticks),
            })),
            notices: Arc::new(notices),
        }
    }

    /// Start a new turn with a fresh, empty surface.
    ///
    /// # Errors
    /// Returns `TurnInProgress` if another turn is still loading.
    pub fn begin_turn(&self) -> Result<SessionId, SessionError> {
        let mut inner = self.inner.lock();
        if let Some((busy, _)) = inner.sessions.iter().find(|(_, s)| s.is_loading) {
            return Err(SessionError::TurnInProgress { session: *busy });
        }

        let id = SessionId::new();
        inner.sessions.insert(
            id,
            Session {
                is_loading: true,
                ..Session::default()
            },
        );
        tracing::debug!(session = %id, "Turn started");
        Ok(id)
    }

    /// Queue one inbound frame for `session`.
    ///
    /// A `{"a2ui": [...]}` batch is split into its envelopes here so each
    /// is queued in order.
    pub fn enqueue(&self, session: SessionId, frame: Value) {
        let mut inner = self.inner.lock();
        for envelope in unwrap_batch(frame) {
            inner.scheduler.enqueue(session, envelope);
        }
    }

    /// Handle a display-frame tick. Returns the number of envelopes applied.
    pub fn on_tick(&self, now: Instant) -> usize {
        let mut inner = self.inner.lock();
        match inner.scheduler.on_tick(now) {
            TickOutcome::Throttled => 0,
            TickOutcome::Drained(batch) => self.apply_batch(&mut inner, batch),
        }
    }

    /// Apply everything still queued, ignoring frame timing.
    pub fn flush(&self, now: Instant) -> usize {
        let mut inner = self.inner.lock();
        let batch = inner.scheduler.flush(now);
        self.apply_batch(&mut inner, batch)
    }

    /// Close a turn, recording the error it ended with, if any.
    ///
    /// Committed state is kept as-is.
    pub fn finish_turn(&self, session: SessionId, error: Option<String>) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        let entry = inner
            .sessions
            .get_mut(&session)
            .ok_or(SessionError::UnknownSession { session })?;

        entry.is_loading = false;
        if let Some(message) = &error {
            tracing::warn!(session = %session, error = %message, "Turn ended with an error");
        }
        entry.error = error;
        Ok(())
    }

    /// Drop every session, queued envelope, and outstanding tick.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.scheduler.reset();
        let discarded = inner.sessions.len();
        inner.sessions.clear();
        tracing::info!(sessions = discarded, "Store reset");
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RenderNotice>> {
        self.notices.subscribe()
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.inner.lock().sessions.contains_key(&session)
    }

    /// Envelopes waiting for the next drain.
    pub fn queued(&self) -> usize {
        self.inner.lock().scheduler.len()
    }

    pub fn component(&self, session: SessionId, id: &str) -> Option<ComponentNode> {
        self.read(session, |s| s.surface.component(id).cloned())
            .flatten()
    }

    pub fn root_id(&self, session: SessionId) -> Option<String> {
        self.read(session, |s| s.surface.root_id.clone()).flatten()
    }

    pub fn data_at_path(&self, session: SessionId, path: &str) -> Option<Value> {
        self.read(session, |s| s.surface.data_at_path(path).cloned())
            .flatten()
    }

    /// Current render version, `0` for an unknown session.
    pub fn render_version(&self, session: SessionId) -> u64 {
        self.read(session, |s| s.surface.render_version)
            .unwrap_or(0)
    }

    pub fn is_loading(&self, session: SessionId) -> bool {
        self.read(session, |s| s.is_loading).unwrap_or(false)
    }

    /// True while any turn is still streaming.
    pub fn is_busy(&self) -> bool {
        self.inner.lock().sessions.values().any(|s| s.is_loading)
    }

    pub fn error(&self, session: SessionId) -> Option<String> {
        self.read(session, |s| s.error.clone()).flatten()
    }

    /// Owned copy of a session's surface.
    pub fn snapshot(&self, session: SessionId) -> Option<SurfaceState> {
        self.read(session, |s| s.surface.clone())
    }

    /// Resolve a committed component property against the committed data
    /// model. Literal wrappers yield their value, `{path}` bindings the
    /// data at that path.
    pub fn resolve_property(
        &self,
        session: SessionId,
        component_id: &str,
        property: &str,
    ) -> Option<Value> {
        self.read(session, |s| {
            let node = s.surface.component(component_id)?;
            let value = node.properties.get(property)?;
            resolve_bound(value, &s.surface.data_model)
        })
        .flatten()
    }

    fn read<T>(&self, session: SessionId, f: impl FnOnce(&Session) -> T) -> Option<T> {
        let inner = self.inner.lock();
        inner.sessions.get(&session).map(f)
    }

    fn apply_batch(&self, inner: &mut StoreInner, batch: Vec<QueuedEnvelope>) -> usize {
        let applied = batch.len();
        let mut changed: Vec<SessionId> = Vec::new();

        for QueuedEnvelope { session, envelope } in batch {
            let Some(entry) = inner.sessions.get_mut(&session) else {
                tracing::warn!(session = %session, "Dropping envelope for unknown session");
                continue;
            };

            let envelopes = match decode(envelope) {
                Ok(envelopes) => envelopes,
                Err(e) => {
                    tracing::warn!(session = %session, error = %e, "Dropping envelope");
                    continue;
                }
            };

            let before = entry.surface.render_version;
            for envelope in envelopes {
                let surface = std::mem::take(&mut entry.surface);
                entry.surface = SurfaceReducer::reduce(surface, envelope);
            }
            if entry.surface.render_version != before && !changed.contains(&session) {
                changed.push(session);
            }
        }

        for session in changed {
            if let Some(entry) = inner.sessions.get(&session) {
                self.notices.send_replace(Some(RenderNotice {
                    session,
                    render_version: entry.surface.render_version,
                }));
            }
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    struct NoTicks;

    impl TickSource for NoTicks {
        fn schedule(&mut self) {}
        fn cancel(&mut self) {}
    }

    fn store() -> SessionStore {
        SessionStore::new(BatchConfig::default(), Box::new(NoTicks))
    }

    fn text_update(id: &str, text: &str) -> Value {
        json!({"surfaceUpdate": {"surfaceId": "main", "components": [
            {"id": id, "component": {"Text": {"text": text}}}
        ]}})
    }

    #[test]
    fn second_turn_is_rejected_while_first_is_loading() {
        let store = store();
        let first = store.begin_turn().expect("first turn");

        match store.begin_turn() {
            Err(SessionError::TurnInProgress { session }) => assert_eq!(session, first),
            other => panic!("expected TurnInProgress, got {other:?}"),
        }

        store.finish_turn(first, None).expect("finish");
        assert!(store.begin_turn().is_ok());
    }

    #[test]
    fn tick_applies_queued_envelopes() {
        let store = store();
        let session = store.begin_turn().expect("turn");

        store.enqueue(session, text_update("t", "hi"));
        store.enqueue(session, json!({"beginRendering": {"root": "t"}}));
        assert_eq!(store.render_version(session), 0);

        assert_eq!(store.on_tick(Instant::now()), 2);
        assert_eq!(store.render_version(session), 1);
        assert_eq!(store.root_id(session).as_deref(), Some("t"));
        assert_eq!(
            store.component(session, "t").expect("committed").properties["text"],
            json!({"literalString": "hi"})
        );
    }

    #[test]
    fn batch_wrapper_is_split_in_order() {
        let store = store();
        let session = store.begin_turn().expect("turn");

        store.enqueue(
            session,
            json!({"a2ui": [text_update("t", "one"), {"beginRendering": {"root": "t"}}]}),
        );
        assert_eq!(store.queued(), 2);

        store.flush(Instant::now());
        assert_eq!(store.root_id(session).as_deref(), Some("t"));
    }

    #[test]
    fn unrecognized_envelopes_are_dropped() {
        let store = store();
        let session = store.begin_turn().expect("turn");

        store.enqueue(session, json!({"mystery": {}}));
        store.enqueue(session, json!({"beginRendering": {"root": "r"}}));
        store.flush(Instant::now());

        assert_eq!(store.render_version(session), 1);
    }

    #[test]
    fn throttled_tick_applies_nothing() {
        let store = store();
        let session = store.begin_turn().expect("turn");
        let start = Instant::now();

        store.enqueue(session, json!({"beginRendering": {"root": "a"}}));
        store.on_tick(start);
        store.enqueue(session, json!({"beginRendering": {"root": "b"}}));

        assert_eq!(store.on_tick(start + Duration::from_millis(2)), 0);
        assert_eq!(store.root_id(session).as_deref(), Some("a"));
    }

    #[test]
    fn finish_turn_keeps_committed_state_and_records_error() {
        let store = store();
        let session = store.begin_turn().expect("turn");
        store.enqueue(session, json!({"beginRendering": {"root": "r"}}));
        store.flush(Instant::now());

        store
            .finish_turn(session, Some("connection reset".into()))
            .expect("finish");

        assert!(!store.is_loading(session));
        assert_eq!(store.error(session).as_deref(), Some("connection reset"));
        assert_eq!(store.root_id(session).as_deref(), Some("r"));
    }

    #[test]
    fn finish_unknown_session_is_an_error() {
        let store = store();
        assert!(matches!(
            store.finish_turn(SessionId::new(), None),
            Err(SessionError::UnknownSession { .. })
        ));
    }

    #[test]
    fn reset_discards_sessions_and_queue() {
        let store = store();
        let session = store.begin_turn().expect("turn");
        store.enqueue(session, json!({"beginRendering": {"root": "r"}}));

        store.reset();

        assert!(!store.contains(session));
        assert_eq!(store.queued(), 0);
        assert!(!store.is_busy());
        assert_eq!(store.render_version(session), 0);
    }

    #[test]
    fn commits_publish_render_notices() {
        let store = store();
        let mut notices = store.subscribe();
        let session = store.begin_turn().expect("turn");

        store.enqueue(session, text_update("t", "x"));
        store.flush(Instant::now());
        assert!(!notices.has_changed().expect("sender alive"));

        store.enqueue(session, json!({"beginRendering": {"root": "t"}}));
        store.flush(Instant::now());
        assert!(notices.has_changed().expect("sender alive"));
        assert_eq!(
            *notices.borrow_and_update(),
            Some(RenderNotice {
                session,
                render_version: 1
            })
        );
    }

    #[test]
    fn resolve_property_reads_literals_and_bindings() {
        let store = store();
        let session = store.begin_turn().expect("turn");

        store.enqueue(
            session,
            json!({"dataModelUpdate": {"path": "/user", "contents": [{"key": "name", "valueString": "Ada"}]}}),
        );
        store.enqueue(
            session,
            json!({"surfaceUpdate": {"components": [
                {"id": "greeting", "component": {"Text": {"text": {"path": "/user/name"}}}},
                {"id": "title", "component": {"Text": {"text": "Welcome"}}}
            ]}}),
        );
        store.enqueue(session, json!({"beginRendering": {"root": "greeting"}}));
        store.flush(Instant::now());

        assert_eq!(
            store.resolve_property(session, "greeting", "text"),
            Some(json!("Ada"))
        );
        assert_eq!(
            store.resolve_property(session, "title", "text"),
            Some(json!("Welcome"))
        );
        assert_eq!(store.resolve_property(session, "title", "missing"), None);
    }
}
