//! Off-thread execution of AI calls and staleness tracking.
//!
//! Each call purpose has its own generation counter. Issuing a new request
//! (or invalidating a purpose) bumps the counter, so a response carrying an
//! older ticket is stale and must not be applied.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use super::types::{DailyReflection, RecitationService, SearchResult, TrackRef};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Reflection,
    Search,
    ReciterTracks,
}

impl RequestKind {
    fn slot(self) -> usize {
        match self {
            Self::Reflection => 0,
            Self::Search => 1,
            Self::ReciterTracks => 2,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

/// Per-purpose generation counters.
#[derive(Debug, Default)]
pub struct Generations {
    current: [u64; 3],
}

impl Generations {
    /// Issue a ticket for a new request, superseding earlier ones of the same kind.
    pub fn issue(&mut self, kind: RequestKind) -> Ticket {
        let slot = &mut self.current[kind.slot()];
        *slot += 1;
        Ticket {
            kind,
            generation: *slot,
        }
    }

    /// Make every in-flight request of `kind` stale.
    pub fn invalidate(&mut self, kind: RequestKind) {
        self.current[kind.slot()] += 1;
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.current[ticket.kind.slot()] == ticket.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiQuery {
    Reflection,
    Search(String),
    ReciterTracks(String),
}

#[derive(Debug, Clone)]
pub struct AiRequest {
    pub ticket: Ticket,
    pub query: AiQuery,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiPayload {
    Reflection(Option<DailyReflection>),
    Search(Vec<SearchResult>),
    ReciterTracks(Vec<TrackRef>),
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub ticket: Ticket,
    pub payload: AiPayload,
}

/// Run one request synchronously against `service`.
pub fn execute(service: &dyn RecitationService, query: &AiQuery) -> AiPayload {
    match query {
        AiQuery::Reflection => AiPayload::Reflection(service.daily_reflection()),
        AiQuery::Search(q) => AiPayload::Search(service.search_recitations(q)),
        AiQuery::ReciterTracks(name) => AiPayload::ReciterTracks(service.reciter_mushaf(name)),
    }
}

/// Fire-and-forget executor: each request runs on its own thread and its
/// response is delivered on the channel returned by `Dispatcher::new`.
pub struct Dispatcher {
    service: Arc<dyn RecitationService>,
    tx: Sender<AiResponse>,
}

impl Dispatcher {
    pub fn new(service: Arc<dyn RecitationService>) -> (Self, Receiver<AiResponse>) {
        let (tx, rx) = mpsc::channel::<AiResponse>();
        (Self { service, tx }, rx)
    }

    pub fn dispatch(&self, request: AiRequest) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        debug!(kind = ?request.ticket.kind, generation = request.ticket.generation, "dispatching AI request");
        thread::spawn(move || {
            let payload = execute(service.as_ref(), &request.query);
            // The receiver is gone only during shutdown.
            let _ = tx.send(AiResponse {
                ticket: request.ticket,
                payload,
            });
        });
    }
}
