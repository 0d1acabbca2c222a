use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use crate::view::request::{Reply, Request};

use super::store::TaskService;

/// Runs store requests off the UI thread.
///
/// Each request gets its own short-lived thread; replies are queued on a
/// channel and collected with `poll()` once per tick of the event loop.
pub struct RequestWorker {
    service: Arc<dyn TaskService>,
    tx: mpsc::Sender<Reply>,
    rx: mpsc::Receiver<Reply>,
}

impl RequestWorker {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        let (tx, rx) = mpsc::channel();
        RequestWorker { service, tx, rx }
    }

    /// Start a request in the background. Never blocks.
    pub fn submit(&self, request: Request) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let Request { ticket, command } = request;
        let name = command.name();
        tracing::debug!(%ticket, request = name, "submitting");
        thread::spawn(move || {
            let result = command.execute(service.as_ref());
            if let Err(e) = &result {
                tracing::debug!(%ticket, request = name, error = %e, "request failed");
            }
            // Receiver gone means the UI has exited
            let _ = tx.send(Reply { ticket, result });
        });
    }

    /// Non-blocking poll for finished requests.
    /// Returns all queued replies (may be empty).
    pub fn poll(&self) -> Vec<Reply> {
        let mut replies = Vec::new();
        while let Ok(reply) = self.rx.try_recv() {
            replies.push(reply);
        }
        replies
    }
}
