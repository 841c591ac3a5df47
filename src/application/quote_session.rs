//! Tracks overlapping quote requests so only the most recently started one is kept

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::services::QuoteService;
use crate::domain::routing::Quote;
use crate::shared::errors::RouterError;

/// Sequence number handed out when a quote request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QuoteTicket(u64);

impl QuoteTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub ticket: QuoteTicket,
    pub result: Result<Quote, RouterError>,
}

pub struct QuoteSession {
    service: Arc<QuoteService>,
    started: AtomicU64,
    latest: Mutex<Option<SessionResult>>,
}

impl QuoteSession {
    pub fn new(service: Arc<QuoteService>) -> Self {
        Self {
            service,
            started: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    pub fn begin(&self) -> QuoteTicket {
        QuoteTicket(self.started.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QuoteTicket) -> bool {
        self.started.load(Ordering::SeqCst) == ticket.0
    }

    /// Store the result if no newer request has started since `ticket`; returns whether it was kept
    pub async fn complete(&self, ticket: QuoteTicket, result: Result<Quote, RouterError>) -> bool {
        let mut latest = self.latest.lock().await;
        if !self.is_current(ticket) {
            debug!(ticket = ticket.0, "Discarding stale quote result");
            return false;
        }
        *latest = Some(SessionResult { ticket, result });
        true
    }

    /// Run a quote under a fresh ticket. `None` when a newer request superseded it.
    pub async fn request(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: f64,
    ) -> Option<Result<Quote, RouterError>> {
        let ticket = self.begin();
        let result = self.service.get_quote(token_in, token_out, amount_in);
        if self.complete(ticket, result.clone()).await {
            Some(result)
        } else {
            None
        }
    }

    pub async fn latest(&self) -> Option<SessionResult> {
        self.latest.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::MarketSnapshot;
    use crate::infrastructure::demo_market;
    use crate::shared::config::RouterConfig;

    fn session() -> QuoteSession {
        let snapshot = MarketSnapshot::from_config(&demo_market().unwrap()).unwrap();
        QuoteSession::new(Arc::new(QuoteService::new(snapshot, RouterConfig::default())))
    }

    #[tokio::test]
    async fn test_stale_result_discarded() {
        let session = session();
        let older = session.begin();
        let newer = session.begin();
        assert!(newer > older);

        let newer_quote = session.service.get_quote("ETH", "USDC", 2.0);
        assert!(session.complete(newer, newer_quote).await);

        let older_quote = session.service.get_quote("ETH", "USDC", 1.0);
        assert!(!session.complete(older, older_quote).await);

        let latest = session.latest().await.unwrap();
        assert_eq!(latest.ticket, newer);
        assert_eq!(latest.result.unwrap().amount_in, 2.0);
    }

    #[tokio::test]
    async fn test_older_result_kept_until_newer_starts() {
        let session = session();
        let first = session.begin();
        assert!(session.complete(first, Err(RouterError::NoRoute)).await);
        assert!(session.latest().await.unwrap().result.is_err());

        let second = session.begin();
        assert!(!session.is_current(first));
        assert!(session.is_current(second));
    }

    #[tokio::test]
    async fn test_request_publishes_result() {
        let session = session();
        let result = session.request("ETH", "USDC", 1.0).await.unwrap();
        assert!(result.is_ok());
        assert_eq!(session.latest().await.unwrap().ticket.sequence(), 1);

        let err = session.request("ETH", "USDC", 0.0).await.unwrap();
        assert!(matches!(err, Err(RouterError::InvalidAmount(_))));
    }

    #[tokio::test]
    async fn test_concurrent_requests_keep_last_started() {
        let session = Arc::new(session());
        let mut handles = Vec::new();
        for amount in 1..=8 {
            let session = Arc::clone(&session);
            handles.push(tokio::spawn(async move {
                session.request("ETH", "USDC", amount as f64).await
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let latest = session.latest().await.unwrap();
        assert_eq!(latest.ticket.sequence(), 8);
    }
}
