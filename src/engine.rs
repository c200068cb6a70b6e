//! Client for the remote move-search service.
//!
//! One GET per automated turn; every failure mode degrades to "no move
//! available" rather than surfacing an error to the orchestrator.

use crate::types::{CandidateMove, Promotion, Square};
use async_trait::async_trait;
use derive_getters::Getters;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default search depth, matching the original puzzle screens.
pub const DEFAULT_SEARCH_DEPTH: u32 = 10;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Supplies the automated side's reply for a position.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Requests the best move for `fen` at the configured depth.
    ///
    /// Returns `None` on transport failure, a non-success status, or an
    /// unparsable reply; never an error.
    async fn request_best_move(&self, fen: &str, depth: u32) -> Option<CandidateMove>;
}

/// Connection settings for the engine service.
#[derive(Debug, Clone, Getters)]
pub struct EngineConfig {
    /// Service endpoint accepting `fen` and `depth` query parameters.
    base_url: String,
    /// Per-request timeout.
    timeout: Duration,
}

impl EngineConfig {
    /// Creates a config for the given endpoint with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Success payload from the engine service.
#[derive(Debug, Deserialize)]
struct BestMoveReply {
    #[serde(rename = "bestMove")]
    best_move: String,
}

/// HTTP client for a Stockfish-style engine service.
#[derive(Debug, Clone)]
pub struct StockfishClient {
    config: EngineConfig,
    client: reqwest::Client,
}

impl StockfishClient {
    /// Creates a client for the configured endpoint.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EngineClient for StockfishClient {
    #[instrument(skip(self), fields(url = %self.config.base_url))]
    async fn request_best_move(&self, fen: &str, depth: u32) -> Option<CandidateMove> {
        let depth_param = depth.to_string();
        let response = match self
            .client
            .get(&self.config.base_url)
            .query(&[("fen", fen), ("depth", depth_param.as_str())])
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "engine request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "engine returned an error status");
            return None;
        }

        let reply: BestMoveReply = match response.json().await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "engine reply was not the expected JSON shape");
                return None;
            }
        };

        debug!(reply = %reply.best_move, "engine replied");
        let candidate = parse_reply(&reply.best_move);
        if candidate.is_none() {
            warn!(reply = %reply.best_move, "engine reply did not contain a move");
        }
        candidate
    }
}

/// Extracts the move from a reply of the shape `"<marker> <uci-move> …"`.
///
/// The second whitespace-delimited token is the move: two-character
/// source, two-character destination, optional promotion letter.
pub fn parse_reply(text: &str) -> Option<CandidateMove> {
    let token = text.split_whitespace().nth(1)?;
    if !(4..=5).contains(&token.len()) {
        return None;
    }
    let from: Square = token.get(0..2)?.parse().ok()?;
    let to: Square = token.get(2..4)?.parse().ok()?;
    let promotion = match token.get(4..5) {
        Some(letter) => Some(Promotion::from_uci(letter.chars().next()?)?),
        None => None,
    };
    Some(CandidateMove::new(from, to, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_service_payload() {
        let reply: BestMoveReply =
            serde_json::from_str(r#"{"bestMove": "bestmove e1f3 ponder h3h4"}"#).unwrap();
        let mv = parse_reply(&reply.best_move).unwrap();
        assert_eq!(mv.from.to_string(), "e1");
        assert_eq!(mv.to.to_string(), "f3");
    }

    #[test]
    fn parses_a_plain_reply() {
        let mv = parse_reply("bestmove e2e4").unwrap();
        assert_eq!(mv.from.to_string(), "e2");
        assert_eq!(mv.to.to_string(), "e4");
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn parses_a_promotion_and_ignores_trailing_fields() {
        let mv = parse_reply("bestmove a7a8q ponder e2e4").unwrap();
        assert_eq!(mv.from.to_string(), "a7");
        assert_eq!(mv.to.to_string(), "a8");
        assert_eq!(mv.promotion, Some(Promotion::Queen));
    }

    #[test]
    fn rejects_replies_without_a_second_token() {
        assert!(parse_reply("").is_none());
        assert!(parse_reply("bestmove").is_none());
    }

    #[test]
    fn rejects_malformed_move_tokens() {
        assert!(parse_reply("bestmove e2").is_none());
        assert!(parse_reply("bestmove e2e4e5").is_none());
        assert!(parse_reply("bestmove x9y0").is_none());
        assert!(parse_reply("bestmove e7e8x").is_none());
    }
}
