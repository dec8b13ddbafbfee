//! Element readiness waiting
//!
//! `wait_for_element` races three independent detection paths against one
//! deadline: a mutation subscription, a fallback poll, and the timeout
//! itself. A caller-supplied cancellation token can end the wait early.
//! Whatever settles the wait, every path is dropped before returning.

use crate::infrastructure::config::defaults;
use crate::infrastructure::document::{DocumentId, PageDocument};
use crate::infrastructure::parsing_error::{ParsingError, ParsingResult};
use scraper::Selector;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(defaults::READINESS_TIMEOUT_MS);
pub const DEFAULT_POLL_INTERVAL: Duration =
    Duration::from_millis(defaults::READINESS_POLL_INTERVAL_MS);

/// Bounds for a single wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl WaitOptions {
    pub const fn from_millis(timeout_ms: u64, poll_interval_ms: u64) -> Self {
        Self {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
        }
    }
}

/// Which detection path saw the element first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Immediate,
    Mutation,
    Poll,
}

/// Proof that an anchor element was present on a specific document
///
/// Only `wait_for_element` creates tokens; field extraction requires one.
#[derive(Debug, Clone)]
pub struct ReadinessToken {
    document: DocumentId,
    selector: String,
    detection: Detection,
    waited: Duration,
}

impl ReadinessToken {
    pub const fn document_id(&self) -> DocumentId {
        self.document
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub const fn detection(&self) -> Detection {
        self.detection
    }

    pub const fn waited(&self) -> Duration {
        self.waited
    }

    /// Whether this token was issued for `document`
    pub fn is_for(&self, document: &dyn PageDocument) -> bool {
        self.document == document.id()
    }
}

/// Wait until `selector` matches an element of `document`
///
/// Resolves immediately when the element already exists. Otherwise resolves
/// on the first mutation batch or poll tick that finds it, fails with
/// `Timeout` once `options.timeout` has elapsed, or with `Cancelled` when
/// `cancel` fires.
pub async fn wait_for_element(
    document: &dyn PageDocument,
    selector: &str,
    options: WaitOptions,
    cancel: &CancellationToken,
) -> ParsingResult<ReadinessToken> {
    let compiled =
        Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))?;
    let started = Instant::now();
    let token = |detection| ReadinessToken {
        document: document.id(),
        selector: selector.to_string(),
        detection,
        waited: started.elapsed(),
    };

    // Subscribe before the first check so nothing lands in between unseen.
    let mut mutations = document.subscribe();

    if document.matches(&compiled) {
        debug!("Element {} already present", selector);
        return Ok(token(Detection::Immediate));
    }

    if cancel.is_cancelled() {
        return Err(ParsingError::cancelled(selector));
    }

    let period = options.poll_interval.max(Duration::from_millis(1));
    let mut poll = time::interval_at(started + period, period);
    poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let deadline = time::sleep(options.timeout);
    tokio::pin!(deadline);

    let mut observing = true;

    let outcome = loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => {
                break Err(ParsingError::cancelled(selector));
            }

            changed = mutations.changed(), if observing => {
                if changed.is_err() {
                    // Publisher gone: keep polling until the deadline.
                    observing = false;
                } else if document.matches(&compiled) {
                    break Ok(token(Detection::Mutation));
                }
            }

            _ = poll.tick() => {
                if document.matches(&compiled) {
                    break Ok(token(Detection::Poll));
                }
            }

            () = &mut deadline => {
                break Err(ParsingError::timeout(
                    selector,
                    u64::try_from(options.timeout.as_millis()).unwrap_or(u64::MAX),
                ));
            }
        }
    };

    match &outcome {
        Ok(found) => debug!(
            "Element {} found via {:?} after {:?}",
            selector, found.detection, found.waited
        ),
        Err(ParsingError::Cancelled { .. }) => debug!("Wait for {} cancelled", selector),
        Err(e) => warn!("{}", e),
    }

    outcome
}
