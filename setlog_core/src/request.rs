//! Sequence tokens for supersedable store loads.
//!
//! Every asynchronous load or refresh is tagged with a token when issued, and
//! its completion is applied only while that token is still current. A newer
//! request for the same scope, a local mutation, or navigating away
//! supersedes whatever is in flight, so a slow reply can never overwrite
//! state that changed after it was requested ("last request wins").

/// Token identifying one issued load/refresh request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Outcome of delivering a completion to its projection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The completion was current and its rows replaced the old contents
    Applied,
    /// A newer request or a local mutation superseded this completion; it
    /// was discarded without touching any state
    Superseded,
}

/// Monotonic request sequence for one load scope
///
/// At most one request is live at a time: issuing a new token makes every
/// earlier token stale.
#[derive(Clone, Debug, Default)]
pub struct RequestSeq {
    issued: u64,
    settled: u64,
}

impl RequestSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding any request still in flight
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// True while the latest issued request has not settled
    pub fn pending(&self) -> bool {
        self.settled < self.issued
    }

    /// True if a completion carrying `token` may still be applied
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued && self.settled < self.issued
    }

    /// Record that the current request completed, whether it applied cleanly
    /// or failed. Stale tokens are ignored.
    pub fn settle(&mut self, token: RequestToken) {
        if self.is_current(token) {
            self.settled = token.0;
        }
    }

    /// Abandon whatever is in flight; its completion will be discarded
    pub fn supersede(&mut self) {
        self.issued += 1;
        self.settled = self.issued;
    }
}
