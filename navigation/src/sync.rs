//! FILENAME: navigation/src/sync.rs
//! URL <-> state synchronisation.
//!
//! Writing runs on two speeds: every state change rewrites the
//! current history entry immediately, and a new entry is pushed only
//! after the state has been quiet for a moment, so rapid drill-downs
//! collapse into one back-button step. Reading (initial hydration and
//! back/forward navigation) suspends writing while it applies, which
//! is what stops a restored state from echoing straight back into the
//! history it came from.

use engine::KpiRecord;
use link_format::{resolve_query, QueryParams, QueryResolution};

/// Quiet period before a history entry is pushed.
pub const PUSH_DEBOUNCE_MS: u64 = 450;

/// What the sync loop is currently doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncPhase {
    /// Normal operation: state changes flow into the URL.
    Idle,
    /// Applying the document URL on startup.
    #[default]
    Hydrating,
    /// Applying a URL from browser back/forward.
    ApplyingPopstate,
}

/// History operation the driver should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Rewrite the current history entry.
    Replace(String),
    /// Push a new history entry.
    Push(String),
}

/// The URL sync state machine. The driver owns the clock and the
/// actual history API; this tracks phase, the parked index token and
/// the debounce window.
#[derive(Debug, Clone, Default)]
pub struct UrlSync {
    phase: SyncPhase,
    pending_token: Option<String>,
    current_url: Option<String>,
    last_pushed: Option<String>,
    push_due: Option<(u64, String)>,
}

impl UrlSync {
    /// Starts in the hydrating phase; call [`UrlSync::finish_restore`]
    /// once the initial URL has been applied.
    pub fn new() -> Self {
        UrlSync::default()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Resolves the document URL on startup. An index token that
    /// cannot be decoded yet (dataset still loading) is parked and
    /// surfaces later through [`UrlSync::take_pending_token`].
    pub fn hydrate(
        &mut self,
        params: &QueryParams,
        data: Option<&[KpiRecord]>,
    ) -> QueryResolution {
        self.phase = SyncPhase::Hydrating;
        self.resolve(params, data)
    }

    /// Resolves a URL delivered by browser back/forward. Any armed
    /// push is cancelled: the history stack just moved under us.
    pub fn begin_popstate(
        &mut self,
        params: &QueryParams,
        data: Option<&[KpiRecord]>,
    ) -> QueryResolution {
        self.phase = SyncPhase::ApplyingPopstate;
        self.push_due = None;
        self.resolve(params, data)
    }

    fn resolve(&mut self, params: &QueryParams, data: Option<&[KpiRecord]>) -> QueryResolution {
        let resolution = resolve_query(params, data);
        if let QueryResolution::PendingIndexToken(token) = &resolution {
            log::debug!("parking index token until the dataset loads");
            self.pending_token = Some(token.clone());
        }
        resolution
    }

    /// Ends a hydration or popstate phase; state changes flow into
    /// the URL again.
    pub fn finish_restore(&mut self) {
        self.phase = SyncPhase::Idle;
    }

    /// The token parked during hydration, handed out once. Call when
    /// the dataset finishes loading.
    pub fn take_pending_token(&mut self) -> Option<String> {
        self.pending_token.take()
    }

    /// The state changed. Returns the immediate replace to perform,
    /// and arms the debounced push. No-op while a restore is applying
    /// or when the URL is already current.
    pub fn note_state_changed(&mut self, now_ms: u64, url: String) -> Option<SyncAction> {
        if self.phase != SyncPhase::Idle {
            return None;
        }
        if self.current_url.as_deref() == Some(url.as_str()) {
            return None;
        }
        self.current_url = Some(url.clone());
        self.push_due = Some((now_ms + PUSH_DEBOUNCE_MS, url.clone()));
        Some(SyncAction::Replace(url))
    }

    /// Drives the debounce timer. Returns the push once the quiet
    /// period has elapsed and the latest URL was not already pushed.
    pub fn poll(&mut self, now_ms: u64) -> Option<SyncAction> {
        let (due, url) = self.push_due.clone()?;
        if now_ms < due {
            return None;
        }
        self.push_due = None;
        if self.last_pushed.as_deref() == Some(url.as_str()) {
            return None;
        }
        self.last_pushed = Some(url.clone());
        Some(SyncAction::Push(url))
    }

    /// Records a URL written outside the state-change path, such as
    /// the normalisation replace after a restore. Does not arm a push.
    pub fn note_replaced(&mut self, url: String) {
        self.current_url = Some(url);
    }
}
