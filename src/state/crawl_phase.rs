/// Phase definitions for the windowed pagination crawl
///
/// The crawler moves through these phases as it fetches pages, hits the page
/// ceiling and opens new price windows.
use std::fmt;

/// Represents the current phase of a catalog crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// A page of the current window is being fetched
    FetchingPage,

    /// The current window hit the page ceiling; a new floor is being computed
    LimitHit,

    /// The current window returned an empty page
    WindowDone,

    // ===== Terminal Phases =====
    /// The catalog has been fully walked
    Done,

    /// The cancellation token fired; collected products remain valid
    Cancelled,

    /// A fatal fetch or parse failure aborted the crawl
    Error,
}

impl CrawlPhase {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Error)
    }

    /// Returns true if `next` is a legal successor of this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        use CrawlPhase::*;

        match (*self, next) {
            (_, Error) | (_, Cancelled) => !self.is_terminal(),
            (FetchingPage, FetchingPage | LimitHit | WindowDone) => true,
            (LimitHit, FetchingPage) => true,
            (WindowDone, Done) => true,
            _ => false,
        }
    }

    /// Moves to `next`, logging the transition
    pub fn advance(self, next: CrawlPhase) -> CrawlPhase {
        debug_assert!(
            self.can_transition_to(next),
            "illegal crawl transition {} -> {}",
            self,
            next
        );
        if self != next {
            tracing::trace!("Crawl phase {} -> {}", self, next);
        }
        next
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchingPage => "fetching_page",
            Self::LimitHit => "limit_hit",
            Self::WindowDone => "window_done",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
