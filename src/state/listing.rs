/// Listing state definitions for tracking pagination progress
///
/// A listing alternates between waiting for items to render and draining the
/// rendered page; it ends for exactly one of the reasons in [`ListingEnd`].
use std::fmt;

/// Phase of a listing's pagination state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingState {
    /// Waiting for listing items to render
    Loading,

    /// Extracting items from the rendered page and probing for a next page
    Draining,
}

impl ListingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Draining => "draining",
        }
    }
}

impl fmt::Display for ListingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a listing stopped being paginated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingEnd {
    // ===== Normal Completion =====
    /// The listing has no pagination control
    SinglePage,

    /// The "next" control is disabled or has nothing to activate
    LastPage,

    // ===== Early Termination =====
    /// No items rendered on the first page
    NoItems,

    /// Items never rendered again after advancing to the next page
    ReloadTimeout,

    /// The "next" control kept failing to activate
    ClickRetriesExhausted,
}

impl ListingEnd {
    /// Returns true if the listing was fully drained
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::SinglePage | Self::LastPage)
    }

    /// Returns true if the listing was cut short and may be partial
    pub fn is_early(&self) -> bool {
        !self.is_complete()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SinglePage => "single_page",
            Self::LastPage => "last_page",
            Self::NoItems => "no_items",
            Self::ReloadTimeout => "reload_timeout",
            Self::ClickRetriesExhausted => "click_retries_exhausted",
        }
    }
}

impl fmt::Display for ListingEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_and_early_are_exclusive() {
        for end in [
            ListingEnd::SinglePage,
            ListingEnd::LastPage,
            ListingEnd::NoItems,
            ListingEnd::ReloadTimeout,
            ListingEnd::ClickRetriesExhausted,
        ] {
            assert_ne!(end.is_complete(), end.is_early(), "{}", end);
        }
        assert!(ListingEnd::LastPage.is_complete());
        assert!(ListingEnd::ReloadTimeout.is_early());
    }

    #[test]
    fn test_display() {
        assert_eq!(ListingState::Draining.to_string(), "draining");
        assert_eq!(
            ListingEnd::ClickRetriesExhausted.to_string(),
            "click_retries_exhausted"
        );
    }
}
