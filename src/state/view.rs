/// View state for the single-window client
///
/// Three fields drive everything on screen: the URL of the currently
/// displayed photo, an optional error banner, and a loading flag. All three
/// operations (fetch, upload, recolor) move through the same
/// idle -> loading -> (success | error) -> idle cycle.
///
/// Overlapping operations are resolved by request token: every dispatch
/// mints a fresh token, and only the most recently minted token may complete
/// the state. A response arriving for an older token is discarded, so the
/// later *dispatch* wins regardless of which response lands last.

/// Opaque handle tying an in-flight operation to its dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct ViewState {
    image: Option<String>,
    error: Option<String>,
    loading: bool,
    issued: u64,
    current: Option<u64>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the photo currently on display, if any.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Token of the operation currently in flight, if any.
    pub fn pending_token(&self) -> Option<RequestToken> {
        self.current.map(RequestToken)
    }

    /// Record the start of a network operation.
    ///
    /// Supersedes any operation already in flight: the older token becomes
    /// stale and its eventual result will be discarded.
    pub fn begin(&mut self) -> RequestToken {
        self.issued += 1;
        self.current = Some(self.issued);
        self.loading = true;
        RequestToken(self.issued)
    }

    /// Record the end of a network operation.
    ///
    /// Returns `false` (and changes nothing) if the token is stale.
    /// `Ok(Some(url))` replaces the image and clears any error;
    /// `Ok(None)` means the backend has no image yet and leaves both
    /// untouched; `Err` stores the message and keeps the prior image.
    pub fn finish(
        &mut self,
        token: RequestToken,
        outcome: Result<Option<String>, String>,
    ) -> bool {
        if self.current != Some(token.0) {
            return false;
        }

        self.current = None;
        self.loading = false;

        match outcome {
            Ok(Some(url)) => {
                self.image = Some(url);
                self.error = None;
            }
            Ok(None) => {}
            Err(message) => {
                self.error = Some(message);
            }
        }

        true
    }

    /// Surface a validation error without touching the request cycle.
    /// Used for failures caught before any network call is made.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = ViewState::new();
        assert_eq!(state.image(), None);
        assert_eq!(state.error(), None);
        assert!(!state.loading());
    }

    #[test]
    fn test_loading_spans_request_lifetime() {
        let mut state = ViewState::new();
        assert!(!state.loading());

        let token = state.begin();
        assert!(state.loading());

        state.finish(token, Ok(Some("https://cdn/x.png".into())));
        assert!(!state.loading());
    }

    #[test]
    fn test_success_replaces_image_and_clears_error() {
        let mut state = ViewState::new();
        state.reject("Failed to upload image");

        let token = state.begin();
        assert!(state.finish(token, Ok(Some("https://cdn/x.png".into()))));

        assert_eq!(state.image(), Some("https://cdn/x.png"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_no_content_leaves_state_untouched() {
        // Backend answered 204: no image stored yet, not an error.
        let mut state = ViewState::new();
        let token = state.begin();
        assert!(state.finish(token, Ok(None)));

        assert_eq!(state.image(), None);
        assert_eq!(state.error(), None);
        assert!(!state.loading());
    }

    #[test]
    fn test_failure_sets_error_and_keeps_image() {
        let mut state = ViewState::new();
        let token = state.begin();
        state.finish(token, Ok(Some("blob://old".into())));

        let token = state.begin();
        assert!(state.finish(token, Err("Failed to fetch image".into())));

        assert_eq!(state.error(), Some("Failed to fetch image"));
        assert_eq!(state.image(), Some("blob://old"));
    }

    #[test]
    fn test_failure_with_no_prior_image() {
        let mut state = ViewState::new();
        let token = state.begin();
        assert!(state.finish(token, Err("Failed to fetch image".into())));

        assert_eq!(state.image(), None);
        assert_eq!(state.error(), Some("Failed to fetch image"));
    }

    #[test]
    fn test_validation_error_skips_request_cycle() {
        let mut state = ViewState::new();
        state.reject("No file selected for upload.");

        assert_eq!(state.error(), Some("No file selected for upload."));
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut state = ViewState::new();

        let first = state.begin();
        let second = state.begin();

        // The second (current) operation resolves first.
        assert!(state.finish(second, Ok(Some("blob://new".into()))));

        // The first operation's response arrives late and must not win.
        assert!(!state.finish(first, Ok(Some("blob://stale".into()))));

        assert_eq!(state.image(), Some("blob://new"));
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_error_cannot_clobber_current_request() {
        let mut state = ViewState::new();

        let first = state.begin();
        let second = state.begin();

        // A late failure from the superseded operation changes nothing,
        // including the loading flag of the still-pending one.
        assert!(!state.finish(first, Err("Failed to upload image".into())));
        assert!(state.loading());
        assert_eq!(state.error(), None);

        assert!(state.finish(second, Ok(Some("blob://new".into()))));
        assert_eq!(state.image(), Some("blob://new"));
    }
}
