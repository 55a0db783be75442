//! Add-form draft state
//!
//! What the user has typed into the "new site" form, and whether the
//! form is open. Nothing here is persisted.

/// Pending input for a new site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteDraft {
    /// Name field, untrimmed
    pub name: String,
    /// URL field, untrimmed and unnormalized
    pub url: String,
    /// Whether the add form is open
    pub adding: bool,
}

impl SiteDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Open the form if closed, close it if open
    ///
    /// Typed values survive closing the form.
    pub fn toggle_add_mode(&mut self) {
        self.adding = !self.adding;
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// Clear both fields and close the form
    pub fn reset(&mut self) {
        self.name.clear();
        self.url.clear();
        self.adding = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut draft = SiteDraft::new();
        assert!(!draft.is_adding());
        draft.toggle_add_mode();
        assert!(draft.is_adding());
        draft.toggle_add_mode();
        assert!(!draft.is_adding());
    }

    #[test]
    fn test_toggle_keeps_input() {
        let mut draft = SiteDraft::new();
        draft.toggle_add_mode();
        draft.set_name("Docs");
        draft.set_url("docs.rs");
        draft.toggle_add_mode();
        assert_eq!(draft.name, "Docs");
        assert_eq!(draft.url, "docs.rs");
    }

    #[test]
    fn test_reset() {
        let mut draft = SiteDraft {
            name: "Docs".to_string(),
            url: "docs.rs".to_string(),
            adding: true,
        };
        draft.reset();
        assert_eq!(draft, SiteDraft::default());
    }
}
