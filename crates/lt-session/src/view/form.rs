use lt_api_types::Link;
use lt_validation::{MAX_LINKS, MAX_TITLE_LENGTH, MAX_URL_LENGTH, sanitize, validate};

/// Editable link rows on the dashboard. Always has at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkForm {
    rows: Vec<Link>,
    errors: Vec<String>,
}

impl Default for LinkForm {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LinkForm {
    /// Start from the owner's current links, or one empty row.
    pub fn new(links: Vec<Link>) -> Self {
        let rows = if links.is_empty() {
            vec![Link::default()]
        } else {
            links
        };
        Self {
            rows,
            errors: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Link] {
        &self.rows
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn can_add_row(&self) -> bool {
        self.rows.len() < MAX_LINKS
    }

    pub fn add_row(&mut self) -> bool {
        if !self.can_add_row() {
            return false;
        }
        self.rows.push(Link::default());
        true
    }

    pub fn remove_row(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        if self.rows.is_empty() {
            self.rows.push(Link::default());
        }
        self.errors.clear();
    }

    pub fn set_title(&mut self, index: usize, title: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.title = title.to_owned();
            self.errors.clear();
        }
    }

    pub fn set_url(&mut self, index: usize, url: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.url = url.to_owned();
            self.errors.clear();
        }
    }

    /// Replace every row, e.g. after the saved links were reloaded.
    pub fn reset(&mut self, links: Vec<Link>) {
        *self = Self::new(links);
    }

    /// Sanitized links ready to send, or the errors now shown by the form.
    pub fn submit(&mut self) -> Result<Vec<Link>, Vec<String>> {
        let links = sanitize(&self.rows);
        let errors = validate(&links);
        if errors.is_empty() {
            self.errors.clear();
            return Ok(links);
        }
        self.errors = errors.clone();
        Err(errors)
    }

    pub fn set_errors(&mut self, errors: Vec<String>) {
        self.errors = errors;
    }

    pub fn counter(&self) -> String {
        format!(
            "{}/{MAX_LINKS} links • Title max {MAX_TITLE_LENGTH} chars • URL max {MAX_URL_LENGTH} chars",
            self.rows.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_empty_row() {
        let form = LinkForm::default();
        assert_eq!(form.rows(), &[Link::default()]);
        assert!(form.errors().is_empty());
        assert!(form.counter().starts_with("1/50 links"));
    }

    #[test]
    fn starts_from_existing_links() {
        let links = vec![Link::new("Site", "https://example.com")];
        assert_eq!(LinkForm::new(links.clone()).rows(), links.as_slice());
    }

    #[test]
    fn add_row_stops_at_the_limit() {
        let mut form = LinkForm::default();
        while form.add_row() {}
        assert_eq!(form.rows().len(), MAX_LINKS);
        assert!(!form.can_add_row());
        assert_eq!(
            form.counter(),
            "50/50 links • Title max 100 chars • URL max 500 chars"
        );
    }

    #[test]
    fn removing_the_last_row_leaves_an_empty_one() {
        let mut form = LinkForm::new(vec![Link::new("Site", "https://example.com")]);
        form.remove_row(0);
        assert_eq!(form.rows(), &[Link::default()]);

        form.remove_row(5);
        assert_eq!(form.rows().len(), 1);
    }

    #[test]
    fn submit_sanitizes_valid_rows() {
        let mut form = LinkForm::default();
        form.set_title(0, " Site ");
        form.set_url(0, " https://example.com ");
        form.add_row();

        assert_eq!(
            form.submit(),
            Ok(vec![Link::new("Site", "https://example.com")])
        );
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submit_keeps_errors_until_the_next_edit() {
        let mut form = LinkForm::default();
        form.set_title(0, "Site");
        form.set_url(0, "example.com/page");

        let errors = form.submit().unwrap_err();
        assert_eq!(
            errors,
            vec!["Link 1: Invalid URL format (must start with http:// or https://)"]
        );
        assert_eq!(form.errors(), errors.as_slice());

        form.set_url(0, "https://example.com/page");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn submitting_only_blank_rows_asks_for_a_link() {
        let mut form = LinkForm::default();
        assert_eq!(
            form.submit(),
            Err(vec!["Please add at least one link".to_owned()])
        );
    }
}
