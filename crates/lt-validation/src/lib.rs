//! Client-side rules a link batch must satisfy before it is sent to the
//! contract. Every violation is collected so the form can show them together.

use lt_api_types::Link;
use std::collections::HashSet;
use url::Url;

pub const MAX_LINKS: usize = 50;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_URL_LENGTH: usize = 10;
pub const MAX_URL_LENGTH: usize = 500;

/// Absolute `http`/`https` URL check.
pub fn is_valid_url(candidate: &str) -> bool {
    match Url::parse(candidate.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Errors for a single link. `position` is 1-based and used as the message prefix.
pub fn validate_link(link: &Link, position: usize) -> Vec<String> {
    let mut errors = Vec::new();

    if link.title.trim().is_empty() {
        errors.push(format!("Link {position}: Title is required"));
    } else if link.title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(format!(
            "Link {position}: Title too long (max {MAX_TITLE_LENGTH} characters)"
        ));
    }

    if link.url.trim().is_empty() {
        errors.push(format!("Link {position}: URL is required"));
        return errors;
    }

    let url_length = link.url.chars().count();
    if url_length < MIN_URL_LENGTH {
        errors.push(format!(
            "Link {position}: URL too short (min {MIN_URL_LENGTH} characters)"
        ));
    }
    if url_length > MAX_URL_LENGTH {
        errors.push(format!(
            "Link {position}: URL too long (max {MAX_URL_LENGTH} characters)"
        ));
    }
    if !is_valid_url(&link.url) {
        errors.push(format!(
            "Link {position}: Invalid URL format (must start with http:// or https://)"
        ));
    }

    errors
}

/// Validate a whole batch. An empty result means the batch may be submitted.
pub fn validate(links: &[Link]) -> Vec<String> {
    let mut errors = Vec::new();

    if links.is_empty() {
        errors.push("Please add at least one link".to_owned());
        return errors;
    }

    if links.len() > MAX_LINKS {
        errors.push(format!("Maximum {MAX_LINKS} links allowed"));
    }

    for (index, link) in links.iter().enumerate() {
        errors.extend(validate_link(link, index + 1));
    }

    let mut seen = HashSet::new();
    let has_duplicate = links
        .iter()
        .map(|link| link.url.trim().to_lowercase())
        .filter(|url| !url.is_empty())
        .any(|url| !seen.insert(url));
    if has_duplicate {
        errors.push("Duplicate URLs are not allowed".to_owned());
    }

    errors
}

pub fn sanitize_link(link: &Link) -> Link {
    Link {
        title: link.title.trim().to_owned(),
        url: link.url.trim().to_owned(),
    }
}

/// Trim every link and drop the ones left without a title or URL.
/// Links failing other rules are kept so `validate` can report them.
pub fn sanitize(links: &[Link]) -> Vec<Link> {
    links
        .iter()
        .map(sanitize_link)
        .filter(|link| !link.title.is_empty() && !link.url.is_empty())
        .collect()
}
