use lt_api_types::Profile;

pub const APP_NAME: &str = "OnchainLinktree";

/// State of the public profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Loading,
    InvalidAddress,
    NotFound,
    Loaded(Profile),
    Failed(String),
}

impl ProfileView {
    pub fn page_title(&self) -> String {
        match self {
            ProfileView::Loaded(profile) => {
                format!("{} - {APP_NAME}", short_address(&profile.address))
            }
            _ => format!("Profile - {APP_NAME}"),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProfileView::InvalidAddress => Some("Invalid wallet address"),
            ProfileView::NotFound => Some("No links found for this address"),
            ProfileView::Failed(message) => Some(message),
            ProfileView::Loading | ProfileView::Loaded(_) => None,
        }
    }
}

fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 14 {
        return address.to_owned();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{head}...{tail}")
}
