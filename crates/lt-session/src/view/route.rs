use lt_wallet::is_valid_address;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Profile(String),
    NotFound,
}

impl Route {
    /// Query strings, fragments and a trailing slash are ignored. The profile
    /// address is not checked here; the profile page reports bad ones.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');

        if path.is_empty() {
            return Route::Dashboard;
        }

        match path.strip_prefix("/profile/") {
            Some(address) if !address.is_empty() && !address.contains('/') => {
                Route::Profile(address.to_owned())
            }
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_owned(),
            Route::Profile(address) => format!("/profile/{address}"),
            Route::NotFound => "/404".to_owned(),
        }
    }
}

pub fn share_url(origin: &str, address: &str) -> String {
    format!("{}/profile/{address}", origin.trim_end_matches('/'))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("Please enter a wallet address")]
    Empty,
    #[error("Please enter a valid Ethereum address")]
    InvalidAddress,
}

/// Profile lookup box on the dashboard.
pub fn search(input: &str) -> Result<Route, SearchError> {
    let address = input.trim();
    if address.is_empty() {
        return Err(SearchError::Empty);
    }
    if !is_valid_address(address) {
        return Err(SearchError::InvalidAddress);
    }
    Ok(Route::Profile(address.to_owned()))
}
