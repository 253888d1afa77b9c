use lt_chain_client::config::{
    ENV_CHAIN_ID, ENV_CHAIN_NAME, ENV_CONTRACT_ADDRESS, ENV_EXPLORER_URL, ENV_RPC_URL,
};
use lt_chain_client::{AppConfig, ConfigError};

/// Configuration baked in at build time; the browser has no environment.
pub(crate) fn app_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| {
        let value = match key {
            ENV_CONTRACT_ADDRESS => option_env!("LINKTREE_CONTRACT_ADDRESS"),
            ENV_RPC_URL => option_env!("LINKTREE_RPC_URL"),
            ENV_CHAIN_ID => option_env!("LINKTREE_CHAIN_ID"),
            ENV_CHAIN_NAME => option_env!("LINKTREE_CHAIN_NAME"),
            ENV_EXPLORER_URL => option_env!("LINKTREE_EXPLORER_URL"),
            _ => None,
        };
        value.map(str::to_owned)
    })
}
