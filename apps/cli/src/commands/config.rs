//! # Config Command

use shoecart_store::StoreConfig;

use crate::error::CliResult;

/// Renders the effective configuration (file, environment and defaults
/// merged) as TOML, with the resolved database path filled in.
pub fn get_config(config: &StoreConfig) -> CliResult<String> {
    let mut effective = config.clone();
    effective.storage.db_path = Some(config.database_path());
    Ok(toml::to_string_pretty(&effective)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_includes_db_path() {
        let mut config = StoreConfig::default();
        config.storage.db_path = Some("/tmp/cart.db".into());

        let rendered = get_config(&config).unwrap();
        assert!(rendered.contains("[api]"));
        assert!(rendered.contains("db_path = \"/tmp/cart.db\""));
        assert!(rendered.contains("locale = \"pt-BR\""));
    }
}
