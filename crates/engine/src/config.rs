//! Engine configuration read from the environment.

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "HEARTKEEP_DATA_DIR";
pub const CAMPAIGN_VAR: &str = "HEARTKEEP_CAMPAIGN";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_CAMPAIGN: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding one JSON document per campaign.
    pub data_dir: PathBuf,
    pub campaign: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            campaign: DEFAULT_CAMPAIGN.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            data_dir: read(DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            campaign: read(CAMPAIGN_VAR).unwrap_or(defaults.campaign),
        }
    }

    pub fn with_campaign(mut self, campaign: Option<String>) -> Self {
        if let Some(campaign) = campaign.filter(|c| !c.trim().is_empty()) {
            self.campaign = campaign;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.campaign, "default");
    }

    #[test]
    fn reads_variables() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (DATA_DIR_VAR, "/srv/heartkeep"),
            (CAMPAIGN_VAR, "  sunken-crown "),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/heartkeep"));
        assert_eq!(config.campaign, "sunken-crown");
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[(CAMPAIGN_VAR, "   ")]));
        assert_eq!(config.campaign, "default");
    }

    #[test]
    fn campaign_override() {
        let config = EngineConfig::default().with_campaign(Some("west-marches".into()));
        assert_eq!(config.campaign, "west-marches");

        let config = EngineConfig::default().with_campaign(None);
        assert_eq!(config.campaign, "default");
    }
}
