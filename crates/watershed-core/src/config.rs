use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::label::LabelPolicy;

/// Knobs for a watershed run. Defaults reproduce the plain a, b, c, …
/// labelling and keep going past z.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatershedConfig {
    pub label_policy: LabelPolicy,
}

impl WatershedConfig {
    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = WatershedConfig::from_json("{}").unwrap();
        assert_eq!(cfg, WatershedConfig::default());
        assert_eq!(cfg.label_policy, LabelPolicy::Extended);
    }

    #[test]
    fn label_policy_is_kebab_case() {
        let cfg = WatershedConfig::from_json(r#"{"label_policy":"alphabet"}"#).unwrap();
        assert_eq!(cfg.label_policy, LabelPolicy::Alphabet);
        assert!(WatershedConfig::from_json(r#"{"label_policy":"roman"}"#).is_err());
    }
}
