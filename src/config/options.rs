//! Filtering options for a documentation

use serde::{Deserialize, Serialize};
use swagger_transform::{FilterRule, OrphanStrategy, TransformRules};

/// Include/exclude rules and orphan cleanup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// What to keep
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<RuleSet>,

    /// What to drop, regardless of `include`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<RuleSet>,

    /// Remove schemas no kept operation references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_orphan_schemas: Option<bool>,

    /// How references are followed when cleaning orphans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphan_strategy: Option<OrphanStrategy>,
}

/// Rules for one side (include or exclude)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<TagRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<NameRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    #[serde(default)]
    pub names: Vec<String>,
}

impl FilterOptions {
    /// No option given at all
    pub fn is_unset(&self) -> bool {
        self.include.is_none()
            && self.exclude.is_none()
            && self.clean_orphan_schemas.is_none()
            && self.orphan_strategy.is_none()
    }

    /// Convert to the rules understood by the transformer
    pub fn to_rules(&self) -> TransformRules {
        let clean_orphans = match self.clean_orphan_schemas {
            Some(true) => Some(self.orphan_strategy.unwrap_or_default()),
            _ => None,
        };

        TransformRules {
            operation_tags: FilterRule::new(
                self.tags(self.include.as_ref()),
                self.tags(self.exclude.as_ref()),
            ),
            security_schemes: FilterRule::new(
                self.names(self.include.as_ref()),
                self.names(self.exclude.as_ref()),
            ),
            clean_orphans,
        }
    }

    fn tags<'a>(&self, side: Option<&'a RuleSet>) -> Vec<&'a str> {
        side.and_then(|s| s.operations.as_ref())
            .map(|rule| rule.tags.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn names<'a>(&self, side: Option<&'a RuleSet>) -> Vec<&'a str> {
        side.and_then(|s| s.security_schemes.as_ref())
            .map(|rule| rule.names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
