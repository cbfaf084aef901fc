use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Markup description and post-processing rules for one supplier site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierProfile {
    pub name: String,
    pub selectors: SelectorConfig,
    pub derived: Vec<DerivedSkuRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Container holding one product table.
    pub row: String,
    /// Header cells inside a row; they and their children are skipped.
    pub header: String,
    pub column: String,
    /// Number of consecutive columns describing one product.
    pub group_size: usize,
    pub code_column: usize,
    pub quantity_column: usize,
    pub quantity_input: String,
    pub quantity_attr: String,
}

/// Appends `target` with `source`'s quantity divided by `divisor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedSkuRule {
    pub source: String,
    pub target: String,
    #[serde(default = "default_divisor")]
    pub divisor: u64,
}

fn default_divisor() -> u64 {
    1
}

impl DerivedSkuRule {
    pub fn new(source: &str, target: &str, divisor: u64) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            divisor,
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            row: "div.product_form_list.container.is-justtify-space-between.has-no-side-gutter.content-for-list"
                .to_string(),
            header: "div.column.header.one-fifth.medium-down--one-half".to_string(),
            column: "div.column".to_string(),
            group_size: 5,
            code_column: 0,
            quantity_column: 3,
            quantity_input: "input".to_string(),
            quantity_attr: "max".to_string(),
        }
    }
}

impl Default for SupplierProfile {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            selectors: SelectorConfig::default(),
            derived: vec![
                DerivedSkuRule::new("ACGEL5L", "ACGEL5L+", 1),
                DerivedSkuRule::new("ACGEL250", "ACGEL250(2)", 2),
                DerivedSkuRule::new("ACGEL250", "ACGEL250(4)", 4),
                DerivedSkuRule::new("ACGEL250", "ACGEL250(12)", 12),
            ],
        }
    }
}

impl SupplierProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| ScrapeError::ConfigError {
            message: format!("Supplier profile TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ScrapeError::config(format!("env placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for SupplierProfile {
    fn validate(&self) -> Result<()> {
        let s = &self.selectors;
        validate_non_empty_string("selectors.row", &s.row)?;
        validate_non_empty_string("selectors.column", &s.column)?;
        validate_non_empty_string("selectors.quantity_input", &s.quantity_input)?;
        validate_non_empty_string("selectors.quantity_attr", &s.quantity_attr)?;

        if s.group_size == 0 {
            return Err(ScrapeError::InvalidConfigValueError {
                field: "selectors.group_size".to_string(),
                value: "0".to_string(),
                reason: "Group size must be at least 1".to_string(),
            });
        }
        for (field, index) in [
            ("selectors.code_column", s.code_column),
            ("selectors.quantity_column", s.quantity_column),
        ] {
            if index >= s.group_size {
                return Err(ScrapeError::InvalidConfigValueError {
                    field: field.to_string(),
                    value: index.to_string(),
                    reason: format!("Column index must be below group_size ({})", s.group_size),
                });
            }
        }

        for rule in &self.derived {
            validate_non_empty_string("derived.source", &rule.source)?;
            validate_non_empty_string("derived.target", &rule.target)?;
            if rule.divisor == 0 {
                return Err(ScrapeError::InvalidConfigValueError {
                    field: "derived.divisor".to_string(),
                    value: format!("{} -> {}", rule.source, rule.target),
                    reason: "Divisor must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}
