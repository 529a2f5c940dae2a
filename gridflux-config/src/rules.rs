//! Per-application window rules: `{class, workspace}` pairs consulted by
//! the core to auto-place newly discovered windows (`spec.md` §3, §4.F).

use serde::{Deserialize, Serialize};

/// Longest class string a rule will store; longer strings are truncated,
/// mirroring the original's fixed `char wm_class[GF_RULE_CLASS_MAX]`
/// (`src/config/rules.h`).
pub const RULE_CLASS_MAX: usize = 128;
/// Maximum number of rules the table holds (`GF_MAX_RULES`).
pub const RULES_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRule {
    pub class: String,
    pub workspace: i32,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("rules table is full ({RULES_CAPACITY} entries)")]
    Full,
    #[error("class name is empty")]
    EmptyClass,
    #[error("no rule for class {0:?}")]
    NotFound(String),
}

/// A bounded, insertion-ordered table of [`WindowRule`]s. Class matching is
/// case-folded (`spec.md` §3: "case-folded match"), so lookups and
/// dedup-on-add both normalize to lowercase first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RulesTable {
    rules: Vec<WindowRule>,
}

impl RulesTable {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WindowRule> {
        self.rules.iter()
    }

    /// Looks up the workspace a window class should be placed in. Class
    /// comparison is case-insensitive.
    pub fn lookup(&self, class: &str) -> Option<i32> {
        let needle = class.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.class.to_lowercase() == needle)
            .map(|rule| rule.workspace)
    }

    /// Adds or replaces (by case-folded class) a rule. Truncates `class` to
    /// [`RULE_CLASS_MAX`] bytes rather than rejecting it, matching the
    /// original's `strncpy` truncation.
    pub fn add(&mut self, class: &str, workspace: i32) -> Result<(), RuleError> {
        if class.is_empty() {
            return Err(RuleError::EmptyClass);
        }
        let mut truncated = class.to_string();
        truncated.truncate(RULE_CLASS_MAX);

        let needle = truncated.to_lowercase();
        if let Some(existing) = self
            .rules
            .iter_mut()
            .find(|rule| rule.class.to_lowercase() == needle)
        {
            existing.workspace = workspace;
            return Ok(());
        }

        if self.rules.len() >= RULES_CAPACITY {
            return Err(RuleError::Full);
        }
        self.rules.push(WindowRule {
            class: truncated,
            workspace,
        });
        Ok(())
    }

    pub fn remove(&mut self, class: &str) -> Result<(), RuleError> {
        let needle = class.to_lowercase();
        let before = self.rules.len();
        self.rules.retain(|rule| rule.class.to_lowercase() != needle);
        if self.rules.len() == before {
            return Err(RuleError::NotFound(class.to_string()));
        }
        Ok(())
    }
}
