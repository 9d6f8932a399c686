//! Native vs foreign course categorization by department prefix

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::department_prefix;

/// Departments whose courses the institution itself offers.
pub const DEFAULT_NATIVE_PREFIXES: [&str; 11] = [
    "ACCT", "BEPP", "FNCE", "HCMG", "LGST", "MGMT", "MKTG", "OIDD", "REAL", "STAT", "WHCP",
];

pub const DEFAULT_INSTITUTION_NAME: &str = "Wharton";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Native,
    Foreign,
}

/// The institution whose prefix whitelist decides a course's category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
    pub name: String,
    pub native_prefixes: BTreeSet<String>,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            name: DEFAULT_INSTITUTION_NAME.to_string(),
            native_prefixes: DEFAULT_NATIVE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Institution {
    pub fn category(&self, course_id: &str) -> Category {
        if self.native_prefixes.contains(department_prefix(course_id)) {
            Category::Native
        } else {
            Category::Foreign
        }
    }

    /// Report label: the institution name, or `non-<name>`.
    pub fn label(&self, category: Category) -> String {
        match category {
            Category::Native => self.name.clone(),
            Category::Foreign => format!("non-{}", self.name),
        }
    }
}
