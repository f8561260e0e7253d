//! FILENAME: engine/src/view.rs
//! The five drill-down levels of the dashboard.

use serde::{Deserialize, Serialize};

/// Where the user currently is in the drill-down hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLevel {
    #[default]
    Groups,
    Main,
    Sub,
    Target,
    Detail,
}

impl ViewLevel {
    /// Single-letter code used in share tokens.
    pub fn as_code(&self) -> &'static str {
        match self {
            ViewLevel::Groups => "g",
            ViewLevel::Main => "m",
            ViewLevel::Sub => "s",
            ViewLevel::Target => "t",
            ViewLevel::Detail => "d",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewLevel::Groups => "groups",
            ViewLevel::Main => "main",
            ViewLevel::Sub => "sub",
            ViewLevel::Target => "target",
            ViewLevel::Detail => "detail",
        }
    }

    /// Accepts both the short token code and the long name.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "g" | "groups" => Some(ViewLevel::Groups),
            "m" | "main" => Some(ViewLevel::Main),
            "s" | "sub" => Some(ViewLevel::Sub),
            "t" | "target" => Some(ViewLevel::Target),
            "d" | "detail" => Some(ViewLevel::Detail),
            _ => None,
        }
    }
}
