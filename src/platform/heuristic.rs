//! Identification-string heuristics
//!
//! Last-resort detection layer for embedded contexts that lack a native
//! bridge. The rule is two signature lists matched case-insensitively
//! against the identification string: a mobile-OS signature must be
//! present, and no desktop-engine marker may be present (a mobile browser
//! tab self-identifying as a desktop-compatible engine must not classify as
//! native-mobile).
//!
//! The exact marker sets vary across shell versions and are not documented
//! by any host, so both lists are plain configurable data with best-effort
//! defaults rather than hard-coded rules.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Default mobile-OS signatures
const MOBILE_SIGNATURES: &[&str] = &["android", "iphone", "ipad", "ipod"];

/// Default desktop-engine markers that veto a mobile signature match
const DESKTOP_ENGINE_MARKERS: &[&str] = &["windows", "x11", "electron"];

/// Shared default heuristic (built once)
static DEFAULT_HEURISTIC: Lazy<UserAgentHeuristic> = Lazy::new(UserAgentHeuristic::default);

/// Configurable signature lists for identification-string matching
///
/// Signatures are stored lowercase; matching is substring containment on
/// the lowercased identification string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentHeuristic {
    mobile_signatures: Vec<String>,
    desktop_engine_markers: Vec<String>,
}

impl UserAgentHeuristic {
    /// Create a heuristic from custom signature lists
    pub fn new(mobile_signatures: Vec<String>, desktop_engine_markers: Vec<String>) -> Self {
        Self {
            mobile_signatures: lowercase_all(mobile_signatures),
            desktop_engine_markers: lowercase_all(desktop_engine_markers),
        }
    }

    /// The shared default heuristic
    pub fn shared() -> &'static Self {
        &DEFAULT_HEURISTIC
    }

    /// Whether `identification` reads as a native-mobile context
    ///
    /// True when a mobile signature matches and no desktop-engine marker
    /// does.
    pub fn matches_mobile(&self, identification: &str) -> bool {
        let identification = identification.to_lowercase();

        let mobile = self
            .mobile_signatures
            .iter()
            .any(|signature| identification.contains(signature.as_str()));
        if !mobile {
            return false;
        }

        !self
            .desktop_engine_markers
            .iter()
            .any(|marker| identification.contains(marker.as_str()))
    }

    /// Mobile-OS signatures matched against the identification string
    pub fn mobile_signatures(&self) -> &[String] {
        &self.mobile_signatures
    }

    /// Desktop-engine markers that veto a mobile match
    pub fn desktop_engine_markers(&self) -> &[String] {
        &self.desktop_engine_markers
    }
}

impl Default for UserAgentHeuristic {
    fn default() -> Self {
        Self::new(
            MOBILE_SIGNATURES.iter().map(|s| s.to_string()).collect(),
            DESKTOP_ENGINE_MARKERS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

fn lowercase_all(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}
