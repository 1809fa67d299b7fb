//! Execution-context classification
//!
//! Answers one question: is this execution context a packaged native-mobile
//! application, or a desktop/web context? No single signal is reliable
//! across hybrid-shell versions, so detection layers independent signals in
//! decreasing order of trust:
//!
//! 1. explicit "is native platform" flag on the native bridge
//! 2. platform tag query on the native bridge
//! 3. identification-string heuristic ([`UserAgentHeuristic`])
//!
//! Each layer either gives a definite answer or abstains; the first definite
//! answer wins and the chain defaults to [`PlatformClass::DesktopOrWeb`].
//! Detection is synchronous, side-effect free, and never errors: a failing
//! signal degrades the result, it must not block the download path.
//!
//! Classification is derived freshly on every query and never cached; a
//! webview can re-evaluate its host bridge between calls.

pub mod heuristic;
pub mod probe;

pub use heuristic::UserAgentHeuristic;
pub use probe::{
    BridgeError, BridgeResult, EnvironmentProbe, NativeBridge, StaticBridge, StaticEnvironment,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Platform tags a bridge reports for packaged mobile shells
const MOBILE_PLATFORM_TAGS: &[&str] = &["android", "ios"];

/// Tag reported for desktop and browser contexts
const DESKTOP_TAG: &str = "desktop";

/// Tag reported when a native shell cannot name its platform
const WEB_TAG: &str = "web";

/// Execution-context classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformClass {
    /// Packaged mobile application shell with a native bridge
    #[serde(rename = "native-mobile")]
    NativeMobile,
    /// Any other context, including mobile browser tabs
    #[serde(rename = "desktop-or-web")]
    DesktopOrWeb,
}

impl fmt::Display for PlatformClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlatformClass::NativeMobile => "native-mobile",
            PlatformClass::DesktopOrWeb => "desktop-or-web",
        };
        write!(f, "{s}")
    }
}

/// One detection layer: a definite answer or abstention
type Detector<P> = fn(&PlatformClassifier<P>) -> Option<PlatformClass>;

/// Layered platform classifier over an injectable environment probe
///
/// # Examples
///
/// ```
/// use album_download_dispatcher::platform::{
///     PlatformClass, PlatformClassifier, StaticBridge, StaticEnvironment,
/// };
///
/// let probe = StaticEnvironment::new().with_bridge(StaticBridge::new().with_platform("ios"));
/// let classifier = PlatformClassifier::new(probe);
/// assert_eq!(classifier.classify(), PlatformClass::NativeMobile);
/// ```
pub struct PlatformClassifier<P> {
    probe: P,
    heuristic: UserAgentHeuristic,
}

impl<P: EnvironmentProbe> PlatformClassifier<P> {
    /// Detection layers in decreasing order of trust
    fn detectors() -> [Detector<P>; 3] {
        [
            Self::detect_bridge_flag,
            Self::detect_bridge_platform,
            Self::detect_identification,
        ]
    }

    /// Create a classifier over `probe` with the default heuristic
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            heuristic: UserAgentHeuristic::shared().clone(),
        }
    }

    /// Override the identification-string heuristic
    pub fn with_heuristic(mut self, heuristic: UserAgentHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Classify the current execution context
    ///
    /// Runs the detector chain in priority order and takes the first
    /// definite answer, defaulting to [`PlatformClass::DesktopOrWeb`].
    /// Never errors and never panics.
    pub fn classify(&self) -> PlatformClass {
        Self::detectors()
            .into_iter()
            .find_map(|detect| detect(self))
            .unwrap_or(PlatformClass::DesktopOrWeb)
    }

    /// Whether the current context is a desktop/web context
    pub fn is_desktop_context(&self) -> bool {
        self.classify() != PlatformClass::NativeMobile
    }

    /// Raw platform tag for the current context
    ///
    /// Returns the bridge's tag when classified native-mobile, degrading to
    /// `"web"` when the bridge cannot name its platform, and `"desktop"`
    /// for every other context. Detection errors are swallowed, never
    /// propagated.
    pub fn platform_identifier(&self) -> String {
        if self.classify() != PlatformClass::NativeMobile {
            return DESKTOP_TAG.to_string();
        }

        self.probe
            .bridge()
            .and_then(|bridge| bridge.platform().ok().flatten())
            .unwrap_or_else(|| WEB_TAG.to_string())
    }

    /// Layer 1: trust an explicit native flag immediately
    fn detect_bridge_flag(&self) -> Option<PlatformClass> {
        match self.probe.bridge()?.is_native_platform() {
            Some(true) => Some(PlatformClass::NativeMobile),
            _ => None,
        }
    }

    /// Layer 2: ask the bridge for its platform tag
    fn detect_bridge_platform(&self) -> Option<PlatformClass> {
        let bridge = self.probe.bridge()?;
        match bridge.platform() {
            Ok(Some(tag)) if is_mobile_tag(&tag) => Some(PlatformClass::NativeMobile),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "bridge platform query failed, falling through");
                None
            }
        }
    }

    /// Layer 3: match the identification string against the heuristic
    fn detect_identification(&self) -> Option<PlatformClass> {
        let identification = self.probe.identification()?;
        self.heuristic
            .matches_mobile(&identification)
            .then_some(PlatformClass::NativeMobile)
    }
}

fn is_mobile_tag(tag: &str) -> bool {
    MOBILE_PLATFORM_TAGS
        .iter()
        .any(|known| tag.eq_ignore_ascii_case(known))
}
