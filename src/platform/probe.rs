//! Host environment capability probes
//!
//! Classification reads two inbound capabilities: an optional native-bridge
//! object injected by packaged application shells, and the environment's
//! identification string (user-agent equivalent). Both sit behind traits so
//! embedders snapshot their live host globals while tests substitute
//! deterministic fixtures.

/// Errors raised by a native bridge while answering a capability query
///
/// Bridge errors never leave the classifier: a failing query degrades the
/// classification instead of surfacing to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The bridge failed or rejected the platform query
    #[error("platform query failed: {0}")]
    QueryFailed(String),

    /// The bridge is no longer attached to its host context
    #[error("bridge detached: {0}")]
    Detached(String),
}

/// Result type for bridge queries
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Native-bridge capability exposed by packaged application shells
///
/// Shell versions expose inconsistent subsets of these signals; every
/// method is therefore allowed to answer "unknown".
pub trait NativeBridge: Send + Sync {
    /// Direct "is native platform" flag, when the shell exposes one
    fn is_native_platform(&self) -> Option<bool>;

    /// Platform tag reported by the shell (e.g. `android`, `ios`)
    ///
    /// `Ok(None)` means the shell lacks the query entirely.
    fn platform(&self) -> BridgeResult<Option<String>>;
}

/// Read-only view of the host execution environment
pub trait EnvironmentProbe: Send + Sync {
    /// The native bridge, when the host exposes one
    fn bridge(&self) -> Option<&dyn NativeBridge>;

    /// Environment identification string (user-agent equivalent)
    fn identification(&self) -> Option<String>;
}

/// Bridge with fixed answers
///
/// Used by embedders that snapshot a live bridge once per query, and by
/// tests as a deterministic fixture.
#[derive(Debug, Clone, Default)]
pub struct StaticBridge {
    native_flag: Option<bool>,
    platform: Option<String>,
}

impl StaticBridge {
    /// Create a bridge that answers "unknown" to every query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the direct "is native platform" flag
    pub fn with_native_flag(mut self, flag: bool) -> Self {
        self.native_flag = Some(flag);
        self
    }

    /// Set the reported platform tag
    pub fn with_platform<S: Into<String>>(mut self, tag: S) -> Self {
        self.platform = Some(tag.into());
        self
    }
}

impl NativeBridge for StaticBridge {
    fn is_native_platform(&self) -> Option<bool> {
        self.native_flag
    }

    fn platform(&self) -> BridgeResult<Option<String>> {
        Ok(self.platform.clone())
    }
}

/// Environment probe with fixed answers
///
/// The default probe has no bridge and no identification string, which
/// classifies as desktop/web.
#[derive(Default)]
pub struct StaticEnvironment {
    bridge: Option<Box<dyn NativeBridge>>,
    identification: Option<String>,
}

impl StaticEnvironment {
    /// Create an empty environment snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a native bridge
    pub fn with_bridge<B: NativeBridge + 'static>(mut self, bridge: B) -> Self {
        self.bridge = Some(Box::new(bridge));
        self
    }

    /// Set the identification string
    pub fn with_identification<S: Into<String>>(mut self, identification: S) -> Self {
        self.identification = Some(identification.into());
        self
    }
}

impl EnvironmentProbe for StaticEnvironment {
    fn bridge(&self) -> Option<&dyn NativeBridge> {
        self.bridge.as_deref()
    }

    fn identification(&self) -> Option<String> {
        self.identification.clone()
    }
}
