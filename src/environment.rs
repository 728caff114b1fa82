//! The injected capability boundary between the chain core and the live
//! document.
//!
//! The core never discovers elements itself: resolution of a [`TargetRef`]
//! and the click/set-value primitives on whatever it resolves to are supplied
//! by the host through these traits, mirroring how the rest of the tool keeps
//! DOM access out of the replay engine.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

use crate::errors::ChainError;
use crate::target::TargetRef;

/// Primitives a resolved element must support. Implemented by the host
/// against whatever its element handles actually are.
pub trait ElementImpl: Send + Sync {
    /// Fire the element's click behavior.
    fn click(&self) -> Result<(), ChainError>;

    /// Replace the element's text/value content.
    fn set_value(&self, text: &str) -> Result<(), ChainError>;
}

/// Handle to a live document element resolved by an [`Environment`].
pub struct Element {
    inner: Box<dyn ElementImpl>,
}

impl Element {
    pub fn new(inner: Box<dyn ElementImpl>) -> Self {
        Self { inner }
    }

    pub fn click(&self) -> Result<(), ChainError> {
        self.inner.click()
    }

    pub fn set_value(&self, text: &str) -> Result<(), ChainError> {
        self.inner.set_value(text)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").finish_non_exhaustive()
    }
}

/// The environment a chain executes against.
///
/// `resolve_target` returning `Ok(None)` means the descriptor matched no
/// element; an `Err` is a host-level failure (page gone, connection lost) and
/// propagates out of the executor unchanged.
#[async_trait]
pub trait Environment: Send + Sync {
    /// Resolve a target descriptor to at most one live element.
    fn resolve_target(&self, target: &TargetRef) -> Result<Option<Element>, ChainError>;

    /// Suspend the current execution for `duration`, yielding to the host
    /// scheduler. The default suspends on the tokio timer.
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
