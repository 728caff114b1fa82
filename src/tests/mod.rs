mod chain_tests;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::environment::{Element, ElementImpl, Environment};
use crate::errors::ChainError;
use crate::target::TargetRef;

// Initialize tracing for tests
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_target(true)
        .try_init();
}

/// One observable effect performed against the mock document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Clicked(String),
    Typed(String, String),
    Slept(u64),
}

struct MockElement {
    label: String,
    effects: Arc<Mutex<Vec<Effect>>>,
}

impl ElementImpl for MockElement {
    fn click(&self) -> Result<(), ChainError> {
        self.effects
            .lock()
            .unwrap()
            .push(Effect::Clicked(self.label.clone()));
        Ok(())
    }

    fn set_value(&self, text: &str) -> Result<(), ChainError> {
        self.effects
            .lock()
            .unwrap()
            .push(Effect::Typed(self.label.clone(), text.to_string()));
        Ok(())
    }
}

/// A scripted document: a fixed set of resolvable labels plus a log of every
/// effect performed, shared across the elements it hands out.
pub struct MockEnvironment {
    elements: HashSet<String>,
    effects: Arc<Mutex<Vec<Effect>>>,
    fail_resolution: bool,
}

impl MockEnvironment {
    /// An environment where the given ids/class lists resolve.
    pub fn with_elements<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: labels.into_iter().map(Into::into).collect(),
            effects: Arc::new(Mutex::new(Vec::new())),
            fail_resolution: false,
        }
    }

    /// An environment whose resolution always fails at the host level, as if
    /// the page had gone away.
    pub fn failing() -> Self {
        Self {
            elements: HashSet::new(),
            effects: Arc::new(Mutex::new(Vec::new())),
            fail_resolution: true,
        }
    }

    pub fn effects(&self) -> Vec<Effect> {
        self.effects.lock().unwrap().clone()
    }

    pub fn clicks(&self) -> usize {
        self.effects()
            .iter()
            .filter(|e| matches!(e, Effect::Clicked(_)))
            .count()
    }
}

#[async_trait]
impl Environment for MockEnvironment {
    fn resolve_target(&self, target: &TargetRef) -> Result<Option<Element>, ChainError> {
        if self.fail_resolution {
            return Err(ChainError::Environment("document is gone".to_string()));
        }
        let label = target
            .id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(target.class_list.as_deref().filter(|s| !s.is_empty()));
        match label {
            Some(label) if self.elements.contains(label) => {
                Ok(Some(Element::new(Box::new(MockElement {
                    label: label.to_string(),
                    effects: self.effects.clone(),
                }))))
            }
            _ => Ok(None),
        }
    }

    async fn sleep(&self, duration: Duration) {
        self.effects
            .lock()
            .unwrap()
            .push(Effect::Slept(duration.as_millis() as u64));
        tokio::time::sleep(duration).await;
    }
}
