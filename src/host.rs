//! The collaborators a [`DialogSession`](crate::DialogSession) drives but does not
//! implement: the [`HostSurface`] that renders and retains the dialog, and the
//! [`Artifact`] it renders.
//!
//! The session never styles anything. It hands the host an [`ArtifactRequest`]
//! (labels, emphasis, presentation settings and one activation callback per
//! option) and gets back an artifact to display. From then on, the only signal the
//! session listens to is the artifact's teardown.

use crate::{config::DialogConfig, runtimes};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::{fmt, mem, sync::Arc};

/// Callback invoked once when an artifact is about to be destroyed.
pub type TeardownObserver = Box<dyn FnOnce() + Send + 'static>;

/// The screen or container responsible for rendering modals.
///
/// The host keeps its own `Arc` to every artifact it displays, for as long as the
/// artifact is on screen. Releasing that `Arc` once the artifact is gone is what
/// lets the artifact tear down.
#[async_trait]
pub trait HostSurface: Send + Sync + 'static {
    type Artifact: Artifact;

    /// Builds the visual artifact for a dialog described by `request`.
    fn build_artifact(&self, request: ArtifactRequest) -> Self::Artifact;

    /// Shows `artifact`, returning once it is fully on screen.
    async fn display_modal(&self, artifact: Arc<Self::Artifact>, animated: bool);

    /// Hides `artifact`, returning once it has fully left the screen.
    async fn dismiss_modal(&self, artifact: Arc<Self::Artifact>, animated: bool);

    /// Asks for `artifact` to be dismissed without waiting for it.
    ///
    /// Called from synchronous contexts, notably when a wait for a result is
    /// dropped. The provided implementation runs
    /// [`dismiss_modal`](Self::dismiss_modal) on the current tokio runtime. Hosts
    /// with their own UI event loop should override it to enqueue the dismissal
    /// there instead.
    fn request_dismissal(self: Arc<Self>, artifact: Arc<Self::Artifact>, animated: bool) {
        let spawned = runtimes::detach(async move {
            self.dismiss_modal(artifact, animated).await;
        });
        if !spawned {
            tracing::warn!("no runtime available to dismiss the dialog");
        }
    }
}

/// A presented dialog, as built by a [`HostSurface`].
pub trait Artifact: Send + Sync + 'static {
    /// Registers the observer to run when this artifact is torn down, whichever
    /// actor caused it. The observer must run exactly once.
    ///
    /// Embedding a [`TeardownHook`] and forwarding to
    /// [`TeardownHook::register`] satisfies this contract.
    fn on_teardown(&self, observer: TeardownObserver);
}

/// Everything a host needs to render a dialog.
#[derive(Debug)]
pub struct ArtifactRequest {
    pub config: DialogConfig,
    /// In display order.
    pub actions: Vec<ArtifactAction>,
    /// Index into `actions` of the one to emphasize.
    pub preferred: Option<usize>,
}

impl ArtifactRequest {
    pub fn action(&self, label: &str) -> Option<&ArtifactAction> {
        self.actions.iter().find(|action| action.label == label)
    }
}

/// A button the host should render, with the callback to run when it is chosen.
pub struct ArtifactAction {
    label: String,
    is_default: bool,
    activate: Arc<dyn Fn() + Send + Sync>,
}

impl ArtifactAction {
    pub(crate) fn new(
        label: String,
        is_default: bool,
        activate: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            label,
            is_default,
            activate: Arc::new(activate),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// Reports that the user chose this action. Repeated activations are
    /// harmless: only the first resolution of a session counts.
    pub fn activate(&self) {
        (self.activate)()
    }
}

impl fmt::Debug for ArtifactAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactAction")
            .field("label", &self.label)
            .field("is_default", &self.is_default)
            .finish_non_exhaustive()
    }
}

/// A single-use teardown slot for artifact implementations.
///
/// The registered observer runs on the first call to [`fire`](Self::fire), or when
/// the hook is dropped, whichever comes first. Registering after the hook fired
/// runs the observer immediately.
#[derive(Default)]
pub struct TeardownHook {
    state: Mutex<HookState>,
}

#[derive(Default)]
enum HookState {
    #[default]
    Armed,
    Registered(TeardownObserver),
    Fired,
}

impl TeardownHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `observer`. A hook takes a single observer: registering a second
    /// one panics in debug builds and replaces the first in release.
    pub fn register(&self, observer: TeardownObserver) {
        let mut state = self.state.lock();
        debug_assert!(
            !matches!(*state, HookState::Registered(_)),
            "teardown observer already registered"
        );
        if matches!(*state, HookState::Fired) {
            drop(state);
            observer();
        } else {
            *state = HookState::Registered(observer);
        }
    }

    pub fn fire(&self) {
        let previous = mem::replace(&mut *self.state.lock(), HookState::Fired);
        if let HookState::Registered(observer) = previous {
            observer();
        }
    }

    pub fn has_fired(&self) -> bool {
        matches!(*self.state.lock(), HookState::Fired)
    }
}

impl Drop for TeardownHook {
    fn drop(&mut self) {
        self.fire();
    }
}

impl fmt::Debug for TeardownHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match *self.state.lock() {
            HookState::Armed => "armed",
            HookState::Registered(_) => "registered",
            HookState::Fired => "fired",
        };
        f.debug_tuple("TeardownHook").field(&state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(counter: &Arc<AtomicUsize>) -> TeardownObserver {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn hook_fires_once() {
        let fired = Arc::new(AtomicUsize::new(0));
        let hook = TeardownHook::new();
        hook.register(counting(&fired));

        hook.fire();
        hook.fire();
        drop(hook);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_the_hook_fires_it() {
        let fired = Arc::new(AtomicUsize::new(0));
        let hook = TeardownHook::new();
        hook.register(counting(&fired));
        assert!(!hook.has_fired());

        drop(hook);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn late_registration_runs_immediately() {
        let fired = Arc::new(AtomicUsize::new(0));
        let hook = TeardownHook::new();
        hook.fire();

        hook.register(counting(&fired));
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        drop(hook);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "teardown observer already registered")]
    fn second_registration_is_caught() {
        let fired = Arc::new(AtomicUsize::new(0));
        let hook = TeardownHook::new();
        hook.register(counting(&fired));
        hook.register(counting(&fired));
    }

    #[test]
    fn request_finds_actions_by_label() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let request = ArtifactRequest {
            config: DialogConfig::default(),
            actions: vec![ArtifactAction::new("Retry".into(), true, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })],
            preferred: Some(0),
        };

        let retry = request.action("Retry").unwrap();
        assert!(retry.is_default());
        retry.activate();
        retry.activate();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(request.action("Missing").is_none());
    }
}
