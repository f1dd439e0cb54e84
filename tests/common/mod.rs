#![allow(dead_code)]

use dialog_await::{
    async_trait, Artifact, ArtifactRequest, HostSurface, TeardownHook, TeardownObserver,
};
use parking_lot::Mutex;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Prompt {
    pub request: ArtifactRequest,
    hook: TeardownHook,
}

impl Artifact for Prompt {
    fn on_teardown(&self, observer: TeardownObserver) {
        self.hook.register(observer);
    }
}

/// An in-memory host that retains whatever it shows and lets tests act as the
/// user.
#[derive(Default)]
pub struct ScriptedHost {
    shown: Mutex<Vec<Arc<Prompt>>>,
    dismissals: AtomicUsize,
    dismissal_requests: AtomicUsize,
}

impl ScriptedHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn visible(&self) -> usize {
        self.shown.lock().len()
    }

    pub fn top(&self) -> Arc<Prompt> {
        self.shown.lock().last().cloned().expect("no prompt on screen")
    }

    /// Taps the option labelled `label`, then closes the prompt, as a platform
    /// alert does after any button press.
    pub fn tap(&self, label: &str) {
        let prompt = self.top();
        prompt
            .request
            .action(label)
            .unwrap_or_else(|| panic!("no option labelled {label:?}"))
            .activate();
        self.remove(&prompt);
    }

    /// Closes the top prompt without choosing anything.
    pub fn swipe_away(&self) {
        let prompt = self.shown.lock().pop();
        drop(prompt);
    }

    pub fn dismissals(&self) -> usize {
        self.dismissals.load(Ordering::SeqCst)
    }

    pub fn dismissal_requests(&self) -> usize {
        self.dismissal_requests.load(Ordering::SeqCst)
    }

    pub async fn until_visible(&self) {
        while self.visible() == 0 {
            tokio::task::yield_now().await;
        }
    }

    fn remove(&self, prompt: &Arc<Prompt>) {
        let removed = {
            let mut shown = self.shown.lock();
            let index = shown.iter().position(|other| Arc::ptr_eq(other, prompt));
            index.map(|index| shown.remove(index))
        };
        drop(removed);
    }
}

#[async_trait]
impl HostSurface for ScriptedHost {
    type Artifact = Prompt;

    fn build_artifact(&self, request: ArtifactRequest) -> Prompt {
        Prompt {
            request,
            hook: TeardownHook::new(),
        }
    }

    async fn display_modal(&self, artifact: Arc<Prompt>, _animated: bool) {
        tokio::task::yield_now().await;
        self.shown.lock().push(artifact);
    }

    async fn dismiss_modal(&self, artifact: Arc<Prompt>, _animated: bool) {
        tokio::task::yield_now().await;
        self.dismissals.fetch_add(1, Ordering::SeqCst);
        self.remove(&artifact);
    }

    fn request_dismissal(self: Arc<Self>, artifact: Arc<Prompt>, _animated: bool) {
        self.dismissal_requests.fetch_add(1, Ordering::SeqCst);
        self.remove(&artifact);
    }
}

/// Delegates to a [`ScriptedHost`] but keeps the provided dismissal request,
/// which goes through the tokio runtime.
#[derive(Default)]
pub struct SpawningHost(pub ScriptedHost);

#[async_trait]
impl HostSurface for SpawningHost {
    type Artifact = Prompt;

    fn build_artifact(&self, request: ArtifactRequest) -> Prompt {
        self.0.build_artifact(request)
    }

    async fn display_modal(&self, artifact: Arc<Prompt>, animated: bool) {
        self.0.display_modal(artifact, animated).await
    }

    async fn dismiss_modal(&self, artifact: Arc<Prompt>, animated: bool) {
        self.0.dismiss_modal(artifact, animated).await
    }
}
