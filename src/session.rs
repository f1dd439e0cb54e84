use crate::{
    channel::ResultChannel,
    config::DialogConfig,
    error::{misuse, DialogError},
    host::{Artifact, ArtifactAction, ArtifactRequest, HostSurface},
    option::DialogOption,
};
use std::sync::{Arc, Weak};

/// Where a [`DialogSession`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Options may still be added. Nothing is on screen yet.
    Building,
    /// Handed to a host surface. Options are fixed.
    Presented,
    /// Terminal. The result is fixed forever.
    Resolved,
}

/// One modal prompt, from construction to its single result.
///
/// Every resolution path ends in the session's one [`ResultChannel`]: an option
/// being chosen delivers that option's value, and the artifact tearing down
/// delivers the fallback. Whichever happens first is the result.
pub struct DialogSession<T, H: HostSurface> {
    fallback: T,
    config: DialogConfig,
    options: Vec<DialogOption<T>>,
    channel: ResultChannel<T>,
    stage: Stage<H>,
}

enum Stage<H: HostSurface> {
    Building,
    Presented(Live<H>),
}

struct Live<H: HostSurface> {
    host: Arc<H>,
    /// Held only until the artifact is handed to the host.
    owner: Option<Arc<H::Artifact>>,
    observer: Weak<H::Artifact>,
}

impl<T, H> DialogSession<T, H>
where
    T: Clone + Send + Sync + 'static,
    H: HostSurface,
{
    /// A session resolving to `fallback` unless an option is chosen.
    pub fn new(fallback: T) -> Self {
        Self::with_config(fallback, DialogConfig::default())
    }

    pub fn with_config(fallback: T, config: DialogConfig) -> Self {
        Self {
            fallback,
            config,
            options: Vec::new(),
            channel: ResultChannel::new(),
            stage: Stage::Building,
        }
    }

    /// Appends an option. Panics in debug builds if the session was already
    /// presented; release builds log and ignore the option.
    #[track_caller]
    pub fn add_option(&mut self, label: impl Into<String>, value: T) -> &mut Self {
        self.push_option(DialogOption::new(label, value))
    }

    /// Appends an option marked as the default action. If several options are
    /// marked, the last one added is the one emphasized.
    #[track_caller]
    pub fn add_preferred_option(&mut self, label: impl Into<String>, value: T) -> &mut Self {
        self.push_option(DialogOption::preferred(label, value))
    }

    #[track_caller]
    pub fn push_option(&mut self, option: DialogOption<T>) -> &mut Self {
        if let Err(error) = self.try_add_option(option) {
            misuse(error);
        }
        self
    }

    /// Appends an option, or reports [`DialogError::AlreadyPresented`] without
    /// touching the session once it is presented or resolved.
    pub fn try_add_option(&mut self, option: DialogOption<T>) -> Result<&mut Self, DialogError> {
        if self.state() != SessionState::Building {
            return Err(DialogError::AlreadyPresented);
        }
        self.options.push(option);
        Ok(self)
    }

    /// Shows the dialog on `host` and returns once it is on screen. This does not
    /// wait for a choice; use [`await_result`](Self::await_result) for that.
    ///
    /// Presenting twice, or presenting a session that is already resolved, is
    /// misuse: a panic in debug builds, ignored in release.
    pub async fn present(&mut self, host: Arc<H>) {
        if self.prepare(host) {
            self.display().await;
        }
    }

    /// Presents the dialog and waits for its result.
    ///
    /// Dropping the returned future before it completes asks the host to dismiss
    /// the dialog. The session still resolves then, through the artifact's
    /// teardown, so other waiters are not left hanging.
    ///
    /// The session stays mutably borrowed for the whole wait, so no other caller
    /// can [`await_result`](Self::await_result) on it meanwhile. Code that must
    /// observe the result elsewhere can wait on a [`channel`](Self::channel)
    /// handle, but dropping that wait does not request a dismissal. Use
    /// [`present`](Self::present) followed by `await_result` when several
    /// callers need to wait.
    pub async fn present_and_await(&mut self, host: Arc<H>) -> T {
        if self.prepare(host) {
            let guard = self.dismiss_on_cancel();
            self.display().await;
            if let Some(guard) = guard {
                guard.disarm();
            }
        }
        self.await_result().await
    }

    /// Waits for the session's result, returning right away if it is already
    /// resolved. Any number of calls may wait at once, and all observe the same
    /// value.
    ///
    /// Dropping the returned future before it completes asks the host to dismiss
    /// the dialog, as with [`present_and_await`](Self::present_and_await).
    ///
    /// Awaiting a session that was never presented is misuse: a panic in debug
    /// builds, and an immediate resolution with the fallback in release.
    pub async fn await_result(&self) -> T {
        if let Some(value) = self.channel.peek() {
            return value;
        }
        if matches!(self.stage, Stage::Building) {
            misuse(DialogError::NotPresented);
            self.channel.deliver(self.fallback.clone());
            return self.channel.recv().await;
        }

        let guard = self.dismiss_on_cancel();
        let value = self.channel.recv().await;
        if let Some(guard) = guard {
            guard.disarm();
        }
        value
    }

    /// Closes the live dialog and returns once it has left the screen.
    ///
    /// Dismissing does not resolve the session by itself. The artifact's teardown
    /// does, exactly as when the dialog is closed by anything else.
    pub async fn dismiss(&self) {
        let Stage::Presented(live) = &self.stage else {
            tracing::debug!("dismiss called before present, nothing to close");
            return;
        };
        let Some(artifact) = live.observer.upgrade() else {
            tracing::trace!("dialog already torn down");
            return;
        };
        tracing::debug!("dismissing dialog");
        live.host.dismiss_modal(artifact, self.config.animated).await;
    }

    pub fn state(&self) -> SessionState {
        if self.channel.is_resolved() {
            SessionState::Resolved
        } else if matches!(self.stage, Stage::Building) {
            SessionState::Building
        } else {
            SessionState::Presented
        }
    }

    /// The result, if the session is resolved.
    pub fn result(&self) -> Option<T> {
        self.channel.peek()
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    pub fn options(&self) -> &[DialogOption<T>] {
        &self.options
    }

    /// The option the host is asked to emphasize: the last one marked as default.
    pub fn preferred_option(&self) -> Option<&DialogOption<T>> {
        self.options.iter().rev().find(|option| option.is_default())
    }

    /// Another handle to the channel this session resolves through.
    pub fn channel(&self) -> ResultChannel<T> {
        self.channel.clone()
    }

    /// Builds the artifact and wires its callbacks. Returns whether there is
    /// something to display.
    fn prepare(&mut self, host: Arc<H>) -> bool {
        if self.state() != SessionState::Building {
            misuse(DialogError::AlreadyPresented);
            return false;
        }

        let artifact = Arc::new(host.build_artifact(self.request()));
        let channel = self.channel.clone();
        let fallback = self.fallback.clone();
        artifact.on_teardown(Box::new(move || {
            if channel.deliver(fallback) {
                tracing::debug!("dialog torn down without a choice, resolved with fallback");
            }
        }));

        tracing::debug!(
            options = self.options.len(),
            animated = self.config.animated,
            "presenting dialog"
        );
        self.stage = Stage::Presented(Live {
            host,
            observer: Arc::downgrade(&artifact),
            owner: Some(artifact),
        });
        true
    }

    /// Hands the artifact over to the host, which retains it from here on.
    async fn display(&mut self) {
        let Stage::Presented(live) = &mut self.stage else {
            return;
        };
        let Some(artifact) = live.owner.take() else {
            return;
        };
        let host = Arc::clone(&live.host);
        host.display_modal(artifact, self.config.animated).await;
    }

    fn request(&self) -> ArtifactRequest {
        let actions = self
            .options
            .iter()
            .map(|option| {
                let channel = self.channel.clone();
                let value = option.value().clone();
                ArtifactAction::new(option.label().to_owned(), option.is_default(), move || {
                    if channel.deliver(value.clone()) {
                        tracing::debug!("dialog option chosen");
                    }
                })
            })
            .collect();

        ArtifactRequest {
            config: self.config.clone(),
            actions,
            preferred: self.options.iter().rposition(DialogOption::is_default),
        }
    }

    fn dismiss_on_cancel(&self) -> Option<DismissOnCancel<T, H>> {
        let Stage::Presented(live) = &self.stage else {
            return None;
        };
        Some(DismissOnCancel {
            host: Arc::clone(&live.host),
            artifact: live.observer.clone(),
            channel: self.channel.clone(),
            animated: self.config.animated,
            armed: true,
        })
    }
}

/// Requests dismissal of the dialog if dropped while armed and unresolved.
struct DismissOnCancel<T, H: HostSurface> {
    host: Arc<H>,
    artifact: Weak<H::Artifact>,
    channel: ResultChannel<T>,
    animated: bool,
    armed: bool,
}

impl<T, H: HostSurface> DismissOnCancel<T, H> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T, H: HostSurface> Drop for DismissOnCancel<T, H> {
    fn drop(&mut self) {
        if !self.armed || self.channel.is_resolved() {
            return;
        }
        if let Some(artifact) = self.artifact.upgrade() {
            tracing::debug!("wait for dialog result cancelled, requesting dismissal");
            Arc::clone(&self.host).request_dismissal(artifact, self.animated);
        }
    }
}
