//! A modal dialog normally reports back through callbacks: one per button, plus
//! whatever the platform fires when the dialog goes away. This crate folds that
//! lifecycle into a single awaitable value, guaranteeing:
//!
//! - **Exactly one result** -- Whatever races to resolve a dialog (a button tap,
//!   a programmatic dismissal, the host screen tearing it down, a cancelled wait),
//!   only the first resolution counts. Later ones are silently discarded.
//! - **Always a result** -- A dialog that closes without a choice resolves to its
//!   fallback value. Waiting never ends in an error.
//!
//! Rendering is not part of this crate. A [`HostSurface`] turns an
//! [`ArtifactRequest`] into something on screen, and reports when that thing is
//! gone. Everything else lives here.
//!
//! # Presenting and waiting
//!
//! A [`DialogSession`] is created with its fallback value. Options are added
//! while it is being built, each pairing a label with the value the session
//! resolves to when that label is chosen. Then it is presented on a host, and
//! awaited.
//!
//! ```
//! use dialog_await::{
//!     async_trait, Artifact, ArtifactRequest, DialogSession, HostSurface, TeardownHook,
//!     TeardownObserver,
//! };
//! use std::sync::{Arc, Mutex};
//!
//! struct Alert {
//!     request: ArtifactRequest,
//!     teardown: TeardownHook,
//! }
//!
//! impl Artifact for Alert {
//!     fn on_teardown(&self, observer: TeardownObserver) {
//!         self.teardown.register(observer);
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Screen {
//!     modal: Mutex<Option<Arc<Alert>>>,
//! }
//!
//! #[async_trait]
//! impl HostSurface for Screen {
//!     type Artifact = Alert;
//!
//!     fn build_artifact(&self, request: ArtifactRequest) -> Alert {
//!         Alert { request, teardown: TeardownHook::new() }
//!     }
//!
//!     async fn display_modal(&self, alert: Arc<Alert>, _animated: bool) {
//!         *self.modal.lock().unwrap() = Some(alert);
//!     }
//!
//!     async fn dismiss_modal(&self, _alert: Arc<Alert>, _animated: bool) {
//!         self.modal.lock().unwrap().take();
//!     }
//! }
//!
//! # futures::executor::block_on(async {
//! let screen = Arc::new(Screen::default());
//!
//! let mut session = DialogSession::new(false);
//! session
//!     .add_preferred_option("Proceed", true)
//!     .add_option("Cancel", false);
//! session.present(Arc::clone(&screen)).await;
//!
//! // the user taps "Cancel"
//! let alert = screen.modal.lock().unwrap().clone().unwrap();
//! alert.request.action("Cancel").unwrap().activate();
//!
//! assert!(!session.await_result().await);
//! # });
//! ```
//!
//! [`present`](DialogSession::present) returns as soon as the dialog is on screen.
//! [`await_result`](DialogSession::await_result) is the call that waits for a
//! choice. The two are separate so that one piece of code can show a dialog while
//! another waits on it. When both happen in one place,
//! [`present_and_await`](DialogSession::present_and_await) does both.
//!
//! # One delivery path
//!
//! Each session owns one [`ResultChannel`]. Choosing an option delivers that
//! option's value into it. Every other way the dialog can close, including
//! [`dismiss`](DialogSession::dismiss), ends with the artifact being torn down,
//! and teardown delivers the fallback. `dismiss` never delivers anything itself,
//! so a dismissal and the teardown it causes cannot produce two conflicting
//! results.
//!
//! Once the host has the artifact on screen, the session holds only a weak
//! reference to it. The host's own reference is what keeps it alive, so when the
//! host lets go, the teardown fires.
//!
//! # Cancellation
//!
//! Dropping a pending `await_result` (or `present_and_await`) future cancels the
//! *wait*, not the dialog. It is translated into a dismissal request via
//! [`HostSurface::request_dismissal`]. The session then resolves through teardown
//! as usual, and any other caller still waiting on it receives that result.
//!
//! # Misuse
//!
//! Adding options after presenting, presenting twice, or awaiting a session that
//! was never presented are bugs in the calling code. They panic in debug builds.
//! In release builds they are logged and absorbed: late options are ignored, a
//! second presentation does nothing, and an unpresented session resolves to its
//! fallback. [`DialogSession::try_add_option`] reports misuse as a
//! [`DialogError`] instead.

mod channel;
mod config;
mod error;
mod host;
mod option;
pub mod runtimes;
mod session;

pub use async_trait::async_trait;
pub use channel::ResultChannel;
pub use config::{DialogConfig, DialogStyle};
pub use error::DialogError;
pub use host::{
    Artifact, ArtifactAction, ArtifactRequest, HostSurface, TeardownHook, TeardownObserver,
};
pub use option::DialogOption;
pub use session::{DialogSession, SessionState};
