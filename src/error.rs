use thiserror::Error;

/// Ways a [`DialogSession`](crate::DialogSession) can be used incorrectly.
///
/// These point at a bug in the calling code, never at a runtime condition. With
/// debug assertions enabled they panic at the call site. In release builds they
/// are logged and the session degrades to a safe outcome instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DialogError {
    #[error("dialog has already been presented")]
    AlreadyPresented,
    #[error("dialog was awaited without being presented")]
    NotPresented,
}

#[track_caller]
pub(crate) fn misuse(error: DialogError) {
    if cfg!(debug_assertions) {
        panic!("{error}");
    }
    tracing::error!(%error, "dialog misuse, continuing with a safe fallback");
}
