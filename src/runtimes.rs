use futures::Future;

#[cfg(feature = "runtime-tokio")]
pub mod tokio {
    use futures::Future;

    /// Spawns `future` on the tokio runtime of the calling context and lets it run
    /// to completion unobserved. Returns `false` if there is no runtime to spawn on.
    pub fn spawn_detached<F>(future: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        match ::tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                drop(handle.spawn(future));
                true
            }
            Err(_) => false,
        }
    }
}

pub(crate) fn detach<F>(future: F) -> bool
where
    F: Future<Output = ()> + Send + 'static,
{
    #[cfg(feature = "runtime-tokio")]
    {
        self::tokio::spawn_detached(future)
    }
    #[cfg(not(feature = "runtime-tokio"))]
    {
        drop(future);
        false
    }
}
