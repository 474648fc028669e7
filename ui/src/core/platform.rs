//! Platform glue for spawning detached futures outside the component scope.
//!
//! Timer and network completions are delivered back to the wizard through
//! its event channel; the futures themselves run on whatever executor the
//! platform provides.

#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(fut: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(fut);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_future<F>(fut: F)
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    tokio::task::spawn(fut);
}
