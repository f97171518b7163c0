use std::fmt::Display;
use std::future::Future;

/// Run `work`; if it fails, run `fallback` instead.
///
/// The primary error is logged and dropped. A fallback error is logged and
/// returned to the caller. `fallback` is never called when `work` succeeds.
pub async fn perform_with_fallback<T, E, W, WFut, F, FFut>(work: W, fallback: F) -> Result<T, E>
where
    W: FnOnce() -> WFut,
    WFut: Future<Output = Result<T, E>>,
    F: FnOnce() -> FFut,
    FFut: Future<Output = Result<T, E>>,
    E: Display,
{
    match work().await {
        Ok(res) => return Ok(res),
        Err(e) => tracing::warn!("Call failed, falling back: {}", e),
    }

    fallback().await.map_err(|e| {
        tracing::warn!("Fallback failed: {}", e);
        e
    })
}
