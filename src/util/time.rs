//! Wall clock and timer helpers.
//!
//! TRADE-OFFS
//! ==========
//! The browser build reads `Date.now()` and sleeps on `setTimeout`. Native
//! builds (SSR and unit tests) read `SystemTime` and, instead of sleeping,
//! yield once to the executor so polling loops still make progress.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Current wall-clock time in whole epoch seconds.
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0).floor() as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Wait roughly `ms` milliseconds.
pub async fn sleep_ms(ms: u32) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ms;
        yield_now().await;
    }
}

#[cfg(not(feature = "hydrate"))]
async fn yield_now() {
    let mut yielded = false;
    futures::future::poll_fn(move |cx| {
        if yielded {
            std::task::Poll::Ready(())
        } else {
            yielded = true;
            cx.waker().wake_by_ref();
            std::task::Poll::Pending
        }
    })
    .await;
}
