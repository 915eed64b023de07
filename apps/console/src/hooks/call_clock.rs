use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

use crate::config::AppConfig;
use crate::models::ScenarioId;
use crate::APP_CONFIG;

/// Simulated call duration in seconds. Restarts whenever the scenario changes
/// and stands still while the call is on hold.
pub fn use_call_clock(scenario: Memo<ScenarioId>, on_hold: Memo<bool>) -> Signal<u64> {
    let tick_ms = APP_CONFIG
        .get()
        .map(AppConfig::call_tick_ms)
        .unwrap_or_else(|| AppConfig::default().call_tick_ms());
    let mut elapsed = use_signal(|| 0u64);

    use_effect(move || {
        let _ = scenario();
        elapsed.set(0);
    });

    use_future(move || async move {
        loop {
            TimeoutFuture::new(tick_ms).await;
            if !*on_hold.peek() {
                *elapsed.write() += 1;
            }
        }
    });

    elapsed
}
