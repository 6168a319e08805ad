#![cfg(target_arch = "wasm32")]

use stock_eod_dashboard::domain::logging::TimeProvider;
use stock_eod_dashboard::infrastructure::services::BrowserTimeProvider;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn browser_clock_moves_forward() {
    let clock = BrowserTimeProvider::new();
    let first = clock.current_timestamp();
    assert!(first > 0);
    assert!(clock.current_timestamp() >= first);
}

#[wasm_bindgen_test]
fn browser_clock_formats_time_of_day() {
    let clock = BrowserTimeProvider::new();
    let label = clock.format_timestamp(clock.current_timestamp());
    assert_eq!(label.len(), "00:00:00.000".len());
    assert_eq!(label.matches(':').count(), 2);
}
