//! Hands composed chart options to Highstock and routes its point events back.
//!
//! The options tree is serialized by serde and parsed on the JS side; only the two
//! callbacks that need Rust state are attached there.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::domain::chart::ComposedChart;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Timestamp;

const COMPONENT: LogComponent = LogComponent::Presentation("ChartBridge");

#[wasm_bindgen(inline_js = r#"
const charts = new Map();

export function renderStockChart(containerId, optionsJson, onHover, tooltipText) {
    const options = JSON.parse(optionsJson);
    options.plotOptions.series.point = {
        events: {
            mouseOver: function () { onHover(this.series.options.id, this.x); }
        }
    };
    options.tooltip.formatter = function () {
        return tooltipText(this.x).split("\n").join("<br/>");
    };
    const previous = charts.get(containerId);
    if (previous) {
        previous.destroy();
    }
    charts.set(containerId, Highcharts.stockChart(containerId, options));
}

export function destroyStockChart(containerId) {
    const previous = charts.get(containerId);
    if (previous) {
        previous.destroy();
        charts.delete(containerId);
    }
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = renderStockChart, catch)]
    fn render_stock_chart(
        container_id: &str,
        options_json: &str,
        on_hover: &Closure<dyn Fn(String, f64)>,
        tooltip_text: &Closure<dyn Fn(f64) -> String>,
    ) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = destroyStockChart)]
    fn destroy_stock_chart(container_id: &str);
}

/// Callbacks of the chart currently on screen. Replaced on every render.
struct Callbacks {
    _on_hover: Closure<dyn Fn(String, f64)>,
    _tooltip: Closure<dyn Fn(f64) -> String>,
}

thread_local! {
    static CALLBACKS: RefCell<Option<Callbacks>> = const { RefCell::new(None) };
}

/// Draw `chart` into the element with id `container_id`, replacing any previous chart.
///
/// `on_hover` receives the series id and the x value of the point under the pointer.
pub fn render<F>(container_id: &str, chart: &ComposedChart, on_hover: F) -> Result<(), JsValue>
where
    F: Fn(&str, f64) + 'static,
{
    if gloo::utils::document().get_element_by_id(container_id).is_none() {
        crate::log_warn!(COMPONENT, "container #{} is not mounted yet", container_id);
        return Err(JsValue::from_str("chart container missing"));
    }

    let options_json = serde_json::to_string(&chart.options).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let on_hover = Closure::<dyn Fn(String, f64)>::new(move |series_id: String, x: f64| on_hover(&series_id, x));

    let snapshot = chart.clone();
    let tooltip = Closure::<dyn Fn(f64) -> String>::new(move |x: f64| {
        Timestamp::from_chart_x(x).map(|ts| snapshot.tooltip(ts).to_string()).unwrap_or_default()
    });

    render_stock_chart(container_id, &options_json, &on_hover, &tooltip)?;
    crate::log_debug!(COMPONENT, "rendered {} series into #{}", chart.options.series.len(), container_id);

    CALLBACKS.with(|slot| *slot.borrow_mut() = Some(Callbacks { _on_hover: on_hover, _tooltip: tooltip }));
    Ok(())
}

/// Remove the chart from `container_id`, if any
pub fn clear(container_id: &str) {
    destroy_stock_chart(container_id);
    CALLBACKS.with(|slot| slot.borrow_mut().take());
}
