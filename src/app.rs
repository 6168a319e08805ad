use leptos::*;
use strum::IntoEnumIterator;

use crate::application::{DashboardService, FetchTicket, QuoteFetcher};
use crate::domain::{
    chart::Period,
    events::{DashboardEvent, DomainEvent},
    logging::{LogComponent, get_logger},
    market_data::{QuoteSource, SMA_WINDOWS, suggestions},
    state::{Effect, ViewStatus},
};
use crate::infrastructure::{AlphaVantageClient, ProviderConfig};
use crate::presentation::chart_bridge;
use crate::time_utils::{DATE_FORMAT, parse_calendar_date};

const COMPONENT: LogComponent = LogComponent::Presentation("App");

pub const CHART_CONTAINER_ID: &str = "chart-container";

/// Reactive handle shared by every component.
///
/// The dashboard itself is not reactive; views subscribe to the revision counters
/// instead, which are bumped after every state change of the matching kind.
#[derive(Clone, Copy)]
pub struct Shell {
    service: StoredValue<DashboardService>,
    client: StoredValue<AlphaVantageClient>,
    /// Inputs and status text
    controls: RwSignal<u64>,
    /// Chart options
    chart: RwSignal<u64>,
    /// OHLC panel
    hover: RwSignal<u64>,
}

impl Shell {
    fn new(client: AlphaVantageClient) -> Self {
        Self {
            service: store_value(DashboardService::new(QuoteFetcher::new())),
            client: store_value(client),
            controls: create_rw_signal(0),
            chart: create_rw_signal(0),
            hover: create_rw_signal(0),
        }
    }

    /// Read dashboard state, subscribing to control changes
    fn read<T>(&self, f: impl FnOnce(&DashboardService) -> T) -> Option<T> {
        let _ = self.controls.get();
        self.service.try_with_value(f)
    }

    fn dispatch(&self, event: DashboardEvent) {
        crate::log_trace!(COMPONENT, "dispatching {}", event.event_type());
        let Some(outcome) = self.service.try_update_value(|s| s.dispatch(event)) else {
            return;
        };

        bump(self.controls);
        match outcome.effect {
            Effect::None => {}
            Effect::Redisplay => bump(self.hover),
            Effect::Recompose | Effect::Fetch(_) => {
                bump(self.chart);
                bump(self.hover);
            }
        }
        if let Some(ticket) = outcome.ticket {
            self.fetch(ticket);
        }
    }

    fn start(&self) {
        if let Some(ticket) = self.service.try_update_value(|s| s.start()) {
            self.fetch(ticket);
        }
    }

    fn fetch(&self, ticket: FetchTicket) {
        let Some(client) = self.client.try_get_value() else {
            return;
        };
        let shell = *self;
        wasm_bindgen_futures::spawn_local(async move {
            let result = client.fetch_quote(ticket.request.clone()).await;
            let event = shell.service.try_update_value(|s| s.complete(&ticket, result));
            if let Some(event) = event {
                get_logger().debug(COMPONENT, &format!("{} for generation {}", event.event_type(), ticket.generation));
                bump(shell.controls);
                bump(shell.chart);
                bump(shell.hover);
            }
        });
    }

    /// Point event from the chart
    fn hover_point(&self, series_id: &str, x: f64) {
        if self.service.try_update_value(|s| s.hover(series_id, x)).unwrap_or(false) {
            bump(self.hover);
        }
    }
}

fn bump(revision: RwSignal<u64>) {
    revision.update(|r| *r = r.wrapping_add(1));
}

#[component]
pub fn App() -> impl IntoView {
    let shell = Shell::new(AlphaVantageClient::new(ProviderConfig::from_build_env()));
    shell.start();

    // Redraw whenever the chart revision moves; hover changes do not touch it.
    create_effect(move |_| {
        let _ = shell.chart.get();
        let Some(view) = shell.service.try_update_value(|s| s.chart_view()) else {
            return;
        };
        match view.chart {
            Some(chart) => {
                let on_hover = move |series_id: &str, x: f64| shell.hover_point(series_id, x);
                if let Err(err) = chart_bridge::render(CHART_CONTAINER_ID, &chart, on_hover) {
                    crate::log_error!(COMPONENT, "chart render failed: {:?}", err);
                }
            }
            None => chart_bridge::clear(CHART_CONTAINER_ID),
        }
    });

    let status = move || shell.read(|s| s.status()).unwrap_or(ViewStatus::NoData);

    view! {
        <Navbar/>
        <main class="dashboard">
            <section class="controls">
                <SymbolInput shell=shell/>
                <SmaSelector shell=shell/>
                <PeriodSelector shell=shell/>
            </section>
            <OhlcPanel shell=shell/>
            {move || {
                let status = status();
                status.message().map(|message| {
                    let class = if status.is_alert() { "status alert" } else { "status" };
                    view! { <p class=class>{message}</p> }
                })
            }}
            <div
                id=CHART_CONTAINER_ID
                class="chart"
                on:mouseleave=move |_| shell.dispatch(DashboardEvent::HoverCleared)
            ></div>
        </main>
    }
}

#[component]
fn Navbar() -> impl IntoView {
    view! {
        <nav class="navbar">
            <span class="brand">"Stock Today"</span>
        </nav>
    }
}

#[component]
fn SymbolInput(shell: Shell) -> impl IntoView {
    let draft = move || shell.read(|s| s.state().symbol_draft.clone()).unwrap_or_default();
    let invalid = move || !shell.read(|s| s.state().draft_is_valid()).unwrap_or(true);

    view! {
        <div class="symbol-input">
            <label for="symbol">"Symbol"</label>
            <input
                id="symbol"
                type="text"
                maxlength="8"
                autocomplete="off"
                class:invalid=invalid
                prop:value=draft
                on:input=move |ev| shell.dispatch(DashboardEvent::SymbolTyped(event_target_value(&ev)))
            />
            <Show when=invalid>
                <span class="hint">"Invalid symbol"</span>
            </Show>
            <ul class="suggestions">
                {move || {
                    suggestions(&draft())
                        .into_iter()
                        .map(|symbol| {
                            let label = symbol.value().to_string();
                            view! {
                                <li on:click=move |_| shell.dispatch(DashboardEvent::SymbolPicked(symbol.clone()))>
                                    {label}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}

#[component]
fn SmaSelector(shell: Shell) -> impl IntoView {
    view! {
        <fieldset class="sma-selector">
            <legend>"Moving averages"</legend>
            {SMA_WINDOWS
                .iter()
                .map(|&window| {
                    let checked = move || shell.read(|s| s.state().sma_windows.contains(&window)).unwrap_or(false);
                    view! {
                        <label>
                            <input
                                type="checkbox"
                                prop:checked=checked
                                on:change=move |_| shell.dispatch(DashboardEvent::SmaToggled(window))
                            />
                            {format!("SMA {window}")}
                        </label>
                    }
                })
                .collect_view()}
        </fieldset>
    }
}

#[component]
fn PeriodSelector(shell: Shell) -> impl IntoView {
    let is_custom = move || shell.read(|s| s.state().period == Period::Custom).unwrap_or(false);
    let bound = move |start: bool| {
        shell
            .read(|s| if start { s.state().custom_start } else { s.state().custom_end })
            .flatten()
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    view! {
        <fieldset class="period-selector">
            <legend>"Period"</legend>
            {Period::iter()
                .map(|period| {
                    let checked = move || shell.read(|s| s.state().period == period).unwrap_or(false);
                    view! {
                        <label>
                            <input
                                type="radio"
                                name="period"
                                value=period.token()
                                prop:checked=checked
                                on:change=move |_| shell.dispatch(DashboardEvent::PeriodSelected(period))
                            />
                            {period.label()}
                        </label>
                    }
                })
                .collect_view()}
            <Show when=is_custom>
                <input
                    type="date"
                    prop:value=move || bound(true)
                    on:change=move |ev| {
                        shell.dispatch(DashboardEvent::CustomStartChanged(parse_calendar_date(&event_target_value(&ev))))
                    }
                />
                <input
                    type="date"
                    prop:value=move || bound(false)
                    on:change=move |ev| {
                        shell.dispatch(DashboardEvent::CustomEndChanged(parse_calendar_date(&event_target_value(&ev))))
                    }
                />
            </Show>
        </fieldset>
    }
}

/// Raw OHLCV strings of the hovered day, or the latest day
#[component]
fn OhlcPanel(shell: Shell) -> impl IntoView {
    let display = move || {
        let _ = shell.hover.get();
        shell.service.try_with_value(|s| s.ohlc_display()).flatten()
    };

    view! {
        <div class="ohlc-panel">
            {move || {
                display().map(|display| {
                    let fields = display
                        .fields()
                        .into_iter()
                        .map(|(label, value)| {
                            view! {
                                <span class="field">
                                    <b>{label}": "</b>
                                    {value.to_string()}
                                </span>
                            }
                        })
                        .collect_view();
                    view! {
                        <span class="date">{display.date.clone()}</span>
                        {fields}
                    }
                })
            }}
        </div>
    }
}
