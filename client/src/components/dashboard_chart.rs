//! Dashboard charts: freshness, category, and location breakdowns drawn as
//! proportional bars.

use leptos::prelude::*;

use crate::i18n::MessageKey;
use crate::render::PanelData;
use crate::state::ui::UiState;
use crate::util::chart::{self, Segment};

#[component]
pub fn DashboardChart() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let data = expect_context::<RwSignal<PanelData>>();
    let locale = move || ui.with(|u| u.locale);

    let freshness = Signal::derive(move || {
        let locale = locale();
        data.with(|d| d.stats.as_ref().map(|s| chart::segments(s, locale)).unwrap_or_default())
    });
    let categories =
        Signal::derive(move || data.with(|d| d.stats.as_ref().map(chart::category_segments).unwrap_or_default()));
    let locations =
        Signal::derive(move || data.with(|d| d.stats.as_ref().map(chart::location_segments).unwrap_or_default()));
    let total = move || data.with(|d| d.stats.as_ref().map_or(0, |s| s.total));

    view! {
        <Show
            when=move || data.with(|d| d.stats.is_some())
            fallback=move || view! { <p class="empty">{move || locale().text(MessageKey::Loading)}</p> }
        >
            <div class="dashboard">
                <p class="dashboard__total">
                    {move || format!("{}: {}", locale().text(MessageKey::LabelTotal), total())}
                </p>
                <SegmentBars title=MessageKey::LabelFreshness segments=freshness/>
                <SegmentBars title=MessageKey::LabelCategories segments=categories/>
                <SegmentBars title=MessageKey::LabelLocations segments=locations/>
            </div>
        </Show>
    }
}

#[component]
fn SegmentBars(title: MessageKey, segments: Signal<Vec<Segment>>) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    view! {
        <section class="chart">
            <h3>{move || ui.with(|u| u.locale.text(title))}</h3>
            <ul class="chart__bars">
                {move || {
                    segments
                        .get()
                        .into_iter()
                        .map(|segment| {
                            view! {
                                <li class="chart__row">
                                    <span class="chart__label">{segment.label}</span>
                                    <span class="chart__track">
                                        <span
                                            class="chart__fill"
                                            style=format!("width: {:.1}%", segment.percent)
                                        ></span>
                                    </span>
                                    <span class="chart__value">
                                        {format!("{} ({:.1}%)", segment.count, segment.percent)}
                                    </span>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </section>
    }
}
