use leptos::prelude::*;

use crate::models::Activity;

fn fmt_date(value: Option<&str>) -> String {
    // RFC 3339 timestamps; show the date part only
    value
        .map(|v| v.chars().take(10).collect())
        .unwrap_or_else(|| "—".to_string())
}

fn fmt_amount(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn ActivitiesTable(activities: Vec<Activity>) -> impl IntoView {
    if activities.is_empty() {
        return view! {
            <p class="text-ctp-overlay0 py-4">"No activities recorded for this account."</p>
        }
        .into_any();
    }

    view! {
        <table class="w-full text-left text-sm">
            <thead>
                <tr class="border-b border-ctp-surface1 text-ctp-overlay1">
                    <th class="py-2 pr-4">"Date"</th>
                    <th class="py-2 pr-4">"Type"</th>
                    <th class="py-2 pr-4">"Symbol"</th>
                    <th class="py-2 pr-4 text-right">"Quantity"</th>
                    <th class="py-2 pr-4 text-right">"Price"</th>
                    <th class="py-2 text-right">"Amount"</th>
                </tr>
            </thead>
            <tbody>
                {activities
                    .into_iter()
                    .map(|a| {
                        view! {
                            <tr class="border-b border-ctp-surface0">
                                <td class="py-2 pr-4 text-ctp-subtext0">{fmt_date(a.trade_date.as_deref())}</td>
                                <td class="py-2 pr-4 text-ctp-text">{a.activity_type.clone()}</td>
                                <td class="py-2 pr-4 font-mono text-ctp-text">
                                    {a.symbol.clone().unwrap_or_else(|| "—".to_string())}
                                </td>
                                <td class="py-2 pr-4 text-right text-ctp-text">
                                    {a.quantity.map(|q| format!("{}", q)).unwrap_or_else(|| "—".to_string())}
                                </td>
                                <td class="py-2 pr-4 text-right text-ctp-text">{fmt_amount(a.price)}</td>
                                <td class="py-2 text-right text-ctp-text">{fmt_amount(a.amount)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
