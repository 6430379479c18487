use leptos::prelude::*;
use leptos_router::components::A;

use crate::models::{Account, Position};

#[component]
pub fn AccountCard(account: Account) -> impl IntoView {
    let href = format!("/accounts/{}", account.id);
    let number = account
        .account_number
        .clone()
        .unwrap_or_else(|| "—".to_string());

    view! {
        <A href=href>
            <div class="bg-ctp-surface0 border border-ctp-surface1 rounded-lg p-4 hover:border-ctp-blue transition-colors cursor-pointer">
                <h3 class="text-xl font-semibold text-ctp-text mb-1">{account.name.clone()}</h3>
                <p class="text-ctp-subtext0 text-sm font-mono mb-2">{number}</p>
                <div class="flex items-center gap-3 text-sm">
                    <span class="text-ctp-overlay1">{account.institution.clone()}</span>
                    <span class="text-ctp-overlay0">{account.currency.clone()}</span>
                    {account.status.clone().map(|s| view! {
                        <span class="text-ctp-green">{s}</span>
                    })}
                </div>
            </div>
        </A>
    }
}

fn fmt_opt_price(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn PositionsTable(positions: Vec<Position>) -> impl IntoView {
    if positions.is_empty() {
        return view! {
            <p class="text-ctp-overlay0 py-4">"No open positions."</p>
        }
        .into_any();
    }

    view! {
        <table class="w-full text-left text-sm">
            <thead>
                <tr class="border-b border-ctp-surface1 text-ctp-overlay1">
                    <th class="py-2 pr-4">"Symbol"</th>
                    <th class="py-2 pr-4">"Name"</th>
                    <th class="py-2 pr-4 text-right">"Quantity"</th>
                    <th class="py-2 pr-4 text-right">"Price"</th>
                    <th class="py-2 text-right">"Avg cost"</th>
                </tr>
            </thead>
            <tbody>
                {positions
                    .into_iter()
                    .map(|p| {
                        view! {
                            <tr class="border-b border-ctp-surface0">
                                <td class="py-2 pr-4 font-mono text-ctp-text">{p.symbol.clone()}</td>
                                <td class="py-2 pr-4 text-ctp-subtext0">
                                    {p.name.clone().unwrap_or_else(|| "—".to_string())}
                                </td>
                                <td class="py-2 pr-4 text-right text-ctp-text">{format!("{}", p.quantity)}</td>
                                <td class="py-2 pr-4 text-right text-ctp-text">{fmt_opt_price(p.price)}</td>
                                <td class="py-2 text-right text-ctp-text">{fmt_opt_price(p.average_cost)}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_any()
}
