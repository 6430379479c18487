use leptos::prelude::*;

const PAGE_BUTTON_CLASS: &str = "px-4 py-2 bg-ctp-surface0 border border-ctp-surface1 rounded text-ctp-text disabled:opacity-50 disabled:cursor-not-allowed hover:border-ctp-blue";

#[component]
pub fn Pagination(
    current_page: ReadSignal<usize>,
    #[prop(into)] total_items: Signal<usize>,
    page_size: usize,
    on_prev: Callback<()>,
    on_next: Callback<()>,
    #[prop(optional)] item_name: Option<String>,
) -> impl IntoView {
    let item_name = item_name.unwrap_or_else(|| "items".to_string());
    let total_pages = move || total_items.get().div_ceil(page_size).max(1);
    let offset = move || current_page.get() * page_size;

    view! {
        <div>
            <div class="text-sm text-ctp-overlay0 mb-4">
                "Showing " {move || (offset() + 1).min(total_items.get())} " - "
                {move || (offset() + page_size).min(total_items.get())} " of "
                {move || total_items.get()} " " {item_name.clone()}
            </div>

            <Show when=move || total_pages() > 1>
                <div class="flex justify-center items-center gap-2">
                    <button
                        on:click=move |_| {
                            if current_page.get() > 0 {
                                on_prev.run(());
                            }
                        }
                        disabled=move || current_page.get() == 0
                        class=PAGE_BUTTON_CLASS
                    >
                        "← Previous"
                    </button>

                    <span class="text-ctp-subtext0">
                        "Page " {move || current_page.get() + 1} " of " {total_pages}
                    </span>

                    <button
                        on:click=move |_| {
                            if current_page.get() + 1 < total_pages() {
                                on_next.run(());
                            }
                        }
                        disabled=move || current_page.get() + 1 >= total_pages()
                        class=PAGE_BUTTON_CLASS
                    >
                        "Next →"
                    </button>
                </div>
            </Show>
        </div>
    }
}

/// Centered loading placeholder
#[component]
pub fn LoadingIndicator() -> impl IntoView {
    view! {
        <div class="flex justify-center py-12 text-ctp-overlay0">"Loading..."</div>
    }
}

/// Error banner for failed fetches
#[component]
pub fn ErrorBanner(message: String) -> impl IntoView {
    view! {
        <div class="bg-ctp-surface0 border border-ctp-red rounded-lg p-4 text-ctp-red">
            {message}
        </div>
    }
}
