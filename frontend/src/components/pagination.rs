use leptos::prelude::*;
use synergia_shared::pagination::{PageItem, Pagination};

/// Page bar under a list. Hidden when everything fits on one page.
#[component]
pub fn PaginationBar(
    #[prop(into)] total_items: Signal<usize>,
    items_per_page: usize,
    page: RwSignal<usize>,
) -> impl IntoView {
    let pagination = Memo::new(move |_| Pagination::new(total_items.get(), items_per_page, page.get()));

    // a shrinking list (search, delete) can leave the page out of range
    Effect::new(move |_| {
        let clamped = pagination.get().current_page();
        if page.get_untracked() != clamped {
            page.set(clamped);
        }
    });

    let go = move |target: usize| {
        page.set(target);
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    };

    view! {
        <Show when=move || pagination.get().should_render()>
            <div class="flex flex-col md:flex-row items-center justify-between gap-2 mt-6">
                <span class="text-sm text-base-content/70">{move || pagination.get().summary()}</span>
                <div class="join">
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !pagination.get().has_previous()
                        on:click=move |_| go(pagination.get_untracked().current_page() - 1)
                    >
                        "«"
                    </button>
                    {move || {
                        pagination
                            .get()
                            .items()
                            .into_iter()
                            .map(|item| match item {
                                PageItem::Page { number, current } => view! {
                                    <button
                                        class=if current { "join-item btn btn-sm btn-active" } else { "join-item btn btn-sm" }
                                        on:click=move |_| go(number)
                                    >
                                        {number}
                                    </button>
                                }
                                .into_any(),
                                PageItem::Ellipsis => view! {
                                    <button class="join-item btn btn-sm btn-disabled">"…"</button>
                                }
                                .into_any(),
                            })
                            .collect_view()
                    }}
                    <button
                        class="join-item btn btn-sm"
                        disabled=move || !pagination.get().has_next()
                        on:click=move |_| go(pagination.get_untracked().current_page() + 1)
                    >
                        "»"
                    </button>
                </div>
            </div>
        </Show>
    }
}
