//! Kanban Column Component
//!
//! One status column: a header with the live card count and a drop area
//! holding the column's cards in order.

use leptos::prelude::*;

use crate::board::count_label;
use crate::components::JobCard;
use crate::context::AppContext;
use crate::store::store_column;

use leptos_dragdrop::*;

#[component]
pub fn KanbanColumn(
    dnd: DndSignals,
    /// Column position on the board
    index: usize,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    let column = move || store_column(&store, index);
    let status = move || column().map(|c| c.status).unwrap_or_default();
    // Recomputed from the card list on every change
    let label = move || {
        column()
            .map(|c| count_label(&c.header, c.display_count()))
            .unwrap_or_default()
    };
    let cards = move || {
        column()
            .map(|c| c.cards.into_iter().enumerate().collect::<Vec<_>>())
            .unwrap_or_default()
    };

    let on_mouseenter = make_on_column_mouseenter(dnd, index);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_drop_target = move || {
        dnd.dragging_id_read.get().is_some()
            && dnd.drop_target_read.get().map(|t| t.column()) == Some(index)
    };
    let content_class = move || {
        if is_drop_target() { "kanban-content drop-target" } else { "kanban-content" }
    };

    view! {
        <div class="kanban-column" data-status=status>
            <div class="kanban-header">
                <h5>{label}</h5>
            </div>
            <div
                class=content_class
                data-drop-column=index.to_string()
                on:mouseenter=on_mouseenter
                on:mouseleave=on_mouseleave
            >
                <For
                    each=cards
                    key=|(position, card)| {
                        // Every displayed field, so a confirmation re-renders the card
                        (
                            *position,
                            card.id,
                            card.status.clone(),
                            card.applied_date.clone(),
                            card.is_pending(),
                        )
                    }
                    children=move |(position, card)| {
                        view! {
                            <JobCard card=card column=index index=position dnd=dnd />
                        }
                    }
                />
            </div>
        </div>
    }
}
