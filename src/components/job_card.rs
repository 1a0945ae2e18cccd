//! Job Card Component
//!
//! A draggable job application card.

use leptos::prelude::*;

use crate::components::DeleteConfirmButton;
use crate::context::AppContext;
use crate::models::Card;

use leptos_dragdrop::*;

#[component]
pub fn JobCard(
    card: Card,
    column: usize,
    /// Position within the column
    index: usize,
    dnd: DndSignals,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = card.id;
    let pending = card.is_pending();

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, id, column);
    let on_touchstart = make_on_touchstart(dnd, id, column);
    let on_mouseenter = make_on_slot_mouseenter(dnd, column, index);
    let on_mouseleave = make_on_slot_mouseleave(dnd, column);

    // Visual state
    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let is_slot_target = move || {
        matches!(
            dnd.drop_target_read.get(),
            Some(DropTarget::Slot { column: c, index: i }) if c == column && i == index
        )
    };

    let class = move || card_class(pending, is_dragging(), is_slot_target());

    // A drag that ends over a link must not follow it
    let on_click = move |ev: web_sys::MouseEvent| {
        if dnd.drag_just_ended_read.get_untracked() {
            ev.prevent_default();
        }
    };

    let title = card.title.clone();
    let on_delete = Callback::new(move |_: ()| ctx.delete_job(id));

    // The slot owns the gap below the card so hovering it keeps this slot targeted
    view! {
        <div
            class=SLOT_CLASS
            data-drop-column=column.to_string()
            data-drop-index=index.to_string()
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div
                class=class
                data-job-id=id.to_string()
                on:mousedown=on_mousedown
                on:touchstart=on_touchstart
                on:click=on_click
            >
                <div class="card-body">
                    <div class="d-flex justify-content-between align-items-start">
                        <h6 class="card-title">
                            <a href=format!("/job/{}", id)>{card.title}</a>
                        </h6>
                        <DeleteConfirmButton title=title on_confirm=on_delete />
                    </div>
                    {card.company.map(|company| view! {
                        <p class="card-subtitle mb-1 text-muted">{company}</p>
                    })}
                    {card.location.map(|location| view! {
                        <small class="text-muted d-block">{location}</small>
                    })}
                    {card.applied_date.map(|date| view! {
                        <small class="text-muted d-block applied-date">{format!("Applied: {}", date)}</small>
                    })}
                    {card.url.map(|url| view! {
                        <a class="btn btn-sm btn-outline-secondary mt-1" href=url target="_blank" rel="noopener">
                            "View posting"
                        </a>
                    })}
                    {pending.then(|| view! {
                        <span class="spinner-border spinner-border-sm sync-indicator" role="status"></span>
                    })}
                </div>
            </div>
        </div>
    }
}

/// Wrapper around each card; spacing is padding so it stays hoverable
const SLOT_CLASS: &str = "job-card-slot pb-2";

fn card_class(pending: bool, dragging: bool, drop_before: bool) -> String {
    let mut c = String::from("job-card card");
    if pending { c.push_str(" loading"); }
    if dragging { c.push_str(" dragging"); }
    if drop_before { c.push_str(" drop-before"); }
    c
}
