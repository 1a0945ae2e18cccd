//! Job Board App
//!
//! Loads the board embedded in the page and renders it as kanban columns.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::board::Board;
use crate::commands;
use crate::components::{KanbanColumn, ToastContainer};
use crate::config::BoardConfig;
use crate::context::AppContext;
use crate::store::{store_column_count, BoardState};

use leptos_dragdrop::*;

/// Read the initial board; failures render an empty board plus a message
fn load_board() -> (Board, Option<String>) {
    let loaded = commands::load_board_snapshot()
        .map_err(|e| e.to_string())
        .and_then(|snapshot| Board::from_snapshot(snapshot).map_err(|e| e.to_string()));
    match loaded {
        Ok(board) => {
            log::info!(
                "[APP] loaded {} columns, {} cards",
                board.columns().len(),
                board.total_cards()
            );
            (board, None)
        }
        Err(e) => {
            log::error!("[APP] could not load board: {}", e);
            (Board::default(), Some(e))
        }
    }
}

#[component]
pub fn App(config: BoardConfig) -> impl IntoView {
    let (board, load_error) = load_board();

    let store = Store::new(BoardState::new(board));

    let dnd = create_dnd_signals(DragOptions::for_device(&config.touch_cancel, &config.mouse_cancel));

    let ctx = AppContext::new(store, config);
    provide_context(ctx);

    bind_global_listeners(dnd, move |ev| ctx.card_dropped(ev));

    view! {
        {load_error.map(|e| view! {
            <div class="alert alert-danger" role="alert">{format!("Could not load board: {}", e)}</div>
        })}
        <div class="kanban-board">
            <For
                each=move || 0..store_column_count(&store)
                key=|index| *index
                children=move |index| view! { <KanbanColumn dnd=dnd index=index /> }
            />
        </div>
        <ToastContainer />
    }
}
