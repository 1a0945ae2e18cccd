//! Toast notifications, stacked top-right.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{store_dismiss_toast, store_toasts};

#[component]
pub fn ToastContainer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = ctx.store;

    view! {
        <div class="toast-container position-fixed top-0 end-0 p-3" style="z-index: 9999;">
            <For
                each=move || store_toasts(&store)
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = format!(
                        "toast show align-items-center text-white border-0 {}",
                        toast.kind.css_class()
                    );
                    view! {
                        <div class=class role="alert">
                            <div class="d-flex">
                                <div class="toast-body">{toast.message}</div>
                                <button
                                    type="button"
                                    class="btn-close btn-close-white me-2 m-auto"
                                    aria-label="Close"
                                    on:click=move |_| store_dismiss_toast(&store, id)
                                ></button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}
