//! Leptos DragDrop Utilities
//!
//! Column-to-column drag-and-drop for Leptos using mouse and touch events.
//! Uses movement threshold to distinguish click (or tap) from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop before the card at `index` in `column`
    Slot { column: usize, index: usize },
    /// Drop at the end of a column
    Column(usize),
}

impl DropTarget {
    pub fn column(&self) -> usize {
        match *self {
            DropTarget::Slot { column, .. } => column,
            DropTarget::Column(column) => column,
        }
    }

    /// Insertion index, `None` meaning "append"
    pub fn index(&self) -> Option<usize> {
        match *self {
            DropTarget::Slot { index, .. } => Some(index),
            DropTarget::Column(_) => None,
        }
    }
}

/// A completed move, delivered once per drop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropEvent {
    pub item_id: u32,
    pub source_column: usize,
    pub target_column: usize,
    pub index: Option<usize>,
}

impl DropEvent {
    pub fn new(item_id: u32, source_column: usize, target: DropTarget) -> Self {
        Self {
            item_id,
            source_column,
            target_column: target.column(),
            index: target.index(),
        }
    }
}

/// Selector for elements that never start a drag when pressed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragOptions {
    pub cancel: String,
}

impl DragOptions {
    /// Pick the cancel selector for the current device
    pub fn for_device(touch_cancel: &str, mouse_cancel: &str) -> Self {
        let cancel = if is_touch_capable() { touch_cancel } else { mouse_cancel };
        Self { cancel: cancel.to_string() }
    }
}

impl Default for DragOptions {
    fn default() -> Self {
        Self { cancel: "input,button".to_string() }
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (press but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Column the pressed item lives in
    pub origin_column_read: ReadSignal<Option<usize>>,
    pub origin_column_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
    cancel: StoredValue<String>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Attribute names read when hit-testing touch drops
pub const DROP_COLUMN_ATTR: &str = "data-drop-column";
pub const DROP_INDEX_ATTR: &str = "data-drop-index";

pub fn create_dnd_signals(options: DragOptions) -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (origin_column_read, origin_column_write) = signal(None::<usize>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        origin_column_read,
        origin_column_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
        cancel: StoredValue::new(options.cancel),
    }
}

/// `'ontouchstart' in window`
pub fn is_touch_capable() -> bool {
    web_sys::window()
        .map(|win| js_sys::Reflect::has(&win, &JsValue::from_str("ontouchstart")).unwrap_or(false))
        .unwrap_or(false)
}

fn exceeds_threshold(dx: i32, dy: i32) -> bool {
    dx.abs() > DRAG_THRESHOLD_PX || dy.abs() > DRAG_THRESHOLD_PX
}

/// Parse the drop attributes found on a hit-tested element.
/// A missing or unparsable index means "end of column".
pub fn parse_drop_target(column: Option<String>, index: Option<String>) -> Option<DropTarget> {
    let column = column?.trim().parse::<usize>().ok()?;
    match index.and_then(|i| i.trim().parse::<usize>().ok()) {
        Some(index) => Some(DropTarget::Slot { column, index }),
        None => Some(DropTarget::Column(column)),
    }
}

/// True when the pressed element sits inside something matching the cancel selector
fn is_cancelled(target: Option<web_sys::EventTarget>, selector: &str) -> bool {
    if selector.is_empty() {
        return false;
    }
    target
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(selector).ok().flatten())
        .is_some()
}

fn begin_press(dnd: &DndSignals, item_id: u32, column: usize, x: i32, y: i32) {
    dnd.pending_id_write.set(Some(item_id));
    dnd.origin_column_write.set(Some(column));
    dnd.start_x_write.set(x);
    dnd.start_y_write.set(y);
}

/// Start dragging if the pointer moved far enough from the press point
fn track_movement(dnd: &DndSignals, x: i32, y: i32) {
    let pending = dnd.pending_id_read.get_untracked();
    if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
        let dx = x - dnd.start_x_read.get_untracked();
        let dy = y - dnd.start_y_read.get_untracked();
        if exceeds_threshold(dx, dy) {
            log::debug!("[DND] drag started: item={:?}", pending);
            dnd.dragging_id_write.set(pending);
        }
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.origin_column_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Finish a press: deliver a drop if one was in progress, then reset state
fn finish_press<F>(dnd: &DndSignals, on_drop: &F)
where
    F: Fn(DropEvent),
{
    let dragging_id = dnd.dragging_id_read.get_untracked();
    let drop_target = dnd.drop_target_read.get_untracked();
    let origin = dnd.origin_column_read.get_untracked();

    dnd.pending_id_write.set(None);

    if let (Some(dragged), Some(target), Some(source)) = (dragging_id, drop_target, origin) {
        end_drag(dnd);
        on_drop(DropEvent::new(dragged, source, target));
    } else {
        // Not dragging; the click event fires naturally on the element
        end_drag(dnd);
    }
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, item_id: u32, column: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        let cancelled = dnd.cancel.with_value(|sel| is_cancelled(ev.target(), sel));
        if cancelled {
            return;
        }
        begin_press(&dnd, item_id, column, ev.client_x(), ev.client_y());
    }
}

/// Create touchstart handler for draggable cards
pub fn make_on_touchstart(dnd: DndSignals, item_id: u32, column: usize) -> impl Fn(web_sys::TouchEvent) + Copy + 'static {
    move |ev: web_sys::TouchEvent| {
        let cancelled = dnd.cancel.with_value(|sel| is_cancelled(ev.target(), sel));
        if cancelled {
            return;
        }
        if let Some(touch) = ev.touches().get(0) {
            begin_press(&dnd, item_id, column, touch.client_x(), touch.client_y());
        }
    }
}

/// Create mouseenter handler for a card slot (drop before this card)
pub fn make_on_slot_mouseenter(dnd: DndSignals, column: usize, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Slot { column, index }));
        }
    }
}

/// Create mouseleave handler for a card slot; falls back to the enclosing column
pub fn make_on_slot_mouseleave(dnd: DndSignals, column: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column)));
        }
    }
}

/// Create mouseenter handler for a column body
pub fn make_on_column_mouseenter(dnd: DndSignals, column: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Column(column)));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Hit-test the element under a touch point for drop attributes
fn touch_target_at(x: i32, y: i32) -> Option<DropTarget> {
    let doc = web_sys::window()?.document()?;
    let el = doc.element_from_point(x as f32, y as f32)?;
    let holder = el.closest(&format!("[{}]", DROP_COLUMN_ATTR)).ok().flatten()?;
    parse_drop_target(holder.get_attribute(DROP_COLUMN_ATTR), holder.get_attribute(DROP_INDEX_ATTR))
}

fn bind_global_touch<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DropEvent) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_touchmove = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |ev: web_sys::TouchEvent| {
        let Some(touch) = ev.touches().get(0) else { return };
        let (x, y) = (touch.client_x(), touch.client_y());
        track_movement(&dnd, x, y);
        if dnd.dragging_id_read.get_untracked().is_some() {
            // Keep the page from scrolling under the finger
            ev.prevent_default();
            dnd.drop_target_write.set(touch_target_at(x, y));
        }
    });

    let on_touchend = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |_ev: web_sys::TouchEvent| {
        finish_press(&dnd, &on_drop);
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_passive(false);
        let _ = doc.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_touchmove.as_ref().unchecked_ref(),
            &opts,
        );
        let _ = doc.add_event_listener_with_callback("touchend", on_touchend.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("touchcancel", on_touchend.as_ref().unchecked_ref());
    }
    on_touchmove.forget();
    on_touchend.forget();
}

/// Bind document-level handlers for drag tracking and drop detection
pub fn bind_global_listeners<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(DropEvent) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        track_movement(&dnd, ev.client_x(), ev.client_y());
    });

    let mouse_drop = on_drop.clone();
    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        finish_press(&dnd, &mouse_drop);
    });

    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
    }
    on_mousemove.forget();
    on_mouseup.forget();

    if is_touch_capable() {
        bind_global_touch(dnd, on_drop);
    }
}
