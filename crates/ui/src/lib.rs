//! Activity board UI
//!
//! Keeps the `#activities-list` cards and the `#activity` select in step with
//! the server, and turns form submits and remove clicks into API calls.

mod config;
mod controller;
mod dom;
mod error;
mod network;
mod render;

use std::rc::Rc;

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, Event};

pub use config::{query_param, ClientConfig, API_BASE_STORAGE_KEY};
pub use controller::{BoardController, BoardView, ParticipantRemover, ReloadSequence};
pub use dom::{BoardElements, DomView};
pub use error::BoardError;
pub use network::{read_activities, read_reply, ActivityApi, FetchApi};

/// The controller wired to the real page and network
pub type Board = BoardController<FetchApi, DomView>;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let document = window().and_then(|w| w.document()).ok_or("No document")?;

    // Module scripts usually run after parsing, but a classic <script> in
    // <head> would not
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once(Box::new(move || start_or_log(&doc)) as Box<dyn FnOnce()>);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        start_or_log(&document);
    }
    Ok(())
}

/// A page without the board markup is left alone
fn start_or_log(document: &Document) {
    if let Err(e) = start(document) {
        error!(error = %e, "activity board failed to start");
    }
}

/// Look up the page, build the controller, and kick off the first load
pub fn start(document: &Document) -> Result<Rc<Board>, BoardError> {
    info!("DOM loaded, starting app initialization");

    let config = ClientConfig::load();
    let elements = BoardElements::locate(document)?;
    let api = FetchApi::new(config.api_base.clone());
    let board = BoardController::new(api, DomView::new(elements), config);

    bind_signup(&board)?;
    board.spawn_reload();

    Ok(board)
}

fn bind_signup(board: &Rc<Board>) -> Result<(), BoardError> {
    let form = board.view().elements().signup_form.clone();
    let handler_board = Rc::clone(board);

    // Native `required` validation runs before submit fires
    let on_submit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();
        let (email, activity) = handler_board.view().elements().form_values();
        handler_board.spawn_sign_up(email, activity);
    }) as Box<dyn FnMut(_)>);

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
