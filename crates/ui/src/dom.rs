use std::cell::RefCell;
use std::rc::Rc;

use activity_board_protocol::{messages, ActivityMap, MessageKind};
use gloo_timers::callback::Timeout;
use tracing::error;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use crate::controller::{BoardView, ParticipantRemover};
use crate::error::BoardError;
use crate::render::{self, Listeners};

pub const ACTIVITIES_LIST_ID: &str = "activities-list";
pub const ACTIVITY_SELECT_ID: &str = "activity";
pub const SIGNUP_FORM_ID: &str = "signup-form";
pub const EMAIL_INPUT_ID: &str = "email";
pub const MESSAGE_ID: &str = "message";

/// Every node the board touches, looked up once at startup
#[derive(Clone)]
pub struct BoardElements {
    pub document: Document,
    pub activities_list: Element,
    pub activity_select: HtmlSelectElement,
    pub signup_form: HtmlFormElement,
    pub email_input: HtmlInputElement,
    pub message: Element,
}

fn lookup<T: JsCast>(doc: &Document, id: &'static str) -> Result<T, BoardError> {
    doc.get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or(BoardError::MissingElement(id))
}

impl BoardElements {
    pub fn locate(document: &Document) -> Result<Self, BoardError> {
        Ok(Self {
            document: document.clone(),
            activities_list: lookup(document, ACTIVITIES_LIST_ID)?,
            activity_select: lookup(document, ACTIVITY_SELECT_ID)?,
            signup_form: lookup(document, SIGNUP_FORM_ID)?,
            email_input: lookup(document, EMAIL_INPUT_ID)?,
            message: lookup(document, MESSAGE_ID)?,
        })
    }

    /// Current `(email, activity)` form values
    pub fn form_values(&self) -> (String, String) {
        (self.email_input.value(), self.activity_select.value())
    }
}

/// `BoardView` backed by the live page
pub struct DomView {
    elements: BoardElements,
    /// Remove-button handlers of the cards currently on screen
    listeners: RefCell<Listeners>,
    /// Dropping the handle clears the timer
    pending_hide: RefCell<Option<Timeout>>,
}

impl DomView {
    pub fn new(elements: BoardElements) -> Self {
        Self {
            elements,
            listeners: RefCell::new(Vec::new()),
            pending_hide: RefCell::new(None),
        }
    }

    pub const fn elements(&self) -> &BoardElements {
        &self.elements
    }

    fn try_render(
        &self,
        activities: &ActivityMap,
        remover: &Rc<dyn ParticipantRemover>,
    ) -> Result<(), wasm_bindgen::JsValue> {
        let doc = &self.elements.document;
        let list = &self.elements.activities_list;
        let mut listeners = Listeners::new();

        list.set_inner_html("");
        for (name, activity) in activities {
            let card = render::activity_card(doc, name, activity, remover, &mut listeners)?;
            list.append_child(&card)?;
        }
        render::fill_select(&self.elements.activity_select, activities.keys().map(String::as_str))?;

        // Old cards are gone; drop their handlers
        *self.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn cancel_pending_hide(&self) {
        drop(self.pending_hide.borrow_mut().take());
    }
}

impl BoardView for DomView {
    fn render_activities(&self, activities: &ActivityMap, remover: Rc<dyn ParticipantRemover>) {
        if let Err(e) = self.try_render(activities, &remover) {
            error!(error = ?e, "failed to render activities");
            self.show_load_failure();
        }
    }

    fn show_load_failure(&self) {
        let list = &self.elements.activities_list;
        list.set_inner_html("");
        if let Ok(p) = self.elements.document.create_element("p") {
            p.set_text_content(Some(messages::LOAD_FAILED));
            let _ = list.append_child(&p);
        }
    }

    fn show_message(&self, text: &str, kind: MessageKind) {
        self.cancel_pending_hide();
        let el = &self.elements.message;
        el.set_text_content(Some(text));
        // Replaces every class, `hidden` included
        el.set_class_name(kind.class_name());
    }

    fn hide_message_after(&self, delay_ms: u32) {
        self.cancel_pending_hide();
        let el = self.elements.message.clone();
        let timeout = Timeout::new(delay_ms, move || {
            let _ = el.class_list().add_1("hidden");
        });
        *self.pending_hide.borrow_mut() = Some(timeout);
    }

    fn reset_form(&self) {
        self.elements.signup_form.reset();
    }
}
