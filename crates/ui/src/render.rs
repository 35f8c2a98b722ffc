//! Card and option markup for the board
//!
//! Server strings always go in as text nodes.

use std::rc::Rc;

use activity_board_protocol::{messages, Activity};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlOptionElement, HtmlSelectElement};

use crate::controller::ParticipantRemover;

/// Click handlers attached during one render pass
pub type Listeners = Vec<Closure<dyn FnMut()>>;

const REMOVE_ICON: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="currentColor"><path d="M19 6.41L17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z"/></svg>"#;

fn text_element(
    doc: &Document,
    tag: &str,
    class: Option<&str>,
    text: &str,
) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    el.set_text_content(Some(text));
    Ok(el)
}

/// `<p><strong>{label}</strong> {value}</p>`
fn labelled_line(doc: &Document, label: &str, value: &str) -> Result<Element, JsValue> {
    let p = doc.create_element("p")?;
    let strong = text_element(doc, "strong", None, label)?;
    p.append_child(&strong)?;
    p.append_with_str_1(&format!(" {value}"))?;
    Ok(p)
}

fn participant_row(
    doc: &Document,
    activity: &str,
    email: &str,
    remover: &Rc<dyn ParticipantRemover>,
    listeners: &mut Listeners,
) -> Result<Element, JsValue> {
    let row = doc.create_element("div")?;
    row.set_class_name("participant-item");
    let email_span = text_element(doc, "span", Some("participant-email"), email)?;
    row.append_child(&email_span)?;

    let button = doc.create_element("button")?;
    button.set_class_name("delete-btn");
    button.set_attribute("type", "button")?;
    button.set_attribute("title", messages::REMOVE_TITLE)?;
    button.set_attribute("aria-label", &format!("Remove {email}"))?;
    button.set_inner_html(REMOVE_ICON);

    let remover = Rc::clone(remover);
    let activity = activity.to_string();
    let email = email.to_string();
    let cb = Closure::wrap(Box::new(move || {
        Rc::clone(&remover).request_removal(activity.clone(), email.clone());
    }) as Box<dyn FnMut()>);
    button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    listeners.push(cb);

    row.append_child(&button)?;
    Ok(row)
}

/// Build one `div.activity-card`
pub fn activity_card(
    doc: &Document,
    name: &str,
    activity: &Activity,
    remover: &Rc<dyn ParticipantRemover>,
    listeners: &mut Listeners,
) -> Result<Element, JsValue> {
    let card = doc.create_element("div")?;
    card.set_class_name("activity-card");

    let title = text_element(doc, "h4", None, name)?;
    let description = text_element(doc, "p", None, &activity.description)?;
    let schedule = labelled_line(doc, "Schedule:", &activity.schedule)?;
    let availability = labelled_line(doc, "Availability:", &activity.availability_label())?;
    for line in [&title, &description, &schedule, &availability] {
        card.append_child(line)?;
    }

    let section = doc.create_element("div")?;
    section.set_class_name("participants-section");
    let heading = doc.create_element("p")?;
    let label = text_element(doc, "strong", None, "Participants:")?;
    heading.append_child(&label)?;
    section.append_child(&heading)?;

    if activity.has_participants() {
        let list = doc.create_element("div")?;
        list.set_class_name("participants-list");
        for email in &activity.participants {
            let row = participant_row(doc, name, email, remover, listeners)?;
            list.append_child(&row)?;
        }
        section.append_child(&list)?;
    } else {
        let placeholder =
            text_element(doc, "p", Some("no-participants"), messages::NO_PARTICIPANTS)?;
        section.append_child(&placeholder)?;
    }

    card.append_child(&section)?;
    Ok(card)
}

/// Reset the select to the placeholder followed by one option per name
pub fn fill_select<'a>(
    select: &HtmlSelectElement,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<(), JsValue> {
    select.set_inner_html("");
    let placeholder =
        HtmlOptionElement::new_with_text_and_value(messages::SELECT_PLACEHOLDER, "")?;
    select.append_child(&placeholder)?;
    for name in names {
        let option = HtmlOptionElement::new_with_text_and_value(name, name)?;
        select.append_child(&option)?;
    }
    Ok(())
}
