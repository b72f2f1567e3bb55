//! Page elements and the mutations the session drives

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use crate::Rect;
use crate::sim::{Dodge, Layout};

/// Element ids the page must provide
pub mod ids {
    pub const PLAY_AREA: &str = "playArea";
    pub const YES: &str = "yesBtn";
    pub const NO: &str = "noBtn";
    pub const QUESTION: &str = "question";
    pub const RESULT: &str = "result";
    pub const CONFETTI: &str = "confetti";
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{id} not found")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}

/// Handles to the proposal page elements
pub struct PageView {
    play_area: HtmlElement,
    yes: HtmlButtonElement,
    no: HtmlButtonElement,
    question: HtmlElement,
    result: HtmlElement,
}

impl PageView {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            play_area: element(document, ids::PLAY_AREA)?,
            yes: element(document, ids::YES)?,
            no: element(document, ids::NO)?,
            question: element(document, ids::QUESTION)?,
            result: element(document, ids::RESULT)?,
        })
    }

    pub fn play_area(&self) -> &HtmlElement {
        &self.play_area
    }

    pub fn yes_button(&self) -> &HtmlButtonElement {
        &self.yes
    }

    pub fn no_button(&self) -> &HtmlButtonElement {
        &self.no
    }

    /// Measure the play area and No button as currently laid out
    pub fn layout(&self) -> Layout {
        let area = self.play_area.get_bounding_client_rect();
        let button = self.no.get_bounding_client_rect();
        Layout {
            area: Rect::new(
                area.left() as f32,
                area.top() as f32,
                area.width() as f32,
                area.height() as f32,
            ),
            button_size: Vec2::new(button.width() as f32, button.height() as f32),
        }
    }

    /// Move the No button (offset relative to the play area)
    pub fn place_no(&self, position: Vec2) {
        let style = self.no.style();
        let _ = style.set_property("left", &format!("{}px", position.x));
        let _ = style.set_property("top", &format!("{}px", position.y));
    }

    pub fn set_yes_scale(&self, scale: f32) {
        let _ = self
            .yes
            .style()
            .set_property("transform", &format!("scale({scale})"));
    }

    pub fn set_prompt(&self, text: &str) {
        self.question.set_text_content(Some(text));
    }

    /// Reflect a dodge on the page
    pub fn apply_dodge(&self, dodge: &Dodge) {
        self.place_no(dodge.position);
        self.set_yes_scale(dodge.yes_scale);
        if let Some(text) = dodge.prompt {
            self.set_prompt(text);
        }
    }

    /// Disable both buttons, hide the play area, reveal the result
    pub fn show_result(&self) {
        self.yes.set_disabled(true);
        self.no.set_disabled(true);
        let _ = self.play_area.style().set_property("display", "none");
        let _ = self.result.class_list().remove_1("hidden");
    }
}
