use cinerate::auth::AuthPage;
use cinerate::bootstrap::PageProbe;
use cinerate::config::AuthConfig;
use cinerate::stars::StarGlyph;
use cinerate::widget::{RatingField, StarSurface};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

pub(super) fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

pub(super) struct DomPage {
    doc: Document,
}

impl DomPage {
    pub(super) fn new(doc: Document) -> Self {
        Self { doc }
    }
}

impl PageProbe for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.doc.get_element_by_id(id).is_some()
    }

    fn element_has_class(&self, id: &str, class: &str) -> bool {
        self.doc
            .get_element_by_id(id)
            .is_some_and(|el| el.class_list().contains(class))
    }
}

/// The `<input>` backing the widget.
pub(super) struct InputField {
    input: HtmlInputElement,
}

impl InputField {
    pub(super) fn new(input: HtmlInputElement) -> Self {
        Self { input }
    }
}

impl RatingField for InputField {
    fn read(&self) -> String {
        self.input.value()
    }

    fn write(&mut self, value: &str) {
        self.input.set_value(value);
    }
}

/// The star `<span>`s, star 1 first.
pub(super) struct StarSpans {
    stars: Vec<Element>,
}

impl StarSpans {
    pub(super) fn new(stars: Vec<Element>) -> Self {
        Self { stars }
    }
}

impl StarSurface for StarSpans {
    fn paint(&mut self, glyphs: &[StarGlyph]) {
        for (star, glyph) in self.stars.iter().zip(glyphs) {
            star.set_text_content(Some(glyph.symbol()));
        }
    }
}

pub(super) struct DomAuthPage {
    doc: Document,
    cfg: AuthConfig,
}

impl DomAuthPage {
    pub(super) fn new(doc: Document, cfg: AuthConfig) -> Self {
        Self { doc, cfg }
    }
}

impl AuthPage for DomAuthPage {
    fn username(&self) -> Option<String> {
        let el = self.doc.get_element_by_id(&self.cfg.username_field_id)?;
        el.dyn_into::<HtmlInputElement>().ok().map(|i| i.value())
    }

    fn csrf_token(&self) -> Option<String> {
        let selector = format!("meta[name=\"{}\"]", self.cfg.csrf_meta_name);
        self.doc
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|meta| meta.get_attribute("content"))
    }

    fn alert(&self, message: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(message);
        }
    }

    fn navigate(&self, target: &str) {
        let Some(w) = web_sys::window() else {
            return;
        };
        if w.location().set_href(target).is_err() {
            tracing::error!(url = target, "navigation failed");
        }
    }
}
