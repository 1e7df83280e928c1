use std::cell::RefCell;
use std::rc::Rc;

use cinerate::config::WidgetConfig;
use cinerate::stars::{parse_star_position, StarGlyph};
use cinerate::widget::{StarHit, StarWidget};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, MouseEvent};

use super::dom::{InputField, StarSpans};

type SharedWidget = Rc<RefCell<StarWidget<InputField, StarSpans>>>;

/// Insert the star container before the rating input, hide the input and wire
/// the pointer listeners. The listeners live as long as the page.
pub(super) fn mount_widget(doc: &Document, cfg: &WidgetConfig) -> Result<(), String> {
    let input = doc
        .get_element_by_id(&cfg.input_id)
        .ok_or_else(|| format!("#{}: missing", cfg.input_id))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| format!("#{}: not an <input>", cfg.input_id))?;

    let container = doc
        .create_element("div")
        .map_err(|_| "document: create_element failed".to_string())?;
    container
        .class_list()
        .add_1(&cfg.container_class)
        .map_err(|_| "container: add class failed".to_string())?;

    let mut stars = Vec::with_capacity(usize::from(cfg.max_stars));
    for i in 1..=cfg.max_stars {
        let star = doc
            .create_element("span")
            .map_err(|_| "document: create_element failed".to_string())?;
        star.class_list()
            .add_1(&cfg.star_class)
            .map_err(|_| "star: add class failed".to_string())?;
        star.set_attribute("data-value", &i.to_string())
            .map_err(|_| "star: set data-value failed".to_string())?;
        star.set_text_content(Some(StarGlyph::Empty.symbol()));
        container
            .append_child(&star)
            .map_err(|_| "container: append star failed".to_string())?;
        stars.push(star);
    }

    let parent = input
        .parent_node()
        .ok_or_else(|| format!("#{}: no parent node", cfg.input_id))?;
    parent
        .insert_before(&container, Some(input.as_ref()))
        .map_err(|_| "insert_before failed".to_string())?;
    input
        .style()
        .set_property("display", "none")
        .map_err(|_| "input: hide failed".to_string())?;

    let widget: SharedWidget = Rc::new(RefCell::new(StarWidget::new(
        InputField::new(input),
        StarSpans::new(stars),
        cfg.max_stars,
    )));
    widget.borrow_mut().mount();

    attach_listeners(&container, &widget, cfg)
}

fn attach_listeners(
    container: &Element,
    widget: &SharedWidget,
    cfg: &WidgetConfig,
) -> Result<(), String> {
    let on_click = {
        let widget = widget.clone();
        let star_class = cfg.star_class.clone();
        let max_stars = cfg.max_stars;
        Closure::wrap(Box::new(move |ev: MouseEvent| {
            if let Some(hit) = star_hit(&ev, &star_class, max_stars) {
                widget.borrow_mut().click(hit);
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        .map_err(|_| "container: click listener failed".to_string())?;
    on_click.forget();

    let on_move = {
        let widget = widget.clone();
        let star_class = cfg.star_class.clone();
        let max_stars = cfg.max_stars;
        Closure::wrap(Box::new(move |ev: MouseEvent| {
            if let Some(hit) = star_hit(&ev, &star_class, max_stars) {
                widget.borrow_mut().hover(hit);
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())
        .map_err(|_| "container: mousemove listener failed".to_string())?;
    on_move.forget();

    let on_leave = {
        let widget = widget.clone();
        Closure::wrap(Box::new(move |_ev: web_sys::Event| {
            widget.borrow_mut().leave();
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())
        .map_err(|_| "container: mouseleave listener failed".to_string())?;
    on_leave.forget();

    Ok(())
}

/// `Some` only when the event target is one of our star spans.
fn star_hit(ev: &MouseEvent, star_class: &str, max_stars: u8) -> Option<StarHit> {
    let target = ev.target()?.dyn_into::<Element>().ok()?;
    if !target.class_list().contains(star_class) {
        return None;
    }
    let position = parse_star_position(target.get_attribute("data-value").as_deref(), max_stars)?;
    let rect = target.get_bounding_client_rect();
    Some(StarHit {
        position,
        offset_x: f64::from(ev.client_x()) - rect.left(),
        width: rect.width(),
    })
}
