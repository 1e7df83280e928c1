use cinerate::auth::{submit_credentials, AuthAction};
use cinerate::bootstrap::{evaluate, BootDecision};
use cinerate::config::{AuthConfig, ClientConfig, WidgetConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

mod dom;
mod fetch;
mod logging;
mod mount;

use dom::{DomAuthPage, DomPage};
use fetch::FetchTransport;

/// Optional `<script type="application/json">` holding `ClientConfig` overrides.
const CONFIG_ELEMENT_ID: &str = "cinerate-config";

#[wasm_bindgen(start)]
pub fn start() {
    logging::init();

    let cfg = load_config();
    install_auth_handlers(&cfg.auth);

    let widget_cfg = cfg.widget;
    on_ready(move || boot(&widget_cfg));
}

fn load_config() -> ClientConfig {
    let raw = dom::document()
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(raw) = raw else {
        return ClientConfig::default();
    };
    match ClientConfig::from_json(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("#{CONFIG_ELEMENT_ID}: {e}; using defaults");
            ClientConfig::default()
        }
    }
}

/// Run `f` once the DOM is parsed; immediately if that already happened.
fn on_ready(f: impl FnOnce() + 'static) {
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.ready_state() != "loading" {
        f();
        return;
    }

    let mut f = Some(f);
    let cb = Closure::wrap(Box::new(move || {
        if let Some(f) = f.take() {
            f();
        }
    }) as Box<dyn FnMut()>);
    if doc
        .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::error!("failed to listen for DOMContentLoaded");
    }
    cb.forget();
}

fn boot(cfg: &WidgetConfig) {
    let Some(doc) = dom::document() else {
        return;
    };
    if evaluate(&DomPage::new(doc.clone()), cfg) != BootDecision::Mount {
        return;
    }
    if let Err(e) = mount::mount_widget(&doc, cfg) {
        tracing::warn!("star widget not mounted: {e}");
    }
}

/// Expose `window.login()` and `window.register()` for the auth buttons.
fn install_auth_handlers(cfg: &AuthConfig) {
    let Some(window) = web_sys::window() else {
        return;
    };

    for (name, action) in [("login", AuthAction::Login), ("register", AuthAction::Register)] {
        let cfg = cfg.clone();
        let handler = Closure::wrap(Box::new(move || {
            let cfg = cfg.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(doc) = dom::document() else {
                    return;
                };
                let page = DomAuthPage::new(doc, cfg.clone());
                let transport = FetchTransport::new(cfg.timeout_ms);
                submit_credentials(action, &page, &transport, &cfg).await;
            });
        }) as Box<dyn FnMut()>);

        if js_sys::Reflect::set(&window, &JsValue::from_str(name), handler.as_ref()).is_err() {
            tracing::error!("failed to install window.{name}()");
        }
        handler.forget();
    }
}
