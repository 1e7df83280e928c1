use std::cell::Cell;
use std::rc::Rc;

use cinerate::auth::{CredentialTransport, FORM_CONTENT_TYPE};
use cinerate::error::TransportError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestInit, Response, Window};

/// `fetch` POST with an abort timer.
pub(super) struct FetchTransport {
    timeout_ms: u32,
}

impl FetchTransport {
    pub(super) fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl CredentialTransport for FetchTransport {
    async fn post_form(&self, endpoint: &str, body: &str) -> Result<String, TransportError> {
        let window = web_sys::window().ok_or(TransportError::Network("no window".to_string()))?;

        let controller =
            AbortController::new().map_err(|e| network_error("AbortController::new", &e))?;
        let headers = Headers::new().map_err(|e| network_error("Headers::new", &e))?;
        headers
            .set("Content-Type", FORM_CONTENT_TYPE)
            .map_err(|e| network_error("headers.set", &e))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(body));
        init.set_signal(Some(&controller.signal()));
        let request = Request::new_with_str_and_init(endpoint, &init)
            .map_err(|e| network_error("Request::new", &e))?;

        let timed_out = Rc::new(Cell::new(false));
        let on_timeout = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            Closure::wrap(Box::new(move || {
                timed_out.set(true);
                controller.abort();
            }) as Box<dyn FnMut()>)
        };
        let timeout = i32::try_from(self.timeout_ms).unwrap_or(i32::MAX);
        let timer = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.as_ref().unchecked_ref(),
                timeout,
            )
            .map_err(|e| network_error("set_timeout", &e))?;

        let result = read_body(&window, &request).await;

        // The timer must not fire into a dropped closure.
        window.clear_timeout_with_handle(timer);
        drop(on_timeout);

        match result {
            Err(_) if timed_out.get() => Err(TransportError::Timeout {
                ms: self.timeout_ms,
            }),
            other => other,
        }
    }
}

async fn read_body(window: &Window, request: &Request) -> Result<String, TransportError> {
    let resp = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(|e| network_error("fetch", &e))?
        .dyn_into::<Response>()
        .map_err(|_| TransportError::Network("fetch: expected Response".to_string()))?;

    let text_promise = resp.text().map_err(|e| network_error("response.text", &e))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|e| network_error("response.text", &e))?;
    text.as_string()
        .ok_or(TransportError::Decode("response body is not text".to_string()))
}

fn network_error(context: &str, err: &JsValue) -> TransportError {
    let detail = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{err:?}"));
    TransportError::Network(format!("{context}: {detail}"))
}
