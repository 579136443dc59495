use waldo_core::{Backend, GameConfig, GameError, Request};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, RequestInit, RequestMode, Response, Window};

use crate::utils::describe_js_error;

/// [`Backend`] over `window.fetch`.
#[derive(Clone)]
pub struct FetchBackend {
    window: Window,
    config: GameConfig,
}

impl FetchBackend {
    pub fn new(window: Window, config: GameConfig) -> Self {
        Self { window, config }
    }

    async fn fetch(&self, request: &Request) -> Result<String, JsValue> {
        let url = self.config.endpoint(&request.path);
        let init = RequestInit::new();
        init.set_method(request.method.as_str());
        init.set_mode(RequestMode::Cors);
        if let Some(body) = &request.body {
            let headers = Headers::new()?;
            headers.set("Accept", "application/json")?;
            headers.set("Content-Type", "application/json")?;
            init.set_headers(&headers);
            init.set_body(&JsValue::from_str(body));
        }
        let req = web_sys::Request::new_with_str_and_init(&url, &init)?;
        let resp: Response = JsFuture::from(self.window.fetch_with_request(&req))
            .await?
            .dyn_into()?;
        if !resp.ok() {
            return Err(JsValue::from_str(&format!(
                "{} {} returned HTTP {}",
                request.method.as_str(),
                url,
                resp.status()
            )));
        }
        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}

impl Backend for FetchBackend {
    async fn send(&self, request: Request) -> waldo_core::Result<String> {
        self.fetch(&request)
            .await
            .map_err(|e| GameError::Transport(describe_js_error(&e)))
    }
}
