//! Typed wrappers around the browser APIs the widgets need.
//!
//! Everything here goes through `web-sys`; nothing is evaluated as script.
//! Functions degrade to no-ops when there is no `window` (e.g. in a worker).

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use std::time::Duration;
use storefront_core::backend::Platform;
use storefront_core::cart::parse_quantity;
use storefront_core::config::WidgetConfig;
use storefront_core::csrf::cookie_value;
use storefront_core::ProductId;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlDocument, KeyboardEvent};

/// Things happening on the server-rendered page around the widgets.
pub enum PageEvent {
    Online,
    Offline,
    Escape,
    /// Click on a `.add-to-cart-btn` carrying `data-product-id`
    AddToCart {
        product_id: ProductId,
        quantity: u32,
        button: Element,
    },
    /// Click on an element with `data-action="open-location"`
    OpenLocation,
}

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// `window.location.origin`
pub fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

/// Value of a cookie readable from script.
pub fn cookie(name: &str) -> Option<String> {
    let cookies = document()?.dyn_into::<HtmlDocument>().ok()?.cookie().ok()?;
    cookie_value(&cookies, name)
}

/// Configuration from an inline `<script type="application/json">` block,
/// with `base_url` defaulting to the page origin.
pub fn page_config(element_id: &str) -> WidgetConfig {
    let embedded = document()
        .and_then(|doc| doc.get_element_by_id(element_id))
        .and_then(|el| el.text_content());
    let config = match embedded {
        Some(raw) => WidgetConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid #{} config: {}", element_id, e);
            WidgetConfig::default()
        }),
        None => WidgetConfig::default(),
    };
    let default_base = WidgetConfig::default().base_url;
    match origin() {
        Some(origin) if config.base_url.is_empty() || config.base_url == default_base => {
            config.with_base_url(origin)
        }
        _ => config,
    }
}

pub fn is_online() -> bool {
    web_sys::window()
        .map(|w| w.navigator().on_line())
        .unwrap_or(true)
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Resolve after `duration` using `setTimeout`.
pub async fn sleep(duration: Duration) {
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().and_then(|window| {
            window
                .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
                .ok()
        });
        if scheduled.is_none() {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Stop the page behind the modal from scrolling.
pub fn lock_scroll(locked: bool) {
    if let Some(body) = document().and_then(|doc| doc.body()) {
        let value = if locked { "hidden" } else { "auto" };
        let _ = body.style().set_property("overflow", value);
    }
}

/// Toggle a server-rendered button's busy state, returning its previous
/// label so it can be restored.
pub fn set_button_busy(button: &Element, busy_label: Option<&str>) -> String {
    let previous = button.inner_html();
    match busy_label {
        Some(label) => {
            let _ = button.set_attribute("disabled", "");
            button.set_inner_html(label);
        }
        None => {
            let _ = button.remove_attribute("disabled");
        }
    }
    previous
}

pub fn restore_button(button: &Element, label: &str) {
    set_button_busy(button, None);
    button.set_inner_html(label);
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        log::error!("Could not listen for {}: {:?}", event, e);
    }
    // Listeners live as long as the page.
    closure.forget();
}

fn send(tx: &UnboundedSender<PageEvent>, event: PageEvent) {
    if tx.unbounded_send(event).is_err() {
        log::warn!("Page event dropped, widgets are gone");
    }
}

fn add_to_cart_target(event: &web_sys::Event) -> Option<PageEvent> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let button = target.closest(".add-to-cart-btn").ok()??;
    let product_id = button.get_attribute("data-product-id")?.parse().ok()?;
    let quantity = parse_quantity(&button.get_attribute("data-quantity").unwrap_or_default());
    Some(PageEvent::AddToCart {
        product_id,
        quantity,
        button,
    })
}

fn is_open_location(event: &web_sys::Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("[data-action=\"open-location\"]").ok().flatten())
        .is_some()
}

/// Install the page-level listeners and return their event stream.
///
/// Listener callbacks run outside Dioxus, so they only forward events into
/// the channel; the receiving task calls the controllers.
pub fn page_events() -> UnboundedReceiver<PageEvent> {
    let (tx, rx) = unbounded();
    let Some(window) = web_sys::window() else {
        return rx;
    };

    let online = tx.clone();
    listen(&window, "online", move |_| send(&online, PageEvent::Online));
    let offline = tx.clone();
    listen(&window, "offline", move |_| send(&offline, PageEvent::Offline));

    if let Some(doc) = window.document() {
        let keys = tx.clone();
        listen(&doc, "keydown", move |event| {
            let is_escape = event
                .dyn_ref::<KeyboardEvent>()
                .is_some_and(|k| k.key() == "Escape");
            if is_escape {
                send(&keys, PageEvent::Escape);
            }
        });

        let clicks = tx;
        listen(&doc, "click", move |event| {
            if let Some(add) = add_to_cart_target(&event) {
                send(&clicks, add);
            } else if is_open_location(&event) {
                send(&clicks, PageEvent::OpenLocation);
            }
        });
    }
    rx
}

/// Timers and connectivity of the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserPlatform;

impl Platform for BrowserPlatform {
    async fn sleep(&self, duration: Duration) {
        sleep(duration).await;
    }

    fn is_online(&self) -> bool {
        is_online()
    }
}
