//! WASM bindings running the sidebar accordion on the live page.
//!
//! The module starts itself when loaded: it waits for the document, looks for the sidebar
//! (retrying while the site generator is still rendering), groups it and then follows
//! late rendering and partial page transitions. The host page can drive it through
//! `init`, `expandCurrentSection` and `collapseAllSections`.

use crate::accordion::Accordion;
use crate::config::Config;
use crate::dom::NavDom;
use crate::entry::Link;
use crate::matchers::HeaderRules;
use crate::watch::{self, Host, LocationWatch, RetryPolicy, Shared, Subscriptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    console, Document, Element, Event, HtmlElement, MutationObserver,
    MutationObserverInit, MutationRecord, Window,
};

thread_local! {
    static MOUNTED: RefCell<Option<Shared<DomSidebar>>> = const { RefCell::new(None) };
}

fn js_failed(context: &str, err: &JsValue) {
    log::debug!("{context} failed: {err:?}");
}

fn current_path(window: &Window) -> String {
    window.location().pathname().unwrap_or_default()
}

fn millis(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[sidefold] {}", record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&message),
            log::Level::Warn => console::warn_1(&message),
            log::Level::Info => console::info_1(&message),
            log::Level::Debug | log::Level::Trace => console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// The sidebar container of the page.
pub struct DomSidebar {
    document: Document,
    root: Element,
    item_selector: String,
    active_selector: String,
}

impl NavDom for DomSidebar {
    type Node = Element;

    fn entries(&self) -> Vec<Element> {
        let Ok(list) = self.root.query_selector_all(&self.item_selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn link(&self, entry: &Element) -> Option<Link> {
        let anchor = entry.query_selector("a").ok().flatten()?;
        Some(Link {
            text: anchor.text_content().unwrap_or_default(),
            href: anchor.get_attribute("href"),
        })
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn first_child(&self, node: &Element) -> Option<Element> {
        node.first_element_child()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            js_failed("adding a class", &e);
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            js_failed("removing a class", &e);
        }
    }

    fn add_indicator(&mut self, header: &Element) {
        let chevron = match self.document.create_element("span") {
            Ok(chevron) => chevron,
            Err(e) => {
                js_failed("creating a chevron", &e);
                return;
            }
        };
        chevron.set_class_name("chevron");
        chevron.set_text_content(Some("▼"));
        if let Err(e) = header.append_child(&chevron) {
            js_failed("adding a chevron", &e);
        }
    }

    fn create_content(&mut self, header: &Element, id: &str) -> Option<Element> {
        let parent = header.parent_node()?;
        let content = self.document.create_element("div").ok()?;
        content.set_id(id);
        if let Err(e) = parent.insert_before(&content, header.next_sibling().as_ref()) {
            js_failed("inserting a section container", &e);
            return None;
        }
        Some(content)
    }

    fn insert_before(&mut self, parent: &Element, child: &Element, reference: Option<&Element>) {
        let reference: Option<&web_sys::Node> = reference.map(|r| r.as_ref());
        if let Err(e) = parent.insert_before(child, reference) {
            js_failed("moving an entry", &e);
        }
    }

    fn is_marked_active(&self, entry: &Element) -> bool {
        entry.matches(&self.active_selector).unwrap_or(false)
            || entry
                .query_selector(&self.active_selector)
                .ok()
                .flatten()
                .is_some()
    }

    fn content_height(&self, node: &Element) -> u32 {
        u32::try_from(node.scroll_height()).unwrap_or(0)
    }

    fn set_max_height(&mut self, node: &Element, px: u32) {
        if let Some(element) = node.dyn_ref::<HtmlElement>() {
            if let Err(e) = element
                .style()
                .set_property("max-height", &format!("{px}px"))
            {
                js_failed("sizing a section", &e);
            }
        }
    }
}

struct Page<'a> {
    window: &'a Window,
    document: &'a Document,
    cfg: &'a Config,
}

impl Host for Page<'_> {
    type Dom = DomSidebar;

    fn find_sidebar(&self, selector: &str) -> Option<DomSidebar> {
        let root = self.document.query_selector(selector).ok().flatten()?;
        Some(DomSidebar {
            document: self.document.clone(),
            root,
            item_selector: self.cfg.item_selector.clone(),
            active_selector: self.cfg.active_selector(),
        })
    }

    fn current_path(&self) -> String {
        current_path(self.window)
    }
}

/// Mutation observer on the sidebar and a poll of the location.
struct PageEvents {
    window: Window,
    root: Element,
    poll_interval_ms: u32,
    settle_delay_ms: u32,
}

impl Subscriptions for PageEvents {
    fn on_structural_change(&mut self, mut handler: Box<dyn FnMut()>) {
        let callback = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |records: js_sys::Array, _observer: MutationObserver| {
                let added = records
                    .iter()
                    .filter_map(|record| record.dyn_into::<MutationRecord>().ok())
                    .any(|record| record.type_() == "childList" && record.added_nodes().length() > 0);
                if added {
                    handler();
                }
            },
        );
        let observer = match MutationObserver::new(callback.as_ref().unchecked_ref()) {
            Ok(observer) => observer,
            Err(e) => {
                js_failed("creating a mutation observer", &e);
                return;
            }
        };
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&self.root, &options) {
            js_failed("observing the sidebar", &e);
            return;
        }
        callback.forget();
    }

    fn on_location_change(&mut self, handler: Box<dyn FnMut(String)>) {
        let handler = Rc::new(RefCell::new(handler));
        let window = self.window.clone();
        let settle = millis(self.settle_delay_ms);
        let mut seen = LocationWatch::new(window.location().href().unwrap_or_default());

        let tick = Closure::<dyn FnMut()>::new(move || {
            let href = window.location().href().unwrap_or_default();
            if !seen.observe(&href) {
                return;
            }
            let handler = Rc::clone(&handler);
            let path = current_path(&window);
            // Give the host time to finish swapping the page in.
            let settled = Closure::once_into_js(move || {
                if let Ok(mut handler) = handler.try_borrow_mut() {
                    (&mut **handler)(path);
                }
            });
            if let Err(e) = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(settled.unchecked_ref(), settle)
            {
                js_failed("scheduling a location update", &e);
            }
        });
        if let Err(e) = self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            millis(self.poll_interval_ms),
        ) {
            js_failed("polling the location", &e);
            return;
        }
        tick.forget();
    }
}

/// Makes a header toggle its section on click.
fn make_clickable(shared: &Shared<DomSidebar>, header: &Element) {
    if let Some(element) = header.dyn_ref::<HtmlElement>() {
        if let Err(e) = element.style().set_property("cursor", "pointer") {
            js_failed("styling a header", &e);
        }
    }
    let accordion = Rc::clone(shared);
    let target = header.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        event.stop_propagation();
        if let Ok(mut accordion) = accordion.try_borrow_mut() {
            accordion.toggle_header(&target);
        }
    });
    if let Err(e) = header.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
    {
        js_failed("listening for clicks", &e);
        return;
    }
    on_click.forget();
}

fn mount(cfg: Rc<Config>, attempt: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let page = Page {
        window: &window,
        document: &document,
        cfg: &cfg,
    };

    let dom = match watch::locate_sidebar(&page, &cfg.sidebar_selectors) {
        Ok(dom) => dom,
        Err(err) => {
            let policy = RetryPolicy::new(cfg.retry_delay_ms, cfg.max_attempts);
            let Some(delay) = policy.next_delay(attempt) else {
                log::warn!("{err}; giving up after {attempt} attempts");
                return;
            };
            log::debug!("{err}; retrying in {delay:?}");
            let retry_cfg = Rc::clone(&cfg);
            let retry = Closure::once_into_js(move || mount(retry_cfg, attempt + 1));
            let delay = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            if let Err(e) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(retry.unchecked_ref(), delay)
            {
                js_failed("scheduling a retry", &e);
            }
            return;
        }
    };

    let mut events = PageEvents {
        window: window.clone(),
        root: dom.root.clone(),
        poll_interval_ms: cfg.poll_interval_ms,
        settle_delay_ms: cfg.settle_delay_ms,
    };
    let shared: Shared<DomSidebar> = Rc::new(RefCell::new(Accordion::new(
        dom,
        HeaderRules::from_config(&cfg),
    )));
    let created = shared.borrow_mut().rescan();
    for header in &created {
        make_clickable(&shared, header);
    }
    shared.borrow_mut().resolve_active(&page.current_path());

    let path_window = window.clone();
    watch::wire(
        &shared,
        &mut events,
        move || current_path(&path_window),
        |shared: &Shared<DomSidebar>, headers: &[Element]| {
            for header in headers {
                make_clickable(shared, header);
            }
        },
    );

    log::info!(
        "sidebar accordion ready with {} sections",
        shared.borrow().sections().len()
    );
    MOUNTED.with(|mounted| *mounted.borrow_mut() = Some(shared));
}

fn mounted() -> Option<Shared<DomSidebar>> {
    MOUNTED.with(|mounted| mounted.borrow().clone())
}

/// Installs the console logger and panic hook, then initializes.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
    init(None);
}

/// Initializes the accordion, or re-scans the sidebar if it is already running.
///
/// `config` is optional TOML overriding the defaults.
#[wasm_bindgen]
pub fn init(config: Option<String>) {
    if let Some(shared) = mounted() {
        if config.is_some() {
            log::warn!("accordion already running; configuration passed to init is ignored");
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let created = match shared.try_borrow_mut() {
            Ok(mut accordion) => {
                let created = accordion.rescan();
                accordion.resolve_active(&current_path(&window));
                created
            }
            Err(_) => return,
        };
        for header in &created {
            make_clickable(&shared, header);
        }
        return;
    }

    let cfg = match config.as_deref().map(Config::parse).transpose() {
        Ok(cfg) => Rc::new(cfg.unwrap_or_default()),
        Err(e) => {
            log::warn!("{e}; using defaults");
            Rc::new(Config::default())
        }
    };
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || mount(cfg, 1));
        if let Err(e) =
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        {
            js_failed("waiting for the document", &e);
        }
    } else {
        mount(cfg, 1);
    }
}

/// Expands the section of the current page, returning its index.
#[wasm_bindgen(js_name = expandCurrentSection)]
pub fn expand_current_section() -> Option<u32> {
    let shared = mounted()?;
    let window = web_sys::window()?;
    let index = shared
        .try_borrow_mut()
        .ok()?
        .resolve_active(&current_path(&window));
    index.and_then(|i| u32::try_from(i).ok())
}

/// Collapses every section.
#[wasm_bindgen(js_name = collapseAllSections)]
pub fn collapse_all_sections() {
    if let Some(shared) = mounted() {
        if let Ok(mut accordion) = shared.try_borrow_mut() {
            accordion.collapse_all();
        }
    }
}
