//! Keeping the accordion in step with the page.
//!
//! The site generator may fill the sidebar after the first pass, and partial page transitions
//! change the location without a reload. Both arrive as notifications through
//! [`Subscriptions`], which the browser binding implements with a mutation observer and a
//! location poll. Nothing here knows about timers or the DOM.

use crate::accordion::Accordion;
use crate::dom::NavDom;
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Accordion shared between event handlers on one thread.
pub type Shared<D> = Rc<RefCell<Accordion<D>>>;

/// Change notifications the page can deliver.
pub trait Subscriptions {
    /// Called when entries are added below the sidebar container.
    fn on_structural_change(&mut self, handler: Box<dyn FnMut()>);
    /// Called with the new path once the location has changed and settled.
    fn on_location_change(&mut self, handler: Box<dyn FnMut(String)>);
}

/// Access to the page the sidebar lives in.
pub trait Host {
    /// Tree handle for a located sidebar.
    type Dom: NavDom;

    /// The navigation container matched by `selector`, if it is rendered.
    fn find_sidebar(&self, selector: &str) -> Option<Self::Dom>;
    /// Path of the page currently displayed.
    fn current_path(&self) -> String;
}

/// Finds the navigation container, trying each selector in order.
///
/// # Errors
///
/// Returns [`Error::SidebarNotFound`] if no selector matches yet.
pub fn locate_sidebar<H: Host>(host: &H, selectors: &[String]) -> Result<H::Dom> {
    selectors
        .iter()
        .find_map(|selector| host.find_sidebar(selector))
        .ok_or_else(|| Error::SidebarNotFound(selectors.join(", ")))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How long to keep looking for a sidebar that is not rendered yet.
pub struct RetryPolicy {
    /// Wait between attempts.
    pub delay: Duration,
    /// Attempts allowed in total; 0 retries forever.
    pub max_attempts: u32,
}

impl RetryPolicy {
    #[must_use]
    /// Policy waiting `delay_ms` between at most `max_attempts` attempts.
    pub fn new(delay_ms: u32, max_attempts: u32) -> Self {
        Self {
            delay: Duration::from_millis(u64::from(delay_ms)),
            max_attempts,
        }
    }

    #[must_use]
    /// Delay before the attempt after `attempt` (counted from 1), or `None` to stop.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        (self.max_attempts == 0 || attempt < self.max_attempts).then_some(self.delay)
    }
}

#[derive(Clone, Debug)]
/// Remembers the last location seen by a poll.
pub struct LocationWatch {
    last: String,
}

impl LocationWatch {
    #[must_use]
    /// Watch starting from the location at setup.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            last: initial.into(),
        }
    }

    #[must_use]
    /// Most recent location observed.
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Records `current`, returning whether it differs from the previous observation.
    pub fn observe(&mut self, current: &str) -> bool {
        if self.last == current {
            return false;
        }
        current.clone_into(&mut self.last);
        true
    }
}

/// Connects an accordion to change notifications.
///
/// A structural change re-runs the grouping pass; when it grouped anything new the active
/// section is resolved again for `current_path()` and `on_grouped` receives the headers that
/// became clickable. A location change resolves the active section for the new path. Handlers
/// that find the accordion busy skip their turn.
pub fn wire<D, S, P, G>(shared: &Shared<D>, subscriptions: &mut S, current_path: P, mut on_grouped: G)
where
    D: NavDom + 'static,
    S: Subscriptions,
    P: Fn() -> String + 'static,
    G: FnMut(&Shared<D>, &[D::Node]) + 'static,
{
    let accordion = Rc::clone(shared);
    subscriptions.on_structural_change(Box::new(move || {
        let created = {
            let Ok(mut accordion) = accordion.try_borrow_mut() else {
                return;
            };
            let before = accordion.sections().len();
            let created = accordion.rescan();
            if created.is_empty() && accordion.sections().len() == before {
                return;
            }
            accordion.resolve_active(&current_path());
            created
        };
        if !created.is_empty() {
            on_grouped(&accordion, &created);
        }
    }));

    let accordion = Rc::clone(shared);
    subscriptions.on_location_change(Box::new(move |path| {
        if let Ok(mut accordion) = accordion.try_borrow_mut() {
            accordion.resolve_active(&path);
        }
    }));
}

#[cfg(test)]
#[path = "tests/watch.rs"]
mod tests;
