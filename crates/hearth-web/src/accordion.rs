//! Single-open accordion for the blog post list.
//!
//! `AccordionState` holds the logic; `bind` wires it to headers with class
//! `blog-post-header`, each followed by a `blog-post-content` sibling and
//! holding a `blog-post-arrow`.

use std::cell::RefCell;
use std::rc::Rc;

use hearth_core::error::HearthError;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, EventTarget};

use crate::canvas::js_error;

const HEADER_SELECTOR: &str = ".blog-post-header";
const CONTENT_CLASS: &str = "blog-post-content";
const ARROW_SELECTOR: &str = ".blog-post-arrow";
const OPEN_CLASS: &str = "open";
const ACTIVE_CLASS: &str = "active";

/// Sections whose visibility flipped during one toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccordionChange {
    pub opened: Option<usize>,
    pub closed: Option<usize>,
}

/// At most one section is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccordionState {
    open: Option<usize>,
}

impl AccordionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(open: Option<usize>) -> Self {
        Self { open }
    }

    /// Adopt the open flags found in the markup. The first open section stays
    /// open; the indices of any others are returned so the caller closes them.
    pub fn from_markup(open_flags: impl IntoIterator<Item = bool>) -> (Self, Vec<usize>) {
        let mut state = Self::new();
        let mut extra = Vec::new();
        for (index, open) in open_flags.into_iter().enumerate() {
            if !open {
                continue;
            }
            if state.open.is_none() {
                state.open = Some(index);
            } else {
                extra.push(index);
            }
        }
        (state, extra)
    }

    pub fn open_section(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, section: usize) -> bool {
        self.open == Some(section)
    }

    /// Open `section`, closing any other. Toggling the open section closes it.
    pub fn toggle(&mut self, section: usize) -> AccordionChange {
        match self.open {
            Some(current) if current == section => {
                self.open = None;
                AccordionChange {
                    opened: None,
                    closed: Some(section),
                }
            }
            previous => {
                self.open = Some(section);
                AccordionChange {
                    opened: Some(section),
                    closed: previous,
                }
            }
        }
    }
}

struct Section {
    header: Element,
    content: Option<Element>,
    arrow: Option<Element>,
}

impl Section {
    /// Content, header highlight and arrow always move together.
    fn set_open(&self, open: bool) -> Result<(), HearthError> {
        let targets = [
            (Some(&self.header), ACTIVE_CLASS),
            (self.content.as_ref(), OPEN_CLASS),
            (self.arrow.as_ref(), OPEN_CLASS),
        ];
        for (element, class) in targets {
            if let Some(element) = element {
                element
                    .class_list()
                    .toggle_with_force(class, open)
                    .map_err(|e| js_error("classList.toggle", e))?;
            }
        }
        Ok(())
    }

    fn content_is_open(&self) -> bool {
        self.content
            .as_ref()
            .is_some_and(|c| c.class_list().contains(OPEN_CLASS))
    }
}

fn collect_sections(document: &Document) -> Result<Vec<Section>, HearthError> {
    let headers = document
        .query_selector_all(HEADER_SELECTOR)
        .map_err(|e| js_error("querySelectorAll", e))?;
    let mut sections = Vec::with_capacity(headers.length() as usize);
    for i in 0..headers.length() {
        let Some(header) = headers.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let content = header
            .next_element_sibling()
            .filter(|sibling| sibling.class_list().contains(CONTENT_CLASS));
        let arrow = header
            .query_selector(ARROW_SELECTOR)
            .map_err(|e| js_error("querySelector", e))?;
        if content.is_none() {
            log::warn!("Accordion header {i} has no {CONTENT_CLASS} sibling");
        }
        sections.push(Section {
            header,
            content,
            arrow,
        });
    }
    Ok(sections)
}

/// Attach click handlers to every accordion header on the page.
/// Returns the number of sections bound.
pub fn bind(document: &Document) -> Result<usize, HearthError> {
    let sections = Rc::new(collect_sections(document)?);
    let (state, extra_open) =
        AccordionState::from_markup(sections.iter().map(Section::content_is_open));
    for index in extra_open {
        log::warn!("Accordion section {index} was open in markup; closing it");
        sections[index].set_open(false)?;
    }
    let state = Rc::new(RefCell::new(state));

    for (index, section) in sections.iter().enumerate() {
        let sections = sections.clone();
        let state = state.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
            let change = state.borrow_mut().toggle(index);
            let updates = [(change.closed, false), (change.opened, true)];
            for (target, open) in updates {
                let Some(section) = target.and_then(|i| sections.get(i)) else {
                    continue;
                };
                if let Err(e) = section.set_open(open) {
                    log::error!("Accordion update failed: {e}");
                }
            }
        });
        let target: &EventTarget = section.header.as_ref();
        target
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| js_error("click listener", e))?;
        closure.forget();
    }

    log::info!("Accordion bound to {} sections", sections.len());
    Ok(sections.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_closed_section() {
        let mut state = AccordionState::new();
        let change = state.toggle(2);
        assert_eq!(
            change,
            AccordionChange {
                opened: Some(2),
                closed: None
            }
        );
        assert!(state.is_open(2));
    }

    #[test]
    fn test_single_open() {
        let mut state = AccordionState::new();
        state.toggle(0);
        let change = state.toggle(3);
        assert_eq!(change.opened, Some(3));
        assert_eq!(change.closed, Some(0));
        assert!(!state.is_open(0));
        assert_eq!(state.open_section(), Some(3));
    }

    #[test]
    fn test_toggle_open_section_closes_it() {
        let mut state = AccordionState::with_open(Some(1));
        let change = state.toggle(1);
        assert_eq!(change.opened, None);
        assert_eq!(change.closed, Some(1));
        assert_eq!(state.open_section(), None);
    }

    #[test]
    fn test_markup_with_several_open_keeps_first() {
        let (mut state, extra) = AccordionState::from_markup([false, true, false, true, true]);
        assert_eq!(state.open_section(), Some(1));
        assert_eq!(extra, [3, 4]);

        let change = state.toggle(3);
        assert_eq!(change.closed, Some(1));
        assert_eq!(state.open_section(), Some(3));
    }

    #[test]
    fn test_markup_with_nothing_open() {
        let (state, extra) = AccordionState::from_markup([false, false]);
        assert_eq!(state.open_section(), None);
        assert!(extra.is_empty());
    }

    #[test]
    fn test_sequence_never_opens_two() {
        let mut state = AccordionState::new();
        for section in [0, 1, 1, 2, 0, 0, 3, 2] {
            state.toggle(section);
            let open = (0..4).filter(|&s| state.is_open(s)).count();
            assert!(open <= 1, "{open} sections open after toggling {section}");
        }
    }
}
