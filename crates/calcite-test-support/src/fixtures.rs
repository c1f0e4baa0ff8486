//! Canned widget markup.
//!
//! Every builder appends to an existing parent and returns the ids tests poke
//! at. [`page`] gives the usual skeleton: `body > .wrapper` for content and
//! `body > footer.footer`, with overlays appended straight to `body`.

use calcite_dom::{Dom, MemoryDom, NodeId};

/// Document skeleton with the layout landmarks.
pub struct Page {
    /// The document.
    pub dom: MemoryDom,
    /// `.wrapper` landmark holding page content.
    pub wrapper: NodeId,
    /// `.footer` landmark.
    pub footer: NodeId,
}

impl Page {
    /// The `<body>` element.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.dom.body_element()
    }
}

/// Empty page with wrapper and footer landmarks.
#[must_use]
pub fn page() -> Page {
    let dom = MemoryDom::new();
    let body = dom.body_element();
    let wrapper = dom.append_element(body, "div", "wrapper");
    let footer = dom.append_element(body, "footer", "footer");
    Page {
        dom,
        wrapper,
        footer,
    }
}

/// Accordion ids.
pub struct AccordionFixture {
    /// `.js-accordion` list.
    pub accordion: NodeId,
    /// `.accordion-section` children.
    pub sections: Vec<NodeId>,
    /// First child of each section.
    pub headers: Vec<NodeId>,
    /// Body of each section.
    pub bodies: Vec<NodeId>,
}

/// Accordion with `count` sections; sections listed in `active` start open.
pub fn accordion(
    dom: &MemoryDom,
    parent: NodeId,
    count: usize,
    active: &[usize],
) -> AccordionFixture {
    let accordion = dom.append_element(parent, "ul", "accordion js-accordion");
    let mut fixture = AccordionFixture {
        accordion,
        sections: Vec::new(),
        headers: Vec::new(),
        bodies: Vec::new(),
    };
    for index in 0..count {
        let class = if active.contains(&index) {
            "accordion-section is-active"
        } else {
            "accordion-section"
        };
        let section = dom.append_element(accordion, "li", class);
        fixture.headers.push(dom.append_element(section, "h4", "accordion-title"));
        fixture.bodies.push(dom.append_element(section, "div", "accordion-content"));
        fixture.sections.push(section);
    }
    fixture
}

/// Dropdown ids.
pub struct DropdownFixture {
    /// `.js-dropdown` container.
    pub dropdown: NodeId,
    /// `.js-dropdown-toggle` link.
    pub toggle: NodeId,
    /// Menu link inside the dropdown.
    pub item: NodeId,
}

/// Dropdown with a toggle and one menu item.
pub fn dropdown(dom: &MemoryDom, parent: NodeId) -> DropdownFixture {
    let dropdown = dom.append_element(parent, "div", "dropdown js-dropdown");
    let toggle = dom.append_element(dropdown, "a", "top-nav-link js-dropdown-toggle");
    let menu = dom.append_element(dropdown, "nav", "dropdown-menu");
    let item = dom.append_element(menu, "a", "dropdown-link");
    DropdownFixture {
        dropdown,
        toggle,
        item,
    }
}

/// Drawer or modal ids.
pub struct OverlayFixture {
    /// `.js-drawer` / `.js-modal` element.
    pub overlay: NodeId,
    /// Toggle outside the overlay that opens it.
    pub toggle: NodeId,
    /// Focusable content inside the overlay.
    pub content: NodeId,
    /// Close control inside the overlay.
    pub close: NodeId,
}

/// Drawer `id` appended to the body, with its toggle appended to `parent`.
pub fn drawer(dom: &MemoryDom, parent: NodeId, id: &str) -> OverlayFixture {
    let toggle = dom.append_element(parent, "a", "btn js-drawer-toggle");
    dom.set_attribute(&toggle, "data-drawer", id);

    let overlay = dom.append_element(dom.body_element(), "div", "drawer js-drawer");
    dom.set_attribute(&overlay, "data-drawer", id);
    let nav = dom.append_element(overlay, "nav", "drawer-nav");
    let content = dom.append_element(nav, "a", "side-nav-link");
    let close = dom.append_element(nav, "a", "js-drawer-toggle");
    dom.set_attribute(&close, "data-drawer", id);

    OverlayFixture {
        overlay,
        toggle,
        content,
        close,
    }
}

/// Modal `id` appended to the body, with its toggle appended to `parent`. The
/// close button carries no `data-modal` and resolves its enclosing modal.
pub fn modal(dom: &MemoryDom, parent: NodeId, id: &str) -> OverlayFixture {
    let toggle = dom.append_element(parent, "button", "btn js-modal-toggle");
    dom.set_attribute(&toggle, "data-modal", id);

    let overlay = dom.append_element(dom.body_element(), "div", "modal-overlay js-modal");
    dom.set_attribute(&overlay, "data-modal", id);
    let dialog = dom.append_element(overlay, "div", "modal-content");
    let content = dom.append_element(dialog, "input", "modal-input");
    let close = dom.append_element(dialog, "button", "btn js-modal-toggle");

    OverlayFixture {
        overlay,
        toggle,
        content,
        close,
    }
}

/// Expanding nav ids.
pub struct ExpandingFixture {
    /// `.js-expanding` expander.
    pub expander: NodeId,
    /// `.js-expanding-nav` sections, one per id.
    pub sections: Vec<NodeId>,
    /// `.js-expanding-toggle` links, one per id.
    pub toggles: Vec<NodeId>,
}

/// Expander in `parent` with one section per id and a toggle row before it.
pub fn expanding_nav(dom: &MemoryDom, parent: NodeId, ids: &[&str]) -> ExpandingFixture {
    let top_nav = dom.append_element(parent, "nav", "top-nav");
    let expander = dom.append_element(parent, "div", "expanding-nav js-expanding");
    let mut fixture = ExpandingFixture {
        expander,
        sections: Vec::new(),
        toggles: Vec::new(),
    };
    for id in ids {
        let toggle = dom.append_element(top_nav, "a", "top-nav-link js-expanding-toggle");
        dom.set_attribute(&toggle, "data-expanding-nav", id);
        let section = dom.append_element(expander, "div", "js-expanding-nav");
        dom.set_attribute(&section, "data-expanding-nav", id);
        fixture.toggles.push(toggle);
        fixture.sections.push(section);
    }
    fixture
}

/// Tab group ids.
pub struct TabsFixture {
    /// `.js-tab-group` container.
    pub group: NodeId,
    /// `.js-tab` links in order.
    pub tabs: Vec<NodeId>,
    /// `.js-tab-section` panes in order.
    pub panes: Vec<NodeId>,
}

/// Tab group with `tabs` tabs and `panes` panes; tab and pane 0 start active.
pub fn tabs(dom: &MemoryDom, parent: NodeId, tabs: usize, panes: usize) -> TabsFixture {
    let group = dom.append_element(parent, "div", "js-tab-group");
    let nav = dom.append_element(group, "nav", "tab-nav");
    let contents = dom.append_element(group, "section", "tab-contents");
    let tabs = (0..tabs)
        .map(|index| {
            let class = if index == 0 { "tab-title js-tab is-active" } else { "tab-title js-tab" };
            dom.append_element(nav, "a", class)
        })
        .collect();
    let panes = (0..panes)
        .map(|index| {
            let class = if index == 0 {
                "tab-section js-tab-section is-active"
            } else {
                "tab-section js-tab-section"
            };
            dom.append_element(contents, "article", class)
        })
        .collect();
    TabsFixture { group, tabs, panes }
}

/// Site search ids.
pub struct SearchFixture {
    /// `.js-site-search` container.
    pub form: NodeId,
    /// Search input.
    pub input: NodeId,
    /// Submit button.
    pub submit: NodeId,
}

/// Site search form with an input and submit button.
pub fn site_search(dom: &MemoryDom, parent: NodeId) -> SearchFixture {
    let form = dom.append_element(parent, "form", "site-search js-site-search");
    let input = dom.append_element(form, "input", "site-search-input");
    let submit = dom.append_element(form, "button", "site-search-submit");
    SearchFixture {
        form,
        input,
        submit,
    }
}

/// Sticky element at `offset_top` with an optional `data-top` threshold.
pub fn sticky(dom: &MemoryDom, parent: NodeId, offset_top: f64, data_top: Option<&str>) -> NodeId {
    let element = dom.append_element(parent, "header", "sub-nav js-sticky");
    dom.append_element(element, "h2", "sub-nav-title");
    if let Some(data_top) = data_top {
        dom.set_attribute(&element, "data-top", data_top);
    }
    dom.set_offset_top(element, offset_top);
    element
}
