//! Top Tools panel wiring
//!
//! Binds the page's button, tabs, estimator and weather widgets to the
//! shared state machines. Every element is optional except the toggle
//! button and the panel itself; a missing widget only disables that widget.

use std::cell::RefCell;
use std::rc::Rc;

use shared::render::{estimate_html, outcome_html, LOADING_HTML};
use shared::{
    EstimateKind, EstimatorForm, PanelEffect, PanelState, Preferences, Tab,
    WeatherLookup, WeatherQuery,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
    Node,
};

use crate::dom::{self, by_id, listen, select_all, set_class, set_visible};
use crate::fetch::BrowserWeatherSource;
use crate::geolocation::BrowserGeolocator;
use crate::storage::LocalStorage;

// ============================================================================
// Estimator widget
// ============================================================================

struct EstimatorView {
    area: HtmlInputElement,
    rate: HtmlInputElement,
    price: HtmlInputElement,
    kind: Option<HtmlSelectElement>,
    rate_label: Option<Element>,
    price_label: Option<Element>,
    out: Element,
    calc: Option<HtmlElement>,
    clear: Option<HtmlElement>,
}

impl EstimatorView {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            area: by_id(document, dom::AREA_INPUT)?,
            rate: by_id(document, dom::RATE_INPUT)?,
            price: by_id(document, dom::PRICE_INPUT)?,
            kind: by_id(document, dom::KIND_SELECT),
            rate_label: by_id(document, dom::RATE_LABEL),
            price_label: by_id(document, dom::PRICE_LABEL),
            out: by_id(document, dom::ESTIMATOR_OUT)?,
            calc: by_id(document, dom::CALC_BUTTON),
            clear: by_id(document, dom::CLEAR_BUTTON),
        })
    }

    fn selected_kind(&self) -> EstimateKind {
        match self.kind.as_ref().map(|select| select.value()) {
            Some(value) if !value.is_empty() => EstimateKind::from_selector(&value),
            _ => EstimateKind::default(),
        }
    }

    fn read(&self) -> EstimatorForm {
        EstimatorForm {
            kind: self.selected_kind(),
            area: self.area.value(),
            rate: self.rate.value(),
            price: self.price.value(),
        }
    }

    fn write(&self, form: &EstimatorForm) {
        if let Some(select) = &self.kind {
            select.set_value(form.kind.as_str());
        }
        self.area.set_value(&form.area);
        self.rate.set_value(&form.rate);
        self.price.set_value(&form.price);
        self.show_labels(form);
    }

    fn show_labels(&self, form: &EstimatorForm) {
        let labels = form.labels();
        if let Some(label) = &self.rate_label {
            label.set_text_content(Some(labels.rate_label));
        }
        if let Some(label) = &self.price_label {
            label.set_text_content(Some(labels.price_label));
        }
        self.price.set_placeholder(labels.price_placeholder);
    }
}

// ============================================================================
// Weather widget
// ============================================================================

struct WeatherView {
    out: Element,
    refresh: Option<HtmlElement>,
    location: Option<HtmlInputElement>,
    use_my_location: Option<HtmlElement>,
}

impl WeatherView {
    fn find(document: &Document) -> Option<Self> {
        Some(Self {
            out: by_id(document, dom::WEATHER_OUT)?,
            refresh: by_id(document, dom::WEATHER_REFRESH),
            location: by_id(document, dom::WEATHER_LOCATION),
            use_my_location: by_id(document, dom::WEATHER_USE_MY_LOCATION),
        })
    }

    fn location_text(&self) -> String {
        self.location
            .as_ref()
            .map(|input| input.value())
            .unwrap_or_default()
    }
}

// ============================================================================
// Panel
// ============================================================================

/// The mounted panel; lives as long as the page via its listeners
pub struct TopTools {
    button: HtmlElement,
    panel: HtmlElement,
    tabs: Vec<Element>,
    tab_panels: Vec<HtmlElement>,
    state: RefCell<PanelState>,
    estimator: Option<EstimatorView>,
    weather: Option<WeatherView>,
    store: LocalStorage,
    source: BrowserWeatherSource,
    locator: BrowserGeolocator,
    lookup: WeatherLookup,
}

impl TopTools {
    /// Find the panel in `document` and bind it. `None` when the page has
    /// no Top Tools button or panel.
    pub fn mount(document: &Document) -> Option<Rc<Self>> {
        let button: HtmlElement = by_id(document, dom::TOGGLE_BUTTON)?;
        let panel: HtmlElement = by_id(document, dom::PANEL)?;

        for id in dom::LEGACY_INPUTS {
            if let Some(legacy) = document.get_element_by_id(id) {
                legacy.remove();
            }
        }

        let tabs: Vec<Element> = select_all(&panel, dom::TAB_SELECTOR);
        let tab_panels: Vec<HtmlElement> = select_all(&panel, dom::TAB_PANEL_SELECTOR);

        let active = tabs
            .iter()
            .find(|tab| tab.class_list().contains(dom::ACTIVE_CLASS))
            .and_then(|tab| tab.get_attribute("data-tab"))
            .map(|name| Tab::from(name.as_str()))
            .unwrap_or_default();
        let mut state = PanelState::new(active);
        if dom::is_visible(&panel) {
            state.toggle();
        }

        let tools = Rc::new(Self {
            button,
            panel,
            tabs,
            tab_panels,
            state: RefCell::new(state),
            estimator: EstimatorView::find(document),
            weather: WeatherView::find(document),
            store: LocalStorage::open(),
            source: BrowserWeatherSource::from_document(document),
            locator: BrowserGeolocator,
            lookup: WeatherLookup::default(),
        });

        tools.bind_panel(document);
        tools.bind_estimator();
        tools.bind_weather();
        Some(tools)
    }

    fn preferences(&self) -> Preferences<'_, LocalStorage> {
        Preferences::new(&self.store)
    }

    fn sync_panel(&self) {
        let state = self.state.borrow();
        set_visible(&self.panel, state.is_open());
        if let Err(e) = self.button.set_attribute("aria-expanded", state.aria_expanded()) {
            dom::warn(&dom::describe_js_error(&e));
        }
    }

    fn bind_panel(self: &Rc<Self>, document: &Document) {
        let this = Rc::clone(self);
        listen(&self.button, "click", move |_| {
            let effect = this.state.borrow_mut().toggle();
            this.sync_panel();
            if effect == Some(PanelEffect::FetchWeather) {
                this.fetch_weather(false);
            }
        });

        let this = Rc::clone(self);
        listen(document, "click", move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside_panel = this.panel.contains(target.as_ref());
            let on_toggle = this.button.contains(target.as_ref());
            if this
                .state
                .borrow_mut()
                .handle_document_click(inside_panel, on_toggle)
            {
                this.sync_panel();
            }
        });

        for tab in &self.tabs {
            let this = Rc::clone(self);
            let name = tab.get_attribute("data-tab").unwrap_or_default();
            listen(tab, "click", move |_| this.select_tab(&name));
        }
    }

    fn select_tab(self: &Rc<Self>, name: &str) {
        let effect = self.state.borrow_mut().select_tab(Tab::from(name));
        self.sync_tabs();
        if effect == Some(PanelEffect::FetchWeather) {
            self.fetch_weather(false);
        }
    }

    fn sync_tabs(&self) {
        let state = self.state.borrow();
        for tab in &self.tabs {
            let name = tab.get_attribute("data-tab").unwrap_or_default();
            set_class(tab, dom::ACTIVE_CLASS, state.is_tab_active(&name));
        }
        for panel in &self.tab_panels {
            set_visible(panel, state.is_panel_visible(&panel.id()));
        }
    }

    // ------------------------------------------------------------------------
    // Estimator
    // ------------------------------------------------------------------------

    fn bind_estimator(self: &Rc<Self>) {
        let Some(view) = &self.estimator else {
            return;
        };

        let mut form = view.read();
        if let Some(saved) = self.preferences().estimator_kind() {
            form.kind = saved;
        }
        form.apply_defaults();
        view.write(&form);

        if let Some(select) = &view.kind {
            let this = Rc::clone(self);
            listen(select, "change", move |_| this.on_kind_changed());
        }
        if let Some(calc) = &view.calc {
            let this = Rc::clone(self);
            listen(calc, "click", move |event: Event| {
                event.prevent_default();
                this.on_calculate();
            });
        }
        if let Some(clear) = &view.clear {
            let this = Rc::clone(self);
            listen(clear, "click", move |event: Event| {
                event.prevent_default();
                this.on_clear();
            });
        }
    }

    fn on_kind_changed(&self) {
        let Some(view) = &self.estimator else {
            return;
        };
        let mut form = view.read();
        let kind = form.kind;
        form.select_kind(kind);
        view.write(&form);
        view.out.set_inner_html("");
        self.preferences().save_estimator_kind(form.kind);
    }

    fn on_calculate(&self) {
        let Some(view) = &self.estimator else {
            return;
        };
        let form = view.read();
        let estimate = form.calculate();
        view.out.set_inner_html(&estimate_html(&estimate));
        self.preferences().save_estimator_kind(form.kind);
    }

    fn on_clear(&self) {
        let Some(view) = &self.estimator else {
            return;
        };
        let mut form = view.read();
        form.clear();
        view.write(&form);
        view.out.set_inner_html("");
    }

    // ------------------------------------------------------------------------
    // Weather
    // ------------------------------------------------------------------------

    fn bind_weather(self: &Rc<Self>) {
        let Some(view) = &self.weather else {
            return;
        };

        if let (Some(input), Some(saved)) = (&view.location, self.preferences().weather_location())
        {
            input.set_value(&saved);
        }

        if let Some(refresh) = &view.refresh {
            let this = Rc::clone(self);
            listen(refresh, "click", move |event: Event| {
                event.prevent_default();
                this.fetch_weather(false);
            });
        }
        if let Some(input) = &view.location {
            let this = Rc::clone(self);
            listen(input, "keydown", move |event: Event| {
                let is_enter = event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|key| key.key() == "Enter")
                    .unwrap_or(false);
                if is_enter {
                    event.prevent_default();
                    this.fetch_weather(false);
                }
            });
        }
        if let Some(use_my_location) = &view.use_my_location {
            let this = Rc::clone(self);
            listen(use_my_location, "click", move |event: Event| {
                event.prevent_default();
                if let Some(input) = this.weather.as_ref().and_then(|v| v.location.as_ref()) {
                    input.set_value("");
                }
                this.fetch_weather(true);
            });
        }
    }

    /// Start a lookup; an older lookup still in flight is superseded
    fn fetch_weather(self: &Rc<Self>, use_my_location: bool) {
        let Some(view) = &self.weather else {
            return;
        };
        view.out.set_inner_html(LOADING_HTML);

        let mut query = WeatherQuery::from_input(&view.location_text());
        query.use_my_location = use_my_location;

        let this = Rc::clone(self);
        spawn_local(async move {
            let Some(resolution) = this
                .lookup
                .run(&this.source, &this.locator, &this.store, &query)
                .await
            else {
                return;
            };
            let Some(view) = &this.weather else {
                return;
            };

            if let Err(e) = &resolution.outcome {
                dom::error(&format!("Weather load failed: {}", e));
            }
            view.out.set_inner_html(&outcome_html(&resolution.outcome));
        });
    }
}

/// Mount on the current document, logging when there is nothing to bind
pub fn mount_current() -> bool {
    let Some(document) = dom::document() else {
        return false;
    };
    match TopTools::mount(&document) {
        Some(_) => true,
        None => {
            dom::warn("Top Tools panel not found on this page");
            false
        }
    }
}
