//! Panel visibility and tab state

/// Tabs of the Top Tools panel. Pages may add their own tabs beyond
/// the estimator and weather ones; those are kept by `data-tab` name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Estimator,
    Weather,
    Other(String),
}

impl Tab {
    /// Value of the tab button's `data-tab` attribute
    pub fn as_str(&self) -> &str {
        match self {
            Tab::Estimator => "estimator",
            Tab::Weather => "weather",
            Tab::Other(name) => name,
        }
    }

    /// Element id of the sub-panel for this tab
    pub fn panel_id(&self) -> String {
        panel_id_for(self.as_str())
    }
}

impl From<&str> for Tab {
    fn from(data_tab: &str) -> Self {
        match data_tab {
            "estimator" => Tab::Estimator,
            "weather" => Tab::Weather,
            other => Tab::Other(other.to_string()),
        }
    }
}

/// Sub-panel id for a `data-tab` value: `tt` followed by the capitalized name
pub fn panel_id_for(data_tab: &str) -> String {
    let mut chars = data_tab.chars();
    match chars.next() {
        Some(first) => format!("tt{}{}", first.to_uppercase(), chars.as_str()),
        None => "tt".to_string(),
    }
}

/// Follow-up work requested by a panel transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    FetchWeather,
}

/// Open/closed state and active tab
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PanelState {
    open: bool,
    active: Tab,
}

impl PanelState {
    pub fn new(active: Tab) -> Self {
        Self {
            open: false,
            active,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active(&self) -> &Tab {
        &self.active
    }

    /// Value for the toggle button's `aria-expanded` attribute
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// Flip visibility. Opening onto the weather tab refreshes the weather.
    pub fn toggle(&mut self) -> Option<PanelEffect> {
        self.open = !self.open;
        self.opened_effect()
    }

    /// Close the panel; returns whether it was open
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.open, false)
    }

    /// Document-level click. Clicks inside the panel or on the toggle
    /// button are ignored; anything else closes the panel.
    pub fn handle_document_click(&mut self, inside_panel: bool, on_toggle: bool) -> bool {
        if inside_panel || on_toggle {
            return false;
        }
        self.close()
    }

    /// Make `tab` the single active tab
    pub fn select_tab(&mut self, tab: Tab) -> Option<PanelEffect> {
        let effect = (tab == Tab::Weather).then_some(PanelEffect::FetchWeather);
        self.active = tab;
        effect
    }

    /// Whether the tab button with this `data-tab` value is the active one
    pub fn is_tab_active(&self, data_tab: &str) -> bool {
        self.active.as_str() == data_tab
    }

    /// Whether the sub-panel with `panel_id` should be shown
    pub fn is_panel_visible(&self, panel_id: &str) -> bool {
        self.active.panel_id() == panel_id
    }

    fn opened_effect(&self) -> Option<PanelEffect> {
        (self.open && self.active == Tab::Weather).then_some(PanelEffect::FetchWeather)
    }
}
