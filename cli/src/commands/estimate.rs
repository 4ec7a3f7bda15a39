//! `farm-tools estimate`

use clap::Args;
use shared::{EstimateKind, EstimatorForm, PreferenceStore, Preferences};

#[derive(Debug, Clone, Default, Args)]
pub struct EstimateArgs {
    /// seed, fertilizer, labor, irrigation or other (default: last used)
    #[arg(long)]
    pub kind: Option<EstimateKind>,

    /// Area in hectares
    #[arg(long)]
    pub area: Option<String>,

    /// Rate per hectare (default depends on the kind)
    #[arg(long)]
    pub rate: Option<String>,

    /// Unit price in ₹; omit to skip the cost
    #[arg(long)]
    pub price: Option<String>,
}

impl EstimateArgs {
    fn form(&self, saved: Option<EstimateKind>) -> EstimatorForm {
        let mut form = EstimatorForm::new(self.kind.or(saved).unwrap_or_default());
        if let Some(area) = &self.area {
            form.area = area.clone();
        }
        if let Some(rate) = &self.rate {
            form.rate = rate.clone();
        }
        if let Some(price) = &self.price {
            form.price = price.clone();
        }
        form
    }
}

pub fn run<S: PreferenceStore + ?Sized>(args: &EstimateArgs, store: &S) -> String {
    let prefs = Preferences::new(store);
    let mut form = args.form(prefs.estimator_kind());
    if form.apply_defaults() {
        tracing::debug!("Using default {} rate {}", form.kind, form.rate);
    }

    let labels = form.labels();
    let estimate = form.calculate();
    prefs.save_estimator_kind(form.kind);

    format!("{}: {}\n{}", labels.rate_label, form.rate, estimate)
}
