use mlflow_model::Inputs;
use tracing::{info, warn};

pub const APP_NAME_ENV: &str = "MLFLOW_APP_NAME";
pub const MODEL_NAME_ENV: &str = "MLFLOW_MODEL_NAME";
pub const UNIT_NAME_ENV: &str = "MLFLOW_UNIT_NAME";

/// Deployment identity supplied by the runtime environment. Values set here
/// override whatever the inputs snapshot carries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Context {
    pub app_name: Option<String>,
    pub model_name: Option<String>,
    pub unit_ordinal: Option<u32>,
    /// App part of `MLFLOW_UNIT_NAME`, kept to cross-check the app name.
    pub unit_app: Option<String>,
}

impl Context {
    pub fn from_env() -> Self {
        let app_name = non_empty_var(APP_NAME_ENV);
        let model_name = non_empty_var(MODEL_NAME_ENV);
        let unit = non_empty_var(UNIT_NAME_ENV).and_then(|unit| {
            let parsed = parse_unit_name(&unit);
            if parsed.is_none() {
                warn!(%unit, "ignoring unit name without a numeric ordinal");
            }
            parsed.map(|(app, ordinal)| (app.to_string(), ordinal))
        });
        let (unit_app, unit_ordinal) = match unit {
            Some((app, ordinal)) => (Some(app), Some(ordinal)),
            None => (None, None),
        };

        Self {
            app_name,
            model_name,
            unit_ordinal,
            unit_app,
        }
    }

    pub fn apply(&self, inputs: &mut Inputs) {
        if let Some(ref app) = self.app_name {
            info!(%app, "app name override from env");
            inputs.app_name = app.clone();
        }
        if let Some(ref model) = self.model_name {
            info!(%model, "model name override from env");
            inputs.model_name = model.clone();
        }
        if let Some(ordinal) = self.unit_ordinal {
            info!(%ordinal, "unit ordinal override from env");
            inputs.unit_ordinal = ordinal;
        }
        if let Some(unit_app) = self.unit_app_mismatch(&inputs.app_name) {
            warn!(
                %unit_app,
                app = %inputs.app_name,
                "unit name belongs to a different app than the one in effect"
            );
        }
    }

    /// App part of the unit name when it disagrees with `app_name`.
    pub fn unit_app_mismatch(&self, app_name: &str) -> Option<&str> {
        self.unit_app.as_deref().filter(|unit_app| *unit_app != app_name)
    }
}

/// `mlflow-server/3` -> `("mlflow-server", 3)`.
pub fn parse_unit_name(unit: &str) -> Option<(&str, u32)> {
    let (app, ordinal) = unit.rsplit_once('/')?;
    if app.is_empty() {
        return None;
    }
    Some((app, ordinal.parse().ok()?))
}

/// `mlflow-server/3` -> `3`.
pub fn parse_unit_ordinal(unit: &str) -> Option<u32> {
    parse_unit_name(unit).map(|(_, ordinal)| ordinal)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
