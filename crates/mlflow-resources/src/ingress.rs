use mlflow_model::Inputs;
use serde::{Deserialize, Serialize};

pub const PREFIX: &str = "/mlflow/";

/// Route requested from the ingress provider.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IngressRoute {
    pub prefix: String,
    pub rewrite: String,
    pub service: String,
    pub port: u16,
}

pub fn build(inputs: &Inputs) -> IngressRoute {
    IngressRoute {
        prefix: PREFIX.into(),
        rewrite: "/".into(),
        service: inputs.app_name.clone(),
        port: inputs.config.mlflow_port,
    }
}
