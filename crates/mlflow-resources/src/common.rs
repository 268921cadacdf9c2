use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use mlflow_model::{DATA_KEY, DataBag, Inputs, SUPPORTED_VERSIONS_KEY, advertised_versions};
use serde::Serialize;
use std::collections::BTreeMap;

pub const MANAGER: &str = "mlflow-operator";

pub fn labels(inputs: &Inputs) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("app.kubernetes.io/name".into(), inputs.app_name.clone()),
        ("app.kubernetes.io/instance".into(), inputs.app_name.clone()),
        ("app.kubernetes.io/managed-by".into(), MANAGER.into()),
    ])
}

pub fn selector_labels(inputs: &Inputs) -> BTreeMap<String, String> {
    BTreeMap::from([("app.kubernetes.io/name".into(), inputs.app_name.clone())])
}

pub fn child_name(inputs: &Inputs, suffix: &str) -> String {
    if suffix.is_empty() {
        inputs.app_name.clone()
    } else {
        format!("{}-{suffix}", inputs.app_name)
    }
}

pub fn metadata(inputs: &Inputs, suffix: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(child_name(inputs, suffix)),
        namespace: Some(inputs.model_name.clone()),
        labels: Some(labels(inputs)),
        ..Default::default()
    }
}

/// Cluster DNS name of the application's service.
pub fn service_host(inputs: &Inputs) -> String {
    format!("{}.{}.svc.cluster.local", inputs.app_name, inputs.model_name)
}

/// URL clients use to reach the tracking server.
pub fn tracking_server_url(inputs: &Inputs) -> String {
    format!("http://{}:{}", service_host(inputs), inputs.config.mlflow_port)
}

/// App bag for our side of a versioned relation: the versions we speak plus
/// an optional YAML-encoded payload.
pub fn envelope<T: Serialize>(data: Option<&T>) -> Result<DataBag, serde_yaml::Error> {
    let mut bag = DataBag::from([(SUPPORTED_VERSIONS_KEY.to_string(), advertised_versions())]);
    if let Some(data) = data {
        bag.insert(DATA_KEY.to_string(), serde_yaml::to_string(data)?);
    }
    Ok(bag)
}
