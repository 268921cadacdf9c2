use k8s_openapi::api::core::v1::{Service, ServicePort, ServiceSpec};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use mlflow_model::Inputs;

use crate::common;

pub const EXTERNAL_SERVICE: &str = "mlflow-external";

/// NodePort service exposing the tracking server outside the cluster.
/// Returns `None` when the node port is disabled in config.
pub fn build_external(inputs: &Inputs) -> Option<Service> {
    let config = &inputs.config;
    if !config.enable_mlflow_nodeport {
        return None;
    }

    let mut metadata = common::metadata(inputs, "");
    metadata.name = Some(EXTERNAL_SERVICE.into());

    Some(Service {
        metadata,
        spec: Some(ServiceSpec {
            type_: Some("NodePort".into()),
            selector: Some(common::selector_labels(inputs)),
            ports: Some(vec![ServicePort {
                name: Some("http".into()),
                protocol: Some("TCP".into()),
                port: i32::from(config.mlflow_port),
                target_port: Some(IntOrString::Int(i32::from(config.mlflow_port))),
                node_port: Some(i32::from(config.mlflow_nodeport)),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    })
}
