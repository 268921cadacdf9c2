use mlflow_model::{DataBag, Inputs, ObjectStorageData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common;

/// App bag key holding the JSON document read by the admission webhook.
pub const POD_DEFAULTS_KEY: &str = "pod-defaults";
/// Unit bag key holding the JSON list of pip requirements.
pub const REQUIREMENTS_KEY: &str = "requirements";

/// Document consumed by the pod-defaults admission webhook.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PodDefaultsPayload {
    pub minio: PodDefault,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PodDefault {
    pub env: BTreeMap<String, String>,
}

pub fn build(inputs: &Inputs, os: &ObjectStorageData) -> PodDefaultsPayload {
    let env = BTreeMap::from([
        ("AWS_ACCESS_KEY_ID".to_string(), os.access_key.clone()),
        ("AWS_SECRET_ACCESS_KEY".to_string(), os.secret_key.clone()),
        ("MLFLOW_S3_ENDPOINT_URL".to_string(), os.endpoint()),
        (
            "MLFLOW_TRACKING_URI".to_string(),
            common::tracking_server_url(inputs),
        ),
    ]);
    PodDefaultsPayload {
        minio: PodDefault { env },
    }
}

/// Bag published under the application key.
pub fn app_bag(inputs: &Inputs, os: &ObjectStorageData) -> Result<DataBag, serde_json::Error> {
    let payload = serde_json::to_string(&build(inputs, os))?;
    Ok(DataBag::from([(POD_DEFAULTS_KEY.to_string(), payload)]))
}

/// Bag published under this unit's key.
pub fn unit_bag(inputs: &Inputs) -> Result<DataBag, serde_json::Error> {
    let requirements = serde_json::to_string(&inputs.config.requirements)?;
    Ok(DataBag::from([(REQUIREMENTS_KEY.to_string(), requirements)]))
}
