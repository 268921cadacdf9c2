use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::Secret;
use mlflow_model::{
    DataBag, DatabaseData, Inputs, ObjectStorageData, Relation, RemoteVersions, UnitStatus,
    status_messages,
};
use mlflow_resources::pod_spec::{self, PodSpecDocument};
use mlflow_resources::secret::SecretSet;
use mlflow_resources::{common, ingress, pod_defaults};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Relation(#[from] mlflow_model::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

/// Bags published on one relation, keyed by owner (application or unit name).
pub type PublishedData = BTreeMap<String, DataBag>;

/// Everything the runtime should apply after a reconciliation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesiredState {
    pub status: UnitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_spec: Option<PodSpecDocument>,
    /// Relation id -> published bags.
    #[serde(default)]
    pub relation_data: BTreeMap<u32, PublishedData>,
}

impl DesiredState {
    fn halted(status: UnitStatus) -> Self {
        info!(%status, "reconciliation halted");
        Self {
            status,
            pod_spec: None,
            relation_data: BTreeMap::new(),
        }
    }

    pub fn secrets(&self) -> &[Secret] {
        self.pod_spec
            .as_ref()
            .map(|p| p.kubernetes_resources.secrets.as_slice())
            .unwrap_or_default()
    }

    pub fn secret(&self, name: &str) -> Option<&Secret> {
        self.pod_spec.as_ref().and_then(|p| p.secret(name))
    }

    /// Bags published on relation `id` under `owner`.
    pub fn published(&self, id: u32, owner: &str) -> Option<&DataBag> {
        self.relation_data.get(&id).and_then(|r| r.get(owner))
    }
}

/// Compute the desired state from a snapshot of inputs.
///
/// Guards short-circuit in order: leadership, image, a single `db`
/// relation with a complete unit. Optional relations only feed outputs once
/// they negotiate a supported version.
/// The only errors are relation values that are not parseable YAML.
pub fn reconcile(inputs: &Inputs) -> Result<DesiredState, Error> {
    if !inputs.leader {
        return Ok(DesiredState::halted(UnitStatus::waiting(
            status_messages::WAITING_FOR_LEADERSHIP,
        )));
    }

    let Some(image) = inputs.image.as_ref().filter(|i| i.is_complete()) else {
        return Ok(DesiredState::halted(UnitStatus::blocked(
            status_messages::MISSING_IMAGE,
        )));
    };

    let db = match inputs.relations.db.as_slice() {
        [] => None,
        [rel] => rel.first_complete_unit(DatabaseData::from_bag),
        _ => {
            return Ok(DesiredState::halted(UnitStatus::blocked(
                status_messages::TOO_MANY_MYSQL_RELATIONS,
            )));
        }
    };
    let Some(db) = db else {
        return Ok(DesiredState::halted(UnitStatus::waiting(
            status_messages::WAITING_FOR_MYSQL,
        )));
    };

    let object_storage = object_storage_data(&inputs.relations.object_storage)?;

    let secrets = SecretSet::build(inputs, &db, object_storage.as_ref());
    let pod_spec = pod_spec::build(inputs, image, &secrets, object_storage.as_ref());

    let mut relation_data = BTreeMap::new();
    let app = inputs.app_name.clone();

    for rel in &inputs.relations.object_storage {
        let bag = common::envelope::<()>(None).map_err(Error::Yaml)?;
        relation_data.insert(rel.id, PublishedData::from([(app.clone(), bag)]));
    }

    for rel in &inputs.relations.ingress {
        let route = ingress::build(inputs);
        let data = negotiated(rel)?.then_some(&route);
        let bag = common::envelope(data).map_err(Error::Yaml)?;
        relation_data.insert(rel.id, PublishedData::from([(app.clone(), bag)]));
    }

    if let Some(ref os) = object_storage {
        for rel in &inputs.relations.pod_defaults {
            if !pod_defaults_ready(rel)? {
                continue;
            }
            let app_bag = pod_defaults::app_bag(inputs, os).map_err(Error::Serialization)?;
            let unit_bag = pod_defaults::unit_bag(inputs).map_err(Error::Serialization)?;
            relation_data.insert(
                rel.id,
                PublishedData::from([(app.clone(), app_bag), (inputs.unit_name(), unit_bag)]),
            );
        }
    } else if !inputs.relations.pod_defaults.is_empty() {
        debug!("skipping pod-defaults until object storage is available");
    }

    info!(
        object_storage = object_storage.is_some(),
        relations = relation_data.len(),
        "reconciled to active"
    );

    Ok(DesiredState {
        status: UnitStatus::Active,
        pod_spec: Some(pod_spec),
        relation_data,
    })
}

/// Data from the first object-storage relation that negotiated a version
/// and carries a complete payload.
fn object_storage_data(relations: &[Relation]) -> Result<Option<ObjectStorageData>, Error> {
    for rel in relations {
        if !negotiated(rel)? {
            continue;
        }
        if let Some(data) = rel.envelope_data::<ObjectStorageData>()? {
            return Ok(Some(data));
        }
        debug!(relation = rel.id, remote_app = %rel.remote_app, "object storage data not ready");
    }
    Ok(None)
}

fn negotiated(rel: &Relation) -> Result<bool, Error> {
    let version = rel.negotiated_version()?;
    if version.is_none() {
        debug!(relation = rel.id, remote_app = %rel.remote_app, "no shared relation version");
    }
    Ok(version.is_some())
}

/// Subscribers that advertise versions must speak one of ours and silent
/// ones are accepted. Anything else written under `_supported_versions` is
/// refused. Either way there must be a unit to consume the payload.
fn pod_defaults_ready(rel: &Relation) -> Result<bool, Error> {
    if rel.units.is_empty() {
        debug!(relation = rel.id, "pod-defaults relation has no subscriber units");
        return Ok(false);
    }
    match rel.remote_versions()? {
        RemoteVersions::Absent => Ok(true),
        RemoteVersions::Advertised(_) => negotiated(rel),
        RemoteVersions::Unusable => {
            debug!(relation = rel.id, "pod-defaults subscriber advertised unusable versions");
            Ok(false)
        }
    }
}
