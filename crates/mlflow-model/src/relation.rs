use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::Error;
use crate::version::{SUPPORTED_VERSIONS, negotiate};

/// What the remote side wrote under `_supported_versions`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteVersions {
    /// Nothing written yet.
    Absent,
    Advertised(Vec<String>),
    /// Written, but not a list of version strings.
    Unusable,
}

/// A relation data bag: string keys to string values.
pub type DataBag = BTreeMap<String, String>;

pub const SUPPORTED_VERSIONS_KEY: &str = "_supported_versions";
pub const DATA_KEY: &str = "data";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationUnit {
    /// Unit name, e.g. `mysql/0`.
    pub name: String,
    #[serde(default)]
    pub data: DataBag,
}

/// Snapshot of one relation as seen from this application.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub id: u32,
    pub remote_app: String,
    /// Application bag written by the remote application.
    #[serde(default)]
    pub app_data: DataBag,
    /// Remote units in the order they joined.
    #[serde(default)]
    pub units: Vec<RelationUnit>,
}

impl Relation {
    pub fn new(id: u32, remote_app: impl Into<String>) -> Self {
        Self {
            id,
            remote_app: remote_app.into(),
            ..Default::default()
        }
    }

    pub fn with_app_data(mut self, data: DataBag) -> Self {
        self.app_data = data;
        self
    }

    pub fn with_unit(mut self, name: impl Into<String>, data: DataBag) -> Self {
        self.units.push(RelationUnit {
            name: name.into(),
            data,
        });
        self
    }

    /// Versions advertised by the remote application.
    ///
    /// A value that does not parse as YAML at all is an error. A parseable
    /// value that is not a list of strings is [`RemoteVersions::Unusable`].
    pub fn remote_versions(&self) -> Result<RemoteVersions, Error> {
        let Some(value) = self.parse_app_field(SUPPORTED_VERSIONS_KEY)? else {
            return Ok(RemoteVersions::Absent);
        };
        match serde_yaml::from_value::<Vec<String>>(value) {
            Ok(versions) => Ok(RemoteVersions::Advertised(versions)),
            Err(e) => {
                debug!(
                    relation = self.id,
                    remote_app = %self.remote_app,
                    error = %e,
                    "supported versions are not a list of strings"
                );
                Ok(RemoteVersions::Unusable)
            }
        }
    }

    /// The version both sides agree on, if any.
    pub fn negotiated_version(&self) -> Result<Option<&'static str>, Error> {
        Ok(match self.remote_versions()? {
            RemoteVersions::Advertised(remote) => negotiate(SUPPORTED_VERSIONS, &remote),
            RemoteVersions::Absent | RemoteVersions::Unusable => None,
        })
    }

    /// Decode the `data` field of a versioned envelope.
    ///
    /// Missing fields or values of the wrong type yield `Ok(None)` so the
    /// caller can wait for the remote side to finish writing.
    pub fn envelope_data<T: DeserializeOwned>(&self) -> Result<Option<T>, Error> {
        let Some(value) = self.parse_app_field(DATA_KEY)? else {
            return Ok(None);
        };
        match serde_yaml::from_value(value) {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                debug!(relation = self.id, remote_app = %self.remote_app, error = %e, "relation data incomplete");
                Ok(None)
            }
        }
    }

    /// The first remote unit, in join order, whose bag `extract` accepts.
    pub fn first_complete_unit<T>(&self, extract: impl Fn(&DataBag) -> Option<T>) -> Option<T> {
        self.units.iter().find_map(|u| extract(&u.data))
    }

    fn parse_app_field(&self, key: &'static str) -> Result<Option<serde_yaml::Value>, Error> {
        let Some(raw) = self.app_data.get(key) else {
            return Ok(None);
        };
        serde_yaml::from_str(raw)
            .map(Some)
            .map_err(|source| Error::MalformedRelation {
                relation: self.id,
                remote_app: self.remote_app.clone(),
                key,
                source,
            })
    }
}
