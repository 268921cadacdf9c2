use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::Secret;
use mlflow_model::{DatabaseData, Inputs, ObjectStorageData};
use std::collections::BTreeMap;

use crate::common;

pub const DB_SECRET: &str = "db-secret";
pub const MINIO_SECRET: &str = "minio-secret";
pub const SELDON_SECRET: &str = "seldon-init-container-s3-credentials";

/// Every Secret rendered for one reconciliation.
///
/// The object-storage derived Secrets are present together or not at all.
#[derive(Clone, Debug, PartialEq)]
pub struct SecretSet {
    pub db: Secret,
    pub minio: Option<Secret>,
    pub seldon: Option<Secret>,
}

impl SecretSet {
    pub fn build(
        inputs: &Inputs,
        db: &DatabaseData,
        object_storage: Option<&ObjectStorageData>,
    ) -> Self {
        Self {
            db: build_db(inputs, db),
            minio: object_storage.map(|os| build_minio(inputs, os)),
            seldon: object_storage.map(|os| build_seldon_credentials(inputs, os)),
        }
    }

    pub fn to_vec(&self) -> Vec<Secret> {
        std::iter::once(&self.db)
            .chain(self.minio.as_ref())
            .chain(self.seldon.as_ref())
            .cloned()
            .collect()
    }
}

/// Backend store credentials for the MLflow server.
pub fn build_db(inputs: &Inputs, db: &DatabaseData) -> Secret {
    opaque(
        inputs,
        DB_SECRET,
        [
            ("DB_ROOT_PASSWORD", db.root_password.clone()),
            ("MLFLOW_TRACKING_URI", db.tracking_uri()),
        ],
    )
}

/// S3 credentials for the artifact store.
pub fn build_minio(inputs: &Inputs, os: &ObjectStorageData) -> Secret {
    opaque(
        inputs,
        MINIO_SECRET,
        [
            ("AWS_ACCESS_KEY_ID", os.access_key.clone()),
            ("AWS_SECRET_ACCESS_KEY", os.secret_key.clone()),
        ],
    )
}

/// rclone configuration used by Seldon's storage initializer to pull models
/// from the artifact store.
pub fn build_seldon_credentials(inputs: &Inputs, os: &ObjectStorageData) -> Secret {
    opaque(
        inputs,
        SELDON_SECRET,
        [
            ("RCLONE_CONFIG_S3_TYPE", "s3".to_string()),
            ("RCLONE_CONFIG_S3_PROVIDER", "minio".to_string()),
            ("RCLONE_CONFIG_S3_ACCESS_KEY_ID", os.access_key.clone()),
            ("RCLONE_CONFIG_S3_SECRET_ACCESS_KEY", os.secret_key.clone()),
            ("RCLONE_CONFIG_S3_ENDPOINT", os.qualified_endpoint()),
            ("RCLONE_CONFIG_S3_ENV_AUTH", "false".to_string()),
        ],
    )
}

fn opaque<const N: usize>(inputs: &Inputs, suffix: &str, data: [(&str, String); N]) -> Secret {
    Secret {
        metadata: common::metadata(inputs, suffix),
        data: Some(
            data.into_iter()
                .map(|(k, v)| (k.to_string(), ByteString(v.into_bytes())))
                .collect::<BTreeMap<_, _>>(),
        ),
        type_: Some("Opaque".into()),
        ..Default::default()
    }
}
