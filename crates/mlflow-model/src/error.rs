use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The remote application wrote a value that is not parseable YAML.
    /// Missing or wrong-typed fields are not errors; they leave the relation
    /// not ready instead.
    #[error("relation {relation} ({remote_app}): `{key}` is not valid YAML: {source}")]
    MalformedRelation {
        relation: u32,
        remote_app: String,
        key: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
}
