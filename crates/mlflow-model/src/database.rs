use serde::{Deserialize, Serialize};

use crate::relation::DataBag;

/// Credentials published by a mysql unit on the `db` relation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DatabaseData {
    pub database: String,
    pub host: String,
    pub root_password: String,
    pub port: String,
}

impl DatabaseData {
    /// Read a unit bag. Returns `None` while any field is missing or empty.
    pub fn from_bag(bag: &DataBag) -> Option<Self> {
        let field = |key: &str| bag.get(key).filter(|v| !v.is_empty()).cloned();
        Some(Self {
            database: field("database")?,
            host: field("host")?,
            root_password: field("root_password")?,
            port: field("port")?,
        })
    }

    /// SQLAlchemy URI for the MLflow backend store.
    pub fn tracking_uri(&self) -> String {
        format!(
            "mysql+pymysql://root:{}@{}:{}/{}",
            self.root_password, self.host, self.port, self.database
        )
    }
}
