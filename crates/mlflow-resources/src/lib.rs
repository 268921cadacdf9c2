pub mod common;
pub mod ingress;
pub mod pod_defaults;
pub mod pod_spec;
pub mod secret;
pub mod service;
