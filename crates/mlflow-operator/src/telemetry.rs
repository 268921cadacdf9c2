use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// JSON logs on stderr; stdout carries the rendered documents.
pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mlflow_operator=info,mlflow_model=info")),
        )
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
