use mlflow_model::Inputs;
use mlflow_operator::context::{
    APP_NAME_ENV, Context, MODEL_NAME_ENV, UNIT_NAME_ENV, parse_unit_name, parse_unit_ordinal,
};

#[test]
fn parse_unit_ordinal_reads_suffix() {
    assert_eq!(parse_unit_ordinal("mlflow-server/0"), Some(0));
    assert_eq!(parse_unit_ordinal("mlflow-server/12"), Some(12));
    assert_eq!(parse_unit_ordinal("mlflow-server"), None);
    assert_eq!(parse_unit_ordinal("mlflow-server/leader"), None);
    assert_eq!(parse_unit_ordinal("/3"), None);
}

#[test]
fn parse_unit_name_splits_app_and_ordinal() {
    assert_eq!(parse_unit_name("mlflow-server/4"), Some(("mlflow-server", 4)));
    assert_eq!(parse_unit_name("a/b/7"), Some(("a/b", 7)));
    assert_eq!(parse_unit_name("mlflow-server"), None);
}

#[test]
fn context_from_env_reads_identity() {
    temp_env::with_vars(
        [
            (APP_NAME_ENV, Some("tracking")),
            (MODEL_NAME_ENV, Some("ml")),
            (UNIT_NAME_ENV, Some("tracking/2")),
        ],
        || {
            let ctx = Context::from_env();
            assert_eq!(ctx.app_name.as_deref(), Some("tracking"));
            assert_eq!(ctx.model_name.as_deref(), Some("ml"));
            assert_eq!(ctx.unit_ordinal, Some(2));
            assert_eq!(ctx.unit_app.as_deref(), Some("tracking"));
        },
    );
}

#[test]
fn context_from_env_ignores_empty_and_invalid_values() {
    temp_env::with_vars(
        [
            (APP_NAME_ENV, Some("")),
            (MODEL_NAME_ENV, None),
            (UNIT_NAME_ENV, Some("no-ordinal")),
        ],
        || {
            assert_eq!(Context::from_env(), Context::default());
        },
    );
}

#[test]
fn context_apply_overrides_snapshot_identity() {
    let mut inputs = Inputs::default();
    let ctx = Context {
        app_name: Some("tracking".into()),
        model_name: None,
        unit_ordinal: Some(3),
        unit_app: Some("tracking".into()),
    };
    ctx.apply(&mut inputs);

    assert_eq!(inputs.app_name, "tracking");
    assert_eq!(inputs.model_name, "kubeflow");
    assert_eq!(inputs.unit_name(), "tracking/3");
    assert_eq!(ctx.unit_app_mismatch(&inputs.app_name), None);
}

#[test]
fn unit_app_mismatch_flags_a_foreign_unit_name() {
    temp_env::with_vars(
        [
            (APP_NAME_ENV, Some("tracking")),
            (MODEL_NAME_ENV, None),
            (UNIT_NAME_ENV, Some("other-app/1")),
        ],
        || {
            let ctx = Context::from_env();
            let mut inputs = Inputs::default();
            ctx.apply(&mut inputs);

            // The ordinal is still taken; the app name in effect wins.
            assert_eq!(inputs.unit_name(), "tracking/1");
            assert_eq!(ctx.unit_app_mismatch(&inputs.app_name), Some("other-app"));
        },
    );
}

#[test]
fn empty_context_leaves_snapshot_untouched() {
    let mut inputs = Inputs::default();
    Context::default().apply(&mut inputs);
    assert_eq!(inputs, Inputs::default());
}
