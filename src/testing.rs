//! Shared fixtures: a small, internally consistent artifact bundle on disk.

use std::path::Path;

use serde_json::{Value, json};

use crate::config::AppConfig;
use crate::data::model::{CellValue, Dataset};

pub const SAMPLE_CSV: &str = "\
GENERO,POSEE_AUTO,DESC_ESCOLARIDAD_MAX,HORA_OFICIAL_INICIO_LABORAL,EDAD
M,Y,HIGH,8,30
F,N,LOW,9,45
";

/// `SAMPLE_CSV` as the loader reads it.
pub fn sample_dataset() -> Dataset {
    let s = |v: &str| CellValue::String(v.to_string());
    Dataset::new(
        [
            "GENERO",
            "POSEE_AUTO",
            "DESC_ESCOLARIDAD_MAX",
            "HORA_OFICIAL_INICIO_LABORAL",
            "EDAD",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
        vec![
            vec![s("M"), s("Y"), s("HIGH"), CellValue::Integer(8), CellValue::Integer(30)],
            vec![s("F"), s("N"), s("LOW"), CellValue::Integer(9), CellValue::Integer(45)],
        ],
    )
}

/// Training schema of the bundle. `remainder__ANTIGUEDAD` never appears in
/// the sample input, so it is always zero-filled.
pub fn schema_columns() -> Vec<String> {
    [
        "remainder__EDAD",
        "GENERO",
        "POSEE_AUTO",
        "DESC_ESCOLARIDAD_MAX",
        "HORA_OFICIAL_INICIO_LABORAL",
        "HORA_OFICIAL_INICIO_LABORAL__8",
        "HORA_OFICIAL_INICIO_LABORAL__9",
        "HORA_OFICIAL_INICIO_LABORAL__10",
        "remainder__ANTIGUEDAD",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn write_json(path: &Path, value: &Value) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Write input, schema, encoders and three models under `dir`; return the
/// default config rooted there.
pub fn write_bundle(dir: &Path) -> AppConfig {
    let config = AppConfig::default().rooted_at(dir);
    let schema = schema_columns();
    let n = schema.len();

    std::fs::write(&config.default_input, SAMPLE_CSV).unwrap();
    std::fs::create_dir_all(config.prepare.training_schema.parent().unwrap()).unwrap();
    std::fs::write(&config.prepare.training_schema, format!("{}\n", schema.join(","))).unwrap();

    let enc = &config.prepare.encoders;
    write_json(
        &enc.binary,
        &json!({"columns": [
            {"column": "GENERO", "mapping": [["F", 0], ["M", 1]]},
            {"column": "POSEE_AUTO", "mapping": [["N", 0], ["Y", 1]]}
        ]}),
    );
    write_json(
        &enc.ordinal,
        &json!({
            "feature_names_in": ["DESC_ESCOLARIDAD_MAX", "HORA_OFICIAL_INICIO_LABORAL"],
            "categories": [["LOW", "HIGH"], [8, 9, 10]]
        }),
    );
    // Older artifact layout: input names under `feature_names`.
    write_json(
        &enc.onehot,
        &json!({
            "feature_names": ["HORA_OFICIAL_INICIO_LABORAL"],
            "categories": [[8, 9, 10]]
        }),
    );
    let mut mean = vec![0.0; n];
    let mut scale = vec![1.0; n];
    mean[0] = 37.5;
    scale[0] = 7.5;
    write_json(
        &enc.scaler,
        &json!({"kind": "standard", "feature_names_in": schema, "mean": mean, "scale": scale}),
    );

    let models = &config.catalog.model_dirs[0];
    let mut coef = vec![0.0; n];
    coef[0] = 4.0;
    write_json(
        &models.join("logit_balanced.json"),
        &json!({
            "kind": "logistic_regression",
            "classes": [0, 1],
            "coef": [coef],
            "intercept": [0.0],
            "feature_names_in": schema
        }),
    );
    write_json(
        &models.join("linear_score.json"),
        &json!({"kind": "linear_regression", "coef": vec![0.5; n], "intercept": 0.5}),
    );
    write_json(
        &models.join("tree_depth1.json"),
        &json!({
            "kind": "decision_tree_classifier",
            "n_features": n,
            "children_left": [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature": [1, -2, -2],
            "threshold": [0.5, -2.0, -2.0],
            "value": [[1.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
            "classes": ["F", "M"]
        }),
    );

    config
}
