//! Writes a small, self-consistent demo bundle into the current directory:
//!
//! ```text
//! X_nuevo_prediccion.csv            rows to predict
//! X_nuevo_prediccion.parquet        same rows, for the Parquet loader
//! models/X_train_balanced.csv       training schema (header only)
//! models/misc/*.json                binary / ordinal / one-hot / scaler artifacts
//! models/trainedModels/*.json       logistic regression + decision tree
//! ```

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Value, json};

const ESCOLARIDAD: [&str; 5] = ["PRIMARIA", "SECUNDARIA", "PREPARATORIA", "LICENCIATURA", "POSGRADO"];
const HORAS: [i64; 5] = [6, 7, 8, 9, 10];
const ESTADO_CIVIL: [&str; 3] = ["CASADO", "SOLTERO", "UNION_LIBRE"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_f64() * (hi - lo + 1) as f64) as i64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_f64() * items.len() as f64) as usize % items.len()]
    }
}

/// One row of raw input.
struct Applicant {
    genero: &'static str,
    posee_auto: &'static str,
    escolaridad: &'static str,
    hora: i64,
    estado_civil: &'static str,
    edad: i64,
    antiguedad_meses: i64,
    ingreso_mensual: i64,
}

impl Applicant {
    fn random(rng: &mut SimpleRng) -> Self {
        let edad = rng.range(18, 62);
        Applicant {
            genero: *rng.pick(&["F", "M"]),
            posee_auto: *rng.pick(&["NO", "SI"]),
            escolaridad: *rng.pick(&ESCOLARIDAD),
            hora: *rng.pick(&HORAS),
            estado_civil: *rng.pick(&ESTADO_CIVIL),
            edad,
            antiguedad_meses: rng.range(0, (edad - 17) * 12),
            ingreso_mensual: rng.range(6, 60) * 1000,
        }
    }

    /// Encoded row, in `schema()` order. `NUM_DEPENDIENTES` is never collected
    /// for new applicants, so it is always zero here.
    fn encode(&self) -> Vec<f64> {
        let position = |xs: &[&str], v: &str| xs.iter().position(|x| *x == v).unwrap_or(0) as f64;
        let mut row = vec![
            (self.genero == "M") as u8 as f64,
            (self.posee_auto == "SI") as u8 as f64,
            position(&ESCOLARIDAD, self.escolaridad),
            HORAS.iter().position(|h| *h == self.hora).unwrap_or(0) as f64,
        ];
        row.extend(ESTADO_CIVIL.iter().map(|c| (*c == self.estado_civil) as u8 as f64));
        row.extend([
            self.edad as f64,
            self.antiguedad_meses as f64,
            self.ingreso_mensual as f64,
            0.0,
        ]);
        row
    }
}

fn schema() -> Vec<String> {
    let mut cols: Vec<String> = ["GENERO", "POSEE_AUTO", "DESC_ESCOLARIDAD_MAX", "HORA_OFICIAL_INICIO_LABORAL"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    cols.extend(ESTADO_CIVIL.iter().map(|c| format!("ESTADO_CIVIL__{c}")));
    cols.extend(
        ["EDAD", "ANTIGUEDAD_MESES", "INGRESO_MENSUAL", "NUM_DEPENDIENTES"]
            .iter()
            .map(|c| format!("remainder__{c}")),
    );
    cols
}

/// Column means and standard deviations; zero deviations become 1.
fn mean_and_scale(rows: &[Vec<f64>]) -> (Vec<f64>, Vec<f64>) {
    let n = rows.len() as f64;
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    let mean: Vec<f64> = (0..width)
        .map(|j| rows.iter().map(|r| r[j]).sum::<f64>() / n)
        .collect();
    let scale = (0..width)
        .map(|j| {
            let var = rows.iter().map(|r| (r[j] - mean[j]).powi(2)).sum::<f64>() / n;
            if var > 0.0 { var.sqrt() } else { 1.0 }
        })
        .collect();
    (mean, scale)
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn write_input_csv(path: &Path, applicants: &[Applicant]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record([
        "GENERO",
        "POSEE_AUTO",
        "DESC_ESCOLARIDAD_MAX",
        "HORA_OFICIAL_INICIO_LABORAL",
        "ESTADO_CIVIL",
        "EDAD",
        "ANTIGUEDAD_MESES",
        "INGRESO_MENSUAL",
    ])?;
    for a in applicants {
        wtr.write_record([
            a.genero.to_string(),
            a.posee_auto.to_string(),
            a.escolaridad.to_string(),
            a.hora.to_string(),
            a.estado_civil.to_string(),
            a.edad.to_string(),
            a.antiguedad_meses.to_string(),
            a.ingreso_mensual.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_input_parquet(path: &Path, applicants: &[Applicant]) -> Result<()> {
    let text = |f: fn(&Applicant) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(applicants.iter().map(f).collect::<Vec<_>>()))
    };
    let int = |f: fn(&Applicant) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(applicants.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("GENERO", DataType::Utf8, false),
        Field::new("POSEE_AUTO", DataType::Utf8, false),
        Field::new("DESC_ESCOLARIDAD_MAX", DataType::Utf8, false),
        Field::new("HORA_OFICIAL_INICIO_LABORAL", DataType::Int64, false),
        Field::new("ESTADO_CIVIL", DataType::Utf8, false),
        Field::new("EDAD", DataType::Int64, false),
        Field::new("ANTIGUEDAD_MESES", DataType::Int64, false),
        Field::new("INGRESO_MENSUAL", DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            text(|a| a.genero),
            text(|a| a.posee_auto),
            text(|a| a.escolaridad),
            int(|a| a.hora),
            text(|a| a.estado_civil),
            int(|a| a.edad),
            int(|a| a.antiguedad_meses),
            int(|a| a.ingreso_mensual),
        ],
    )?;

    let file = std::fs::File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // The "training" sample only feeds the scaler statistics.
    let training: Vec<Vec<f64>> = (0..500).map(|_| Applicant::random(&mut rng).encode()).collect();
    let applicants: Vec<Applicant> = (0..40).map(|_| Applicant::random(&mut rng)).collect();

    let schema = schema();
    let (mean, scale) = mean_and_scale(&training);

    write_input_csv(Path::new("X_nuevo_prediccion.csv"), &applicants)?;
    write_input_parquet(Path::new("X_nuevo_prediccion.parquet"), &applicants)?;

    std::fs::create_dir_all("models")?;
    std::fs::write("models/X_train_balanced.csv", format!("{}\n", schema.join(",")))?;

    write_json(
        Path::new("models/misc/binary_encoder.json"),
        &json!({"columns": [
            {"column": "GENERO", "mapping": [["F", 0], ["M", 1]]},
            {"column": "POSEE_AUTO", "mapping": [["NO", 0], ["SI", 1]]}
        ]}),
    )?;
    write_json(
        Path::new("models/misc/ordinal_encoder.json"),
        &json!({
            "feature_names_in": ["DESC_ESCOLARIDAD_MAX", "HORA_OFICIAL_INICIO_LABORAL"],
            "categories": [ESCOLARIDAD, HORAS],
            "handle_unknown": "use_encoded_value",
            "unknown_value": -1
        }),
    )?;
    write_json(
        Path::new("models/misc/onehot_encoder.json"),
        &json!({
            "feature_names_in": ["ESTADO_CIVIL"],
            "categories": [ESTADO_CIVIL],
            "handle_unknown": "ignore"
        }),
    )?;
    write_json(
        Path::new("models/misc/scaler_trained.json"),
        &json!({"kind": "standard", "feature_names_in": schema, "mean": mean, "scale": scale}),
    )?;

    // Hand-picked weights on standardized features: longer tenure and higher
    // income lower the risk, a late shift start raises it.
    let mut coef = vec![0.0; schema.len()];
    coef[3] = 0.6;
    coef[7] = -0.3;
    coef[8] = -1.1;
    coef[9] = -0.8;
    write_json(
        Path::new("models/trainedModels/logistic_regression.json"),
        &json!({
            "kind": "logistic_regression",
            "classes": [0, 1],
            "coef": [coef],
            "intercept": [-0.2],
            "feature_names_in": schema
        }),
    )?;
    // Depth-2 tree: tenure first, then income.
    write_json(
        Path::new("models/trainedModels/decision_tree.json"),
        &json!({
            "kind": "decision_tree_classifier",
            "n_features": schema.len(),
            "children_left": [1, 3, -1, -1, -1],
            "children_right": [2, 4, -1, -1, -1],
            "feature": [8, 9, -2, -2, -2],
            "threshold": [-0.5, 0.0, -2.0, -2.0, -2.0],
            "value": [[250.0, 250.0], [60.0, 110.0], [190.0, 140.0], [10.0, 70.0], [50.0, 40.0]],
            "classes": [0, 1],
            "feature_names_in": schema
        }),
    )?;

    println!(
        "Wrote {} rows to predict, {} schema columns, 4 encoders and 2 models",
        applicants.len(),
        schema.len()
    );
    Ok(())
}
