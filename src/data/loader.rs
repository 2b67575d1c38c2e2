use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use thiserror::Error;

use super::model::{Customer, CustomerDataset};

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

pub const COL_CLV: &str = "Customer Lifetime Value";
pub const COL_PROVINCE: &str = "Province or State";
pub const COL_EDUCATION: &str = "Education";
pub const COL_LOYALTY: &str = "LoyaltyStatus";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_AVG_DIST: &str = "Avg_Flight_Dist_KM";
pub const COL_TOTAL_FLIGHTS: &str = "Total_Flights";
/// Optional column; presence is a dataset-level property.
pub const COL_PRR: &str = "PRR";

/// Structural problems with the input table. Fatal at load time.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("dataset contains no rows")]
    NoRows,
    #[error("row {row}: PRR value present in some rows but missing here")]
    InconsistentPrr { row: usize },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a customer dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the schema columns (the usual export)
/// * `.json` – records-oriented array, same keys as the CSV headers
pub fn load_file(path: &Path) -> Result<CustomerDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<CustomerDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    parse_csv(file)
}

/// Parse CSV from any reader (split from `load_csv` so tests can feed
/// in-memory data).
pub fn parse_csv<R: Read>(input: R) -> Result<CustomerDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &'static str| -> Result<usize, SchemaError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(SchemaError::MissingColumn(name))
    };

    let clv_idx = col(COL_CLV)?;
    let province_idx = col(COL_PROVINCE)?;
    let education_idx = col(COL_EDUCATION)?;
    let loyalty_idx = col(COL_LOYALTY)?;
    let lat_idx = col(COL_LATITUDE)?;
    let lon_idx = col(COL_LONGITUDE)?;
    let dist_idx = col(COL_AVG_DIST)?;
    let flights_idx = col(COL_TOTAL_FLIGHTS)?;
    // Optional: decided once from the header, not per row.
    let prr_idx = headers.iter().position(|h| h == COL_PRR);

    let mut customers = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let prr = match prr_idx {
            Some(idx) => Some(
                parse_f64(cell(idx), row_no, COL_PRR)
                    .map_err(|_| SchemaError::InconsistentPrr { row: row_no })?,
            ),
            None => None,
        };

        customers.push(Customer {
            clv: parse_f64(cell(clv_idx), row_no, COL_CLV)?,
            province: cell(province_idx).to_string(),
            education: cell(education_idx).to_string(),
            loyalty_status: cell(loyalty_idx).to_string(),
            latitude: parse_f64(cell(lat_idx), row_no, COL_LATITUDE)?,
            longitude: parse_f64(cell(lon_idx), row_no, COL_LONGITUDE)?,
            avg_flight_dist_km: parse_f64(cell(dist_idx), row_no, COL_AVG_DIST)?,
            total_flights: parse_u64(cell(flights_idx), row_no, COL_TOTAL_FLIGHTS)?,
            prr,
        });
    }

    if customers.is_empty() {
        bail!(SchemaError::NoRows);
    }

    Ok(CustomerDataset::from_customers(customers, prr_idx.is_some()))
}

fn parse_f64(s: &str, row: usize, col: &str) -> Result<f64> {
    s.parse::<f64>()
        .with_context(|| format!("Row {row}, '{col}': '{s}' is not a number"))
}

fn parse_u64(s: &str, row: usize, col: &str) -> Result<u64> {
    s.parse::<u64>()
        .with_context(|| format!("Row {row}, '{col}': '{s}' is not a count"))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One record of the records-oriented JSON export
/// (`df.to_json(orient='records')`), keyed exactly like the CSV headers.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(rename = "Customer Lifetime Value")]
    clv: f64,
    #[serde(rename = "Province or State")]
    province: String,
    #[serde(rename = "Education")]
    education: String,
    #[serde(rename = "LoyaltyStatus")]
    loyalty_status: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Avg_Flight_Dist_KM")]
    avg_flight_dist_km: f64,
    #[serde(rename = "Total_Flights")]
    total_flights: u64,
    #[serde(rename = "PRR")]
    prr: Option<f64>,
}

fn load_json(path: &Path) -> Result<CustomerDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Parse the records-oriented JSON export. PRR presence is taken from the
/// first record; a mix of present and absent PRR values is malformed.
pub fn parse_json(text: &str) -> Result<CustomerDataset> {
    let records: Vec<JsonRecord> = serde_json::from_str(text).context("parsing JSON")?;

    let has_prr = match records.first() {
        Some(first) => first.prr.is_some(),
        None => bail!(SchemaError::NoRows),
    };

    let mut customers = Vec::with_capacity(records.len());
    for (row, rec) in records.into_iter().enumerate() {
        if rec.prr.is_some() != has_prr {
            bail!(SchemaError::InconsistentPrr { row });
        }
        customers.push(Customer {
            clv: rec.clv,
            province: rec.province,
            education: rec.education,
            loyalty_status: rec.loyalty_status,
            latitude: rec.latitude,
            longitude: rec.longitude,
            avg_flight_dist_km: rec.avg_flight_dist_km,
            total_flights: rec.total_flights,
            prr: rec.prr,
        });
    }

    Ok(CustomerDataset::from_customers(customers, has_prr))
}
