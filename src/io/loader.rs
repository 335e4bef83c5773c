// src/io/loader.rs

use crate::error::{InventoryError, InventoryResult};
use crate::pipeline::InventoryInputs;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

pub const PRODUCTS_FILE: &str = "products.csv";
pub const SUPPLIERS_FILE: &str = "suppliers.csv";
pub const SALES_FILE: &str = "sales.csv";
pub const INVENTORY_FILE: &str = "inventory_tx.csv";
pub const PURCHASE_ORDERS_FILE: &str = "purchase_orders.csv";

/// Loads the five collaborator tables from `dir`.
///
/// Products and sales are required. The supplier, inventory and purchase
/// order files may be absent and then load as empty tables.
pub fn load_inputs(dir: &Path) -> InventoryResult<InventoryInputs> {
    let products = read_csv_file(&dir.join(PRODUCTS_FILE), "products")?;
    if products.is_empty() {
        return Err(InventoryError::EmptyTable { table: "products" });
    }

    let inputs = InventoryInputs {
        products,
        suppliers: read_optional_csv_file(&dir.join(SUPPLIERS_FILE), "suppliers")?,
        sales: read_csv_file(&dir.join(SALES_FILE), "sales")?,
        inventory: read_optional_csv_file(&dir.join(INVENTORY_FILE), "inventory")?,
        purchase_orders: read_optional_csv_file(&dir.join(PURCHASE_ORDERS_FILE), "purchase_orders")?,
    };

    log::info!(
        "Loaded {} products, {} suppliers, {} sales, {} inventory movements, {} purchase orders from '{}'",
        inputs.products.len(),
        inputs.suppliers.len(),
        inputs.sales.len(),
        inputs.inventory.len(),
        inputs.purchase_orders.len(),
        dir.display()
    );
    Ok(inputs)
}

pub fn read_csv_file<T: DeserializeOwned>(path: &Path, table: &str) -> InventoryResult<Vec<T>> {
    let file = std::fs::File::open(path)?;
    read_records(file, table)
}

fn read_optional_csv_file<T: DeserializeOwned>(path: &Path, table: &str) -> InventoryResult<Vec<T>> {
    if !path.exists() {
        log::warn!("{table}: '{}' not found, using an empty table", path.display());
        return Ok(Vec::new());
    }
    read_csv_file(path, table)
}

/// Deserializes every row of a headed CSV stream.
///
/// Rows that do not match `T` are skipped with a warning; I/O failures abort.
pub fn read_records<T: DeserializeOwned, R: Read>(reader: R, table: &str) -> InventoryResult<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.deserialize() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                skipped += 1;
                log::warn!("{table}: skipping row: {e}");
            }
        }
    }
    if skipped > 0 {
        log::warn!("{table}: {skipped} rows skipped, {} kept", rows.len());
    }
    Ok(rows)
}
