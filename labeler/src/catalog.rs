//! CSV product catalog loading.

use std::path::Path;

/// Column the product names are read from.
pub const PRODUCT_COLUMN: &str = "Product Name";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("CSV file has no column headers")]
    NoHeaders,

    #[error("CSV file has no '{0}' column")]
    MissingColumn(String),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load product names from the `Product Name` column, in file order.
pub fn load_products(path: &Path) -> Result<Vec<String>, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h == PRODUCT_COLUMN)
        .ok_or_else(|| CatalogError::MissingColumn(PRODUCT_COLUMN.to_string()))?;

    let mut products = Vec::new();
    for record in reader.records() {
        let record = record?;
        products.push(record.get(column).unwrap_or("").to_string());
    }
    Ok(products)
}

/// Read the header row and count the data rows.
pub fn inspect(path: &Path) -> Result<(Vec<String>, usize), CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() {
        return Err(CatalogError::NoHeaders);
    }

    let mut rows = 0usize;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok((headers, rows))
}

/// First row with a non-empty value in any of the selected columns,
/// joined with " - " for label preview text.
pub fn first_preview_row(
    path: &Path,
    columns: &[String],
) -> Result<Option<String>, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut indices = Vec::with_capacity(columns.len());
    for col in columns {
        let idx = headers
            .iter()
            .position(|h| h == col)
            .ok_or_else(|| CatalogError::MissingColumn(col.clone()))?;
        indices.push(idx);
    }

    for record in reader.records() {
        let record = record?;
        let values: Vec<&str> = indices
            .iter()
            .map(|&i| record.get(i).unwrap_or("").trim())
            .filter(|v| !v.is_empty())
            .collect();
        if !values.is_empty() {
            return Ok(Some(values.join(" - ")));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_products_in_file_order() {
        let file = write_csv("Product Name,SKU\nHoney,1\nJam,2\nTea,3\n");
        let products = load_products(file.path()).unwrap();
        assert_eq!(products, vec!["Honey", "Jam", "Tea"]);
    }

    #[test]
    fn missing_product_column_is_an_error() {
        let file = write_csv("Name,SKU\nHoney,1\n");
        let err = load_products(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(_)));
    }

    #[test]
    fn inspect_reports_headers_and_row_count() {
        let file = write_csv("Product Name,SKU\nHoney,1\nJam,2\n");
        let (headers, rows) = inspect(file.path()).unwrap();
        assert_eq!(headers, vec!["Product Name", "SKU"]);
        assert_eq!(rows, 2);
    }

    #[test]
    fn preview_row_joins_selected_columns() {
        let file = write_csv("Product Name,SKU\n ,\nHoney,42\n");
        let cols = vec!["Product Name".to_string(), "SKU".to_string()];
        let preview = first_preview_row(file.path(), &cols).unwrap();
        assert_eq!(preview, Some("Honey - 42".to_string()));
    }

    #[test]
    fn preview_with_unknown_column_errors() {
        let file = write_csv("Product Name\nHoney\n");
        let cols = vec!["Nope".to_string()];
        assert!(first_preview_row(file.path(), &cols).is_err());
    }
}
