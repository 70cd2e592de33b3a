//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod json;
pub mod report;
pub mod table;

pub use report::ConsoleReporter;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty | OutputFormat::Table => Ok(table::format_table(self)),
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

/// Print a `{data, meta}` JSON document to stdout
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    println!("{}", json::format_json(data)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Integration;
    use crate::models::IntegrationDisplay;

    #[test]
    fn test_integration_rows_format() {
        let integration = Integration {
            installation_id: Some("68406724".to_string()),
            title: Some("GitHub".to_string()),
            ..Default::default()
        };
        let rows = vec![IntegrationDisplay::from(&integration)];

        let table = rows.format(OutputFormat::Table).unwrap();
        assert!(table.contains("TITLE"));
        assert!(table.contains("GitHub"));

        let json = rows.format(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["data"][0]["title"], "GitHub");
    }
}
