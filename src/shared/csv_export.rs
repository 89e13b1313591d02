//! CSV sheets downloaded from the admin screens

use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;

use crate::core::error::{AppError, Result};

/// Rendered CSV attachment
#[derive(Debug)]
pub struct CsvSheet {
    filename: String,
    body: Vec<u8>,
}

impl CsvSheet {
    pub fn build<R, F>(
        filename: impl Into<String>,
        delimiter: u8,
        header: &[&str],
        rows: R,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = F>,
        F: IntoIterator<Item = String>,
    {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());

        writer.write_record(header).map_err(csv_error)?;
        for row in rows {
            writer.write_record(row).map_err(csv_error)?;
        }

        let body = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to finish CSV: {}", e)))?;

        Ok(Self {
            filename: filename.into(),
            body,
        })
    }
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("Failed to write CSV: {}", e))
}

/// `dd/mm/yyyy`, the way the sheets are read on site
pub fn sheet_date(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

impl IntoResponse for CsvSheet {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fields_with_delimiter_are_quoted() {
        let sheet = CsvSheet::build(
            "stock.csv",
            b';',
            &["Article", "Notes"],
            vec![vec!["Vis".to_string(), "boîte; entamée".to_string()]],
        )
        .unwrap();

        let text = String::from_utf8(sheet.body).unwrap();
        assert_eq!(text, "Article;Notes\nVis;\"boîte; entamée\"\n");
        assert_eq!(sheet.filename, "stock.csv");
    }

    #[test]
    fn test_sheet_date_is_day_first() {
        let at = Utc.with_ymd_and_hms(2025, 12, 3, 9, 30, 0).unwrap();
        assert_eq!(sheet_date(at), "03/12/2025");
    }
}
