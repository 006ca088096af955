pub mod csv_export;
pub mod workbook_export;
