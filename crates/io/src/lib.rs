// Serialization boundaries: spreadsheet codec and archive writer

pub mod bundle;
pub mod xlsx;
