//! Suggested file names for Save As.

use chrono::{Local, NaiveDateTime};

/// `<prefix>-YYYYMMDD-HHMMSS.<extension>` for the given instant.
pub fn suggested_name(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{prefix}-{}.{extension}", at.format("%Y%m%d-%H%M%S"))
}

/// Suggested name stamped with the local wall clock.
pub fn suggested_name_now(prefix: &str, extension: &str) -> String {
    suggested_name(prefix, extension, Local::now().naive_local())
}
