//! Shared traits for records fetched from the dashboard API.

/// Exposes the server-assigned identifier of a record.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Converts a record into the label shown in selection lists.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Finds the record whose identifier equals `id`.
pub fn find_by_id<'a, T: Identifiable>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|record| record.id() == id)
}
