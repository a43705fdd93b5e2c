/// Identifies entities addressed by a stable string key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
