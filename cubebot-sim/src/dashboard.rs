//! Simulated dashboard and vision table

use std::collections::BTreeMap;
use std::fmt;

use cubebot_core::traits::{TelemetrySink, VisionLink};

/// One published dashboard value
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Text(String),
    Flag(bool),
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Text(text) => f.write_str(text),
            Entry::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Latest value per dashboard key
#[derive(Debug, Default)]
pub struct Dashboard {
    entries: BTreeMap<String, Entry>,
}

impl Dashboard {
    /// Latest text under `key`
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(Entry::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Latest flag under `key`
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.entries.get(key) {
            Some(Entry::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Number of keys published so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been published
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TelemetrySink for Dashboard {
    fn put_string(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), Entry::Text(value.to_string()));
    }

    fn put_bool(&mut self, key: &str, value: bool) {
        self.entries.insert(key.to_string(), Entry::Flag(value));
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.keys().map(String::len).max().unwrap_or(0);
        for (key, value) in &self.entries {
            writeln!(f, "{:<width$}  {}", key, value, width = width)?;
        }
        Ok(())
    }
}

/// Camera coprocessor table
///
/// Holds whatever the robot last wrote plus a fixed target the camera
/// reports.
#[derive(Debug, Default)]
pub struct VisionTable {
    numbers: BTreeMap<String, f64>,
}

impl VisionTable {
    /// Table reporting a target at the given offsets and area
    pub fn with_target(x: f64, y: f64, area: f64) -> Self {
        let mut table = Self::default();
        table.put_number("tx", x);
        table.put_number("ty", y);
        table.put_number("ta", area);
        table
    }

    /// Latest value under `key`
    pub fn number(&self, key: &str) -> Option<f64> {
        self.numbers.get(key).copied()
    }
}

impl VisionLink for VisionTable {
    fn put_number(&mut self, key: &str, value: f64) {
        self.numbers.insert(key.to_string(), value);
    }

    fn get_number(&self, key: &str, default: f64) -> f64 {
        self.number(key).unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_value_wins() {
        let mut dash = Dashboard::default();
        dash.put_string("Auto Status", "Running");
        dash.put_string("Auto Status", "Completed");
        dash.put_bool("Reed Switch Top", true);

        assert_eq!(dash.text("Auto Status"), Some("Completed"));
        assert_eq!(dash.flag("Reed Switch Top"), Some(true));
        assert_eq!(dash.text("Reed Switch Top"), None);
        assert_eq!(dash.len(), 2);
    }

    #[test]
    fn test_render_aligns_keys() {
        let mut dash = Dashboard::default();
        dash.put_string("Timer", "1.00");
        dash.put_bool("Reed Switch Bot", false);

        let shown = dash.to_string();
        assert_eq!(shown, "Reed Switch Bot  false\nTimer            1.00\n");
    }

    #[test]
    fn test_vision_defaults() {
        let table = VisionTable::with_target(1.5, -2.0, 0.25);
        assert_eq!(table.get_number("tx", 0.0), 1.5);
        assert_eq!(table.get_number("camMode", 4.0), 4.0);
    }
}
