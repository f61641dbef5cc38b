use crate::entities::HistoryModel;

/// Snapshot of the registry next to the history table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStatus {
    pub registered: Vec<String>,
    pub history: Vec<HistoryModel>,
    /// Latest applied name, empty when nothing is applied.
    pub current: String,
}

impl MigrationStatus {
    pub fn applied_at(&self, name: &str) -> Option<&HistoryModel> {
        self.history.iter().find(|row| row.name == name)
    }

    /// Registered migrations that `install` would apply.
    pub fn pending(&self) -> Vec<&str> {
        self.registered
            .iter()
            .map(String::as_str)
            .filter(|name| *name > self.current.as_str())
            .collect()
    }

    /// History rows with no registered migration behind them.
    pub fn unregistered(&self) -> Vec<&HistoryModel> {
        self.history
            .iter()
            .filter(|row| !self.registered.contains(&row.name))
            .collect()
    }
}

impl std::fmt::Display for MigrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.history.is_empty() {
            return write!(f, "No migrations have been run");
        }
        write!(f, "Statuses: ")?;
        for (i, row) in self.history.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} @ {}", row.name, row.date)?;
        }
        Ok(())
    }
}
