use super::Workbook;
use crate::error::Result;
use crate::storage::{TriggerEntry, TriggerEvent, read_triggers, write_triggers};
use crate::traits::TriggerRegistry;

impl TriggerRegistry for Workbook {
    fn install(&mut self, handler: &str) -> Result<bool> {
        let path = self.triggers_path();
        let mut triggers = read_triggers(&path)?;
        if triggers.iter().any(|t| t.handler == handler) {
            return Ok(false);
        }
        triggers.push(TriggerEntry {
            handler: handler.to_string(),
            event: TriggerEvent::Edit,
        });
        write_triggers(&path, &triggers)?;
        Ok(true)
    }

    fn remove(&mut self, handler: &str) -> Result<usize> {
        let path = self.triggers_path();
        let mut triggers = read_triggers(&path)?;
        let before = triggers.len();
        triggers.retain(|t| t.handler != handler);
        let removed = before - triggers.len();
        if removed > 0 {
            write_triggers(&path, &triggers)?;
        }
        Ok(removed)
    }

    fn is_installed(&self, handler: &str) -> Result<bool> {
        let triggers = read_triggers(&self.triggers_path())?;
        Ok(triggers.iter().any(|t| t.handler == handler))
    }
}
