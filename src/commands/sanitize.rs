use clap::ValueEnum;

use crate::sanitize::{clean_series_name, full_sanitize_scene_name, sanitize_scene_name};

/// Which normalization to apply
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SanitizeMode {
    /// Make a series name safe for file systems (default)
    #[default]
    Clean,
    /// Convert to dotted scene style
    Scene,
    /// Reduce to lowercase words for comparisons
    Full,
}

/// Command to normalize a name the way the parser and renamers do
pub struct SanitizeCommand {
    name: String,
    mode: SanitizeMode,
}

impl SanitizeCommand {
    pub fn new(name: String, mode: SanitizeMode) -> Self {
        Self { name, mode }
    }

    pub fn execute(&self) -> String {
        match self.mode {
            SanitizeMode::Clean => clean_series_name(&self.name),
            SanitizeMode::Scene => sanitize_scene_name(&self.name),
            SanitizeMode::Full => full_sanitize_scene_name(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        let name = "Show: Name & Co.".to_string();
        assert_eq!(SanitizeCommand::new(name.clone(), SanitizeMode::Clean).execute(), "Show Name & Co");
        assert_eq!(SanitizeCommand::new(name.clone(), SanitizeMode::Scene).execute(), "Show.Name.and.Co");
        assert_eq!(SanitizeCommand::new(name, SanitizeMode::Full).execute(), "show name and co");
    }
}
