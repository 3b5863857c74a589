use anyhow::{anyhow, Result};
use tracing::info;

use crate::catalog::{Catalog, RuleReport};

/// Command to list the active naming rules and optionally re-run their self-tests
pub struct RulesCommand<'a> {
    catalog: &'a Catalog,
    verify: bool,
}

impl<'a> RulesCommand<'a> {
    pub fn new(catalog: &'a Catalog, verify: bool) -> Self {
        Self { catalog, verify }
    }

    pub fn execute(&self) -> Result<()> {
        println!("\n📜 Naming Rules ({} active)", self.catalog.len());
        println!("══════════════════════");
        for (index, rule) in self.catalog.rules().iter().enumerate() {
            println!("{:>3}. {:<24} {} samples", index + 1, rule.name(), rule.tests().len());
        }

        if !self.catalog.rejected().is_empty() {
            println!("\n⚠️  Rejected rules:");
            for rejected in self.catalog.rejected() {
                println!("   • {}: {}", rejected.name, rejected.reason);
            }
        }

        if !self.verify {
            return Ok(());
        }

        info!("Re-running self-tests for {} rules", self.catalog.len());
        let reports = self.catalog.verify();
        let failed: Vec<&RuleReport> = reports.iter().filter(|r| !r.passed()).collect();

        println!("\n🧪 Self-test results:");
        for report in &reports {
            match &report.error {
                None => println!("   ✅ {} ({} samples)", report.name, report.tests),
                Some(error) => println!("   ❌ {}: {}", report.name, error),
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("{} naming rules failed their self-tests", failed.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_embedded_rules() {
        let catalog = Catalog::anime().unwrap();
        assert!(RulesCommand::new(&catalog, true).execute().is_ok());
    }
}
