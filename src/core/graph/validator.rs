use crate::core::errors::ParseError;
use crate::core::types::ModuleRecord;
use std::collections::HashSet;

/// Centralized validation of module records before the graph is built
pub struct RecordValidator;

impl RecordValidator {
    /// Validate every record, stopping at the first problem
    pub fn validate_records(records: &[ModuleRecord]) -> Result<(), ParseError> {
        let mut declared = HashSet::new();

        for record in records {
            Self::validate_name(record)?;
            Self::validate_destinations(record)?;

            if !declared.insert(record.name.as_str()) {
                return Err(ParseError::DuplicateModule(record.name.clone()));
            }
        }

        Ok(())
    }

    /// Names must be non-empty
    pub fn validate_name(record: &ModuleRecord) -> Result<(), ParseError> {
        if record.name.trim().is_empty() {
            return Err(ParseError::EmptyName);
        }
        Ok(())
    }

    /// Every destination must name something; undeclared names are fine
    pub fn validate_destinations(record: &ModuleRecord) -> Result<(), ParseError> {
        if record.destinations.iter().any(|dest| dest.trim().is_empty()) {
            return Err(ParseError::EmptyDestination {
                module: record.name.clone(),
            });
        }
        Ok(())
    }
}
