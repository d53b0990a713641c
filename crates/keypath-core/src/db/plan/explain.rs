//! Deterministic, read-only explanation of access-path decisions.

use crate::db::plan::{AccessPath, usage::IndexUsage};
use std::fmt;

impl fmt::Display for IndexUsage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INDEX {} [{}]", self.index().name, self.effectiveness())?;

        if !self.equalities().is_empty() {
            f.write_str(" eq(")?;
            for (i, binding) in self.equalities().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} = {}", binding.column, binding.comparand)?;
            }
            f.write_str(")")?;
        }

        if let Some(column) = self.range_column() {
            f.write_str(" range(")?;
            match self.low() {
                Some(low) if low.inclusive => write!(f, "{} <= ", low.comparand)?,
                Some(low) => write!(f, "{} < ", low.comparand)?,
                None => {}
            }
            write!(f, "{column}")?;
            match self.high() {
                Some(high) if high.inclusive => write!(f, " <= {}", high.comparand)?,
                Some(high) => write!(f, " < {}", high.comparand)?,
                None => {}
            }
            f.write_str(")")?;
        }

        if !self.ordering().is_empty() {
            f.write_str(" order(")?;
            for (i, column) in self.ordering().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{column}")?;
            }
            f.write_str(")")?;
        }

        if self.reverse_scan() {
            f.write_str(" reverse")?;
        }

        Ok(())
    }
}

impl fmt::Display for AccessPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(usage) => write!(f, "{usage}"),
            Self::FullScan => f.write_str("FULL SCAN"),
        }
    }
}
