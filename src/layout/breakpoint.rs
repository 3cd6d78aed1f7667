use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Viewport width tiers, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
}

impl Breakpoint {
    /// All tiers, narrowest first.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xxs,
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Breakpoint::Xxs => "xxs",
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Breakpoint {
    type Err = BoardError;

    fn from_str(raw: &str) -> Result<Self> {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| bp.as_str() == raw)
            .ok_or_else(|| BoardError::validation(format!("unknown breakpoint `{raw}`")))
    }
}

/// Width threshold and column count for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointSpec {
    /// Smallest viewport width (inclusive) that selects this tier.
    pub min_width: u32,
    pub columns: u16,
}

impl BreakpointSpec {
    pub const fn new(min_width: u32, columns: u16) -> Self {
        Self { min_width, columns }
    }
}

/// Recognized breakpoints keyed by tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointTable {
    pub lg: BreakpointSpec,
    pub md: BreakpointSpec,
    pub sm: BreakpointSpec,
    pub xs: BreakpointSpec,
    pub xxs: BreakpointSpec,
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            lg: BreakpointSpec::new(1200, 6),
            md: BreakpointSpec::new(996, 6),
            sm: BreakpointSpec::new(768, 4),
            xs: BreakpointSpec::new(480, 2),
            xxs: BreakpointSpec::new(0, 2),
        }
    }
}

impl BreakpointTable {
    pub fn spec(&self, breakpoint: Breakpoint) -> BreakpointSpec {
        match breakpoint {
            Breakpoint::Lg => self.lg,
            Breakpoint::Md => self.md,
            Breakpoint::Sm => self.sm,
            Breakpoint::Xs => self.xs,
            Breakpoint::Xxs => self.xxs,
        }
    }

    pub fn columns(&self, breakpoint: Breakpoint) -> u16 {
        self.spec(breakpoint).columns
    }

    /// Pick the widest tier whose threshold `width` reaches.
    pub fn resolve(&self, width: u32) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .rev()
            .find(|bp| width >= self.spec(*bp).min_width)
            .unwrap_or(Breakpoint::Xxs)
    }

    /// Thresholds must strictly grow from `xxs` to `lg` and every tier
    /// needs at least one column.
    pub fn validate(&self) -> Result<()> {
        for pair in Breakpoint::ALL.windows(2) {
            let (narrow, wide) = (self.spec(pair[0]), self.spec(pair[1]));
            if wide.min_width <= narrow.min_width {
                return Err(BoardError::validation(format!(
                    "breakpoint `{}` threshold {} must exceed `{}` threshold {}",
                    pair[1], wide.min_width, pair[0], narrow.min_width
                )));
            }
        }
        if let Some(bp) = Breakpoint::ALL.into_iter().find(|bp| self.columns(*bp) == 0) {
            return Err(BoardError::validation(format!(
                "breakpoint `{bp}` must have at least one column"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_columns() {
        let table = BreakpointTable::default();
        assert_eq!(table.columns(Breakpoint::Lg), 6);
        assert_eq!(table.columns(Breakpoint::Md), 6);
        assert_eq!(table.columns(Breakpoint::Sm), 4);
        assert_eq!(table.columns(Breakpoint::Xs), 2);
        assert_eq!(table.columns(Breakpoint::Xxs), 2);
    }

    #[test]
    fn resolve_thresholds_are_inclusive() {
        let table = BreakpointTable::default();
        assert_eq!(table.resolve(768), Breakpoint::Sm);
        assert_eq!(table.resolve(767), Breakpoint::Xs);
        assert_eq!(table.resolve(1200), Breakpoint::Lg);
        assert_eq!(table.resolve(1199), Breakpoint::Md);
        assert_eq!(table.resolve(996), Breakpoint::Md);
        assert_eq!(table.resolve(480), Breakpoint::Xs);
        assert_eq!(table.resolve(479), Breakpoint::Xxs);
        assert_eq!(table.resolve(0), Breakpoint::Xxs);
        assert_eq!(table.resolve(u32::MAX), Breakpoint::Lg);
    }

    #[test]
    fn parse_identifiers() {
        assert_eq!("sm".parse::<Breakpoint>().unwrap(), Breakpoint::Sm);
        assert_eq!("xxs".parse::<Breakpoint>().unwrap(), Breakpoint::Xxs);
        assert!("xl".parse::<Breakpoint>().unwrap_err().is_validation());
    }

    #[test]
    fn default_table_is_valid() {
        assert!(BreakpointTable::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let mut table = BreakpointTable::default();
        table.sm.min_width = 1000;
        assert!(table.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_columns() {
        let mut table = BreakpointTable::default();
        table.xs.columns = 0;
        assert!(table.validate().is_err());
    }
}
