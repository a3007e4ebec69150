//! Sector identifier and sector record types.
//!
//! `SectorId` is the typed key of every per-sector mapping in the workspace.
//! Using a newtype instead of bare strings keeps sector lookups explicit and
//! prevents accidental mixing with other string-keyed data.

use super::error::ConfigurationError;
use std::fmt;

/// Identifier for one sector of the index.
///
/// # Examples
///
/// ```
/// use index_core::types::SectorId;
///
/// let id = SectorId::new("Energy");
/// assert_eq!(id.as_str(), "Energy");
///
/// assert!(SectorId::parse("   ").is_err());
/// assert_eq!(SectorId::parse(" Utilities ").unwrap().as_str(), "Utilities");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectorId(String);

impl SectorId {
    /// Creates a new sector ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a sector ID from user-supplied text, trimming whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::EmptySectorName` if nothing remains.
    pub fn parse(name: &str) -> Result<Self, ConfigurationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigurationError::EmptySectorName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SectorId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for SectorId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::borrow::Borrow<str> for SectorId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One constituent segment of the index.
///
/// # Examples
///
/// ```
/// use index_core::types::SectorRecord;
///
/// let energy = SectorRecord::new("Energy", 0.03, 14.0).unwrap();
/// assert_eq!(energy.name().as_str(), "Energy");
/// assert_eq!(energy.weight(), 0.03);
///
/// assert!(SectorRecord::new("Energy", 0.03, 0.0).is_err());
/// assert!(SectorRecord::new("Energy", -0.01, 14.0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectorRecord {
    name: SectorId,
    weight: f64,
    current_multiple: f64,
}

impl SectorRecord {
    /// Creates a validated sector record.
    ///
    /// # Errors
    ///
    /// - `EmptySectorName` if the name is blank
    /// - `NonFiniteValue` if the weight or multiple is NaN or infinite
    /// - `NegativeWeight` if `weight < 0`
    /// - `NonPositiveMultiple` if `current_multiple <= 0`
    pub fn new(
        name: impl Into<String>,
        weight: f64,
        current_multiple: f64,
    ) -> Result<Self, ConfigurationError> {
        let name: String = name.into();
        let record = Self {
            name: SectorId::parse(&name)?,
            weight,
            current_multiple,
        };
        record.validate()?;
        Ok(record)
    }

    /// Re-checks the record invariants.
    ///
    /// Records deserialised from configuration skip `new`, so the registry
    /// calls this on every record it accepts.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.name.as_str().trim().is_empty() {
            return Err(ConfigurationError::EmptySectorName);
        }
        if !self.weight.is_finite() {
            return Err(ConfigurationError::NonFiniteValue {
                field: format!("{}.weight", self.name),
                value: self.weight,
            });
        }
        if !self.current_multiple.is_finite() {
            return Err(ConfigurationError::NonFiniteValue {
                field: format!("{}.current_multiple", self.name),
                value: self.current_multiple,
            });
        }
        if self.weight < 0.0 {
            return Err(ConfigurationError::NegativeWeight {
                sector: self.name.to_string(),
                weight: self.weight,
            });
        }
        if self.current_multiple <= 0.0 {
            return Err(ConfigurationError::NonPositiveMultiple {
                sector: self.name.to_string(),
                multiple: self.current_multiple,
            });
        }
        Ok(())
    }

    /// Sector identifier.
    #[inline]
    pub fn name(&self) -> &SectorId {
        &self.name
    }

    /// Fractional contribution to the index.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Current price/earnings ratio of the sector.
    #[inline]
    pub fn current_multiple(&self) -> f64 {
        self.current_multiple
    }

    pub(crate) fn rescaled(&self, factor: f64) -> Self {
        Self {
            name: self.name.clone(),
            weight: self.weight * factor,
            current_multiple: self.current_multiple,
        }
    }
}
