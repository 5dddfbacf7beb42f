//! Storage-capacity units and power-of-1024 conversion
//!
//! Units form a strictly ordered sequence from byte to brontobyte, each
//! step 1024 times the previous. Conversion scales a value by 1024 raised
//! to the ordinal distance between the two units.

use std::fmt;

use thiserror::Error;

/// Bytes in one step between adjacent units
const UNIT_STEP: f64 = 1024.0;

/// Storage-capacity unit, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageUnit {
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
    Petabyte,
    Exabyte,
    Zettabyte,
    Yottabyte,
    Brontobyte,
}

impl fmt::Display for StorageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl StorageUnit {
    /// Get the lowercase name of the unit
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Kilobyte => "kilobyte",
            Self::Megabyte => "megabyte",
            Self::Gigabyte => "gigabyte",
            Self::Terabyte => "terabyte",
            Self::Petabyte => "petabyte",
            Self::Exabyte => "exabyte",
            Self::Zettabyte => "zettabyte",
            Self::Yottabyte => "yottabyte",
            Self::Brontobyte => "brontobyte",
        }
    }

    /// Get the unit's position in the ordered sequence, byte first
    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    /// Look up a unit by case-insensitive name
    ///
    /// Returns `None` for unknown names and for empty input.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "byte" => Some(Self::Byte),
            "kilobyte" => Some(Self::Kilobyte),
            "megabyte" => Some(Self::Megabyte),
            "gigabyte" => Some(Self::Gigabyte),
            "terabyte" => Some(Self::Terabyte),
            "petabyte" => Some(Self::Petabyte),
            "exabyte" => Some(Self::Exabyte),
            "zettabyte" => Some(Self::Zettabyte),
            "yottabyte" => Some(Self::Yottabyte),
            "brontobyte" => Some(Self::Brontobyte),
            _ => None,
        }
    }

    /// Get all units, smallest first
    pub fn all() -> [Self; 10] {
        [
            Self::Byte,
            Self::Kilobyte,
            Self::Megabyte,
            Self::Gigabyte,
            Self::Terabyte,
            Self::Petabyte,
            Self::Exabyte,
            Self::Zettabyte,
            Self::Yottabyte,
            Self::Brontobyte,
        ]
    }
}

/// Errors that can occur during storage-unit conversion
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Conversion requested between a unit and itself
    #[error("Same storage unit on both sides of the conversion: {0}")]
    SameStorageUnit(StorageUnit),

    /// Distinct units reported a zero ordinal distance
    ///
    /// Unreachable for a well-formed unit table; raised only to signal a
    /// defect rather than return a silently wrong scale.
    #[error("Unexpected storage conversion: {from} and {to} are distinct but share ordinal {ordinal}")]
    UnexpectedStorageConversion {
        from: StorageUnit,
        to: StorageUnit,
        ordinal: i32,
    },
}

/// Result type for storage-unit conversion
pub type ConversionResult<T> = std::result::Result<T, ConversionError>;

impl ConversionError {
    /// Check if this is a same unit error
    pub fn is_same_storage_unit(&self) -> bool {
        matches!(self, Self::SameStorageUnit(_))
    }

    /// Check if this is an unexpected conversion error
    pub fn is_unexpected_conversion(&self) -> bool {
        matches!(self, Self::UnexpectedStorageConversion { .. })
    }
}

/// Convert a value between two storage units
///
/// Scales by 1024 per step of ordinal distance: converting toward a smaller
/// unit multiplies, converting toward a larger unit divides. No rounding is
/// applied; precision follows f64 arithmetic.
pub fn convert(value: f64, from: StorageUnit, to: StorageUnit) -> ConversionResult<f64> {
    if from == to {
        return Err(ConversionError::SameStorageUnit(from));
    }

    let differential = from.ordinal() - to.ordinal();
    if differential > 0 {
        Ok(value * UNIT_STEP.powi(differential))
    } else if differential < 0 {
        Ok(value / UNIT_STEP.powi(-differential))
    } else {
        Err(ConversionError::UnexpectedStorageConversion {
            from,
            to,
            ordinal: from.ordinal(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_single_step() -> ConversionResult<()> {
        assert_eq!(convert(1024.0, StorageUnit::Byte, StorageUnit::Kilobyte)?, 1.0);
        assert_eq!(convert(1.0, StorageUnit::Kilobyte, StorageUnit::Byte)?, 1024.0);
        assert_eq!(convert(2.5, StorageUnit::Megabyte, StorageUnit::Kilobyte)?, 2560.0);

        Ok(())
    }

    #[test]
    fn test_convert_multi_step() -> ConversionResult<()> {
        // Three steps of ordinal distance scale by 1024^3
        assert_eq!(
            convert(1.0, StorageUnit::Gigabyte, StorageUnit::Byte)?,
            1_073_741_824.0
        );
        assert_eq!(
            convert(1_073_741_824.0, StorageUnit::Byte, StorageUnit::Gigabyte)?,
            1.0
        );
        assert_eq!(
            convert(1.0, StorageUnit::Kilobyte, StorageUnit::Terabyte)?,
            1.0 / 1_073_741_824.0
        );
        // Nine steps span the whole table
        assert_eq!(
            convert(1.0, StorageUnit::Brontobyte, StorageUnit::Byte)?,
            1024f64.powi(9)
        );

        Ok(())
    }

    #[test]
    fn test_convert_rejects_same_unit() {
        let err = convert(42.0, StorageUnit::Byte, StorageUnit::Byte).unwrap_err();
        assert!(err.is_same_storage_unit());
        assert_eq!(
            err.to_string(),
            "Same storage unit on both sides of the conversion: byte"
        );

        let err = convert(0.0, StorageUnit::Brontobyte, StorageUnit::Brontobyte).unwrap_err();
        assert!(err.is_same_storage_unit());
    }

    #[test]
    fn test_ordinals_are_strictly_increasing() {
        let units = StorageUnit::all();

        for pair in units.windows(2) {
            assert_eq!(pair[1].ordinal(), pair[0].ordinal() + 1);
        }
        assert_eq!(StorageUnit::Byte.ordinal(), 0);
        assert_eq!(StorageUnit::Brontobyte.ordinal(), 9);
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(StorageUnit::from_name("KILOBYTE"), Some(StorageUnit::Kilobyte));
        assert_eq!(StorageUnit::from_name("Gigabyte"), Some(StorageUnit::Gigabyte));
        assert_eq!(StorageUnit::from_name(" byte "), Some(StorageUnit::Byte));
        assert_eq!(StorageUnit::from_name(""), None);
        assert_eq!(StorageUnit::from_name("parsec"), None);

        for unit in StorageUnit::all() {
            assert_eq!(StorageUnit::from_name(unit.name()), Some(unit));
        }
    }
}
