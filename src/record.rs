//! Record schemas: the ordered field list that drives the cell mapping
//!
//! A record type implements [`Record`] to describe its columns and to move
//! values between its fields and [`CellValue`]s. The [`sheet_record!`]
//! macro generates the implementation from a field list:
//!
//! ```
//! use sheetmap::sheet_record;
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! pub struct Person {
//!     pub id: i64,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! sheet_record! {
//!     Person {
//!         id: i64 => "Id",
//!         first_name: String => "FirstName",
//!         last_name: String => "LastName",
//!     }
//! }
//!
//! use sheetmap::Record;
//! assert_eq!(Person::COLUMNS[1].name, "FirstName");
//! ```
//!
//! [`sheet_record!`]: crate::sheet_record

use crate::error::ConversionError;
use crate::types::{
    serial_to_datetime, CellKind, CellValue, Column, DATETIME_FORMAT, DATE_FORMAT,
};
use chrono::{NaiveDate, NaiveDateTime};

/// A fixed-shape type whose fields map, in order, onto spreadsheet columns.
pub trait Record: Default {
    /// Column descriptors in field order.
    const COLUMNS: &'static [Column];

    /// Field values in column order.
    fn to_row(&self) -> Vec<CellValue>;

    /// Convert `value` to the declared type of the field at `ordinal` and assign it.
    fn set_field(&mut self, ordinal: usize, value: &CellValue) -> Result<(), ConversionError>;
}

/// A field type that can be written to and read from a cell.
pub trait CellType: Sized {
    const KIND: CellKind;

    fn to_cell(&self) -> CellValue;

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError>;
}

/// Generate a [`Record`] implementation for a struct with named fields.
///
/// Each entry is `field: Type` optionally followed by `=> "Header"`; without a
/// header the field name is used.
#[macro_export]
macro_rules! sheet_record {
    (@name $field:ident, $name:literal) => {
        $name
    };
    (@name $field:ident) => {
        stringify!($field)
    };
    ($ty:ty { $($field:ident : $fty:ty $(=> $name:literal)?),+ $(,)? }) => {
        impl $crate::Record for $ty {
            const COLUMNS: &'static [$crate::Column] = &[
                $($crate::Column::new(
                    $crate::sheet_record!(@name $field $(, $name)?),
                    <$fty as $crate::CellType>::KIND,
                )),+
            ];

            fn to_row(&self) -> ::std::vec::Vec<$crate::CellValue> {
                ::std::vec![$(<$fty as $crate::CellType>::to_cell(&self.$field)),+]
            }

            fn set_field(
                &mut self,
                ordinal: usize,
                value: &$crate::CellValue,
            ) -> ::std::result::Result<(), $crate::ConversionError> {
                let mut index = 0usize;
                $(
                    if ordinal == index {
                        self.$field = <$fty as $crate::CellType>::from_cell(value)?;
                        return Ok(());
                    }
                    index += 1;
                )+
                let _ = index;
                Err($crate::ConversionError::UnknownOrdinal(ordinal))
            }
        }
    };
}

//==============================================================================
// Conversion table
//==============================================================================

impl CellType for String {
    const KIND: CellKind = CellKind::Text;

    fn to_cell(&self) -> CellValue {
        CellValue::Text(self.clone())
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        Ok(value.to_text())
    }
}

impl CellType for bool {
    const KIND: CellKind = CellKind::Boolean;

    fn to_cell(&self) -> CellValue {
        CellValue::Bool(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        match value {
            CellValue::Bool(b) => Ok(*b),
            CellValue::Int(i) => Ok(*i != 0),
            CellValue::Number(n) => Ok(*n != 0.0),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("true") {
                    Ok(true)
                } else if trimmed.eq_ignore_ascii_case("false") {
                    Ok(false)
                } else {
                    Err(ConversionError::incompatible(Self::KIND, value.describe()))
                }
            }
            _ => Err(ConversionError::incompatible(Self::KIND, value.describe())),
        }
    }
}

/// Read any integral cell value as an `i128`, wide enough for every target
/// type; floats must have no fractional part.
fn integer_from_cell(value: &CellValue, target: &'static str) -> Result<i128, ConversionError> {
    match value {
        CellValue::Int(i) => Ok(i128::from(*i)),
        CellValue::Number(n) => {
            if n.fract() != 0.0 || !n.is_finite() {
                return Err(ConversionError::incompatible(CellKind::Integer, value.describe()));
            }
            if *n < i128::MIN as f64 || *n >= i128::MAX as f64 {
                return Err(ConversionError::OutOfRange {
                    value: n.to_string(),
                    target,
                });
            }
            Ok(*n as i128)
        }
        CellValue::Bool(b) => Ok(i128::from(*b)),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i128>() {
                return Ok(i);
            }
            // "3.0" style text written by a float-typed source
            match trimmed.parse::<f64>() {
                Ok(n) => integer_from_cell(&CellValue::Number(n), target),
                Err(_) => Err(ConversionError::incompatible(CellKind::Integer, value.describe())),
            }
        }
        _ => Err(ConversionError::incompatible(CellKind::Integer, value.describe())),
    }
}

macro_rules! integer_cell_type {
    ($($int:ty),+) => {
        $(
            impl CellType for $int {
                const KIND: CellKind = CellKind::Integer;

                fn to_cell(&self) -> CellValue {
                    match i64::try_from(*self) {
                        Ok(i) => CellValue::Int(i),
                        // Beyond i64: keep every digit as text
                        Err(_) => CellValue::Text(self.to_string()),
                    }
                }

                fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
                    let wide = integer_from_cell(value, stringify!($int))?;
                    <$int>::try_from(wide).map_err(|_| ConversionError::OutOfRange {
                        value: wide.to_string(),
                        target: stringify!($int),
                    })
                }
            }
        )+
    };
}

integer_cell_type!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

fn float_from_cell(value: &CellValue) -> Result<f64, ConversionError> {
    match value {
        CellValue::Number(n) => Ok(*n),
        CellValue::Int(i) => Ok(*i as f64),
        CellValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ConversionError::incompatible(CellKind::Float, value.describe())),
        _ => Err(ConversionError::incompatible(CellKind::Float, value.describe())),
    }
}

impl CellType for f64 {
    const KIND: CellKind = CellKind::Float;

    fn to_cell(&self) -> CellValue {
        CellValue::Number(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        float_from_cell(value)
    }
}

impl CellType for f32 {
    const KIND: CellKind = CellKind::Float;

    fn to_cell(&self) -> CellValue {
        CellValue::Number(f64::from(*self))
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        let wide = float_from_cell(value)?;
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(ConversionError::OutOfRange {
                value: wide.to_string(),
                target: "f32",
            });
        }
        Ok(wide as f32)
    }
}

const DATETIME_TEXT_FORMATS: [&str; 4] = [
    DATETIME_FORMAT,
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

impl CellType for NaiveDateTime {
    const KIND: CellKind = CellKind::DateTime;

    fn to_cell(&self) -> CellValue {
        CellValue::DateTime(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        let incompatible = || ConversionError::incompatible(Self::KIND, value.describe());
        match value {
            CellValue::DateTime(dt) => Ok(*dt),
            CellValue::Date(d) => d.and_hms_opt(0, 0, 0).ok_or_else(incompatible),
            CellValue::Number(n) => serial_to_datetime(*n).ok_or_else(incompatible),
            CellValue::Int(i) => serial_to_datetime(*i as f64).ok_or_else(incompatible),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                DATETIME_TEXT_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                    .or_else(|| {
                        NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                            .ok()
                            .and_then(|d| d.and_hms_opt(0, 0, 0))
                    })
                    .ok_or_else(incompatible)
            }
            _ => Err(incompatible()),
        }
    }
}

impl CellType for NaiveDate {
    const KIND: CellKind = CellKind::Date;

    fn to_cell(&self) -> CellValue {
        CellValue::Date(*self)
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        match value {
            CellValue::Date(d) => Ok(*d),
            CellValue::Text(s) => match NaiveDate::parse_from_str(s.trim(), DATE_FORMAT) {
                Ok(d) => Ok(d),
                Err(_) => NaiveDateTime::from_cell(value)
                    .map(|dt| dt.date())
                    .map_err(|_| ConversionError::incompatible(Self::KIND, value.describe())),
            },
            _ => NaiveDateTime::from_cell(value)
                .map(|dt| dt.date())
                .map_err(|_| ConversionError::incompatible(Self::KIND, value.describe())),
        }
    }
}

impl<T: CellType> CellType for Option<T> {
    const KIND: CellKind = T::KIND;

    fn to_cell(&self) -> CellValue {
        match self {
            Some(inner) => inner.to_cell(),
            None => CellValue::Empty,
        }
    }

    fn from_cell(value: &CellValue) -> Result<Self, ConversionError> {
        if value.is_empty() {
            Ok(None)
        } else {
            T::from_cell(value).map(Some)
        }
    }
}
