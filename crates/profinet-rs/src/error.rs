// crates/profinet-rs/src/error.rs

use alloc::string::String;
use core::fmt;

/// Errors raised by the binary field codec when an access does not fit the
/// buffer or the field shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The byte range `[byte_offset, byte_offset + width)` is not inside the buffer.
    OutOfBounds {
        byte_offset: usize,
        width: usize,
        len: usize,
    },
    /// A bit offset outside 0..=7.
    InvalidBitOffset(u8),
    /// A bit length outside 1..=8.
    InvalidBitLength(u8),
    /// `bit_offset + bit_length` exceeds the 8 bits of a byte.
    BitSpanOverflow { bit_offset: u8, bit_length: u8 },
    /// The value needs more bits than the field provides.
    ValueTooWide { value: u8, bit_length: u8 },
    /// A VisibleString contained a non-ASCII byte.
    NonAscii,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                byte_offset,
                width,
                len,
            } => write!(
                f,
                "access of {} byte(s) at offset {} exceeds buffer of {} byte(s)",
                width, byte_offset, len
            ),
            Self::InvalidBitOffset(v) => write!(f, "bit offset {} is outside 0..=7", v),
            Self::InvalidBitLength(v) => write!(f, "bit length {} is outside 1..=8", v),
            Self::BitSpanOverflow {
                bit_offset,
                bit_length,
            } => write!(
                f,
                "bit offset {} plus bit length {} exceeds one byte",
                bit_offset, bit_length
            ),
            Self::ValueTooWide { value, bit_length } => {
                write!(f, "value {} does not fit in {} bit(s)", value, bit_length)
            }
            Self::NonAscii => write!(f, "VisibleString contains non-ASCII data"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

/// Errors that abort loading a device description document.
///
/// No partial model is ever returned alongside one of these; the device
/// type described by the document must be treated as unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document is not well-formed XML or does not match the expected structure.
    Xml(String),
    /// The document could not be read.
    Io(String),
    /// A required XML element was missing (e.g., DeviceAccessPointList).
    MissingElement { element: &'static str },
    /// A required attribute was missing or empty. `id` names the owning item when known.
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        id: String,
    },
    /// An attribute had an invalid format (e.g., a non-numeric `ByteOffset`).
    InvalidAttributeFormat {
        attribute: &'static str,
        value: String,
    },
    /// A parameter record without any `Ref` field.
    EmptyParameterBlock { module: String, record_index: u16 },
    /// A field whose byte range does not lie inside the record's declared length.
    FieldOutOfRange { field: String, record_index: u16 },
    /// A `DataType` outside the supported set.
    UnknownDataType(String),
    /// A `ValueItemTarget` that names no `ValueItem`.
    UnknownValueItem(String),
    /// A field whose optional attributes do not match its data type.
    InvalidFieldShape { field: String, reason: &'static str },
    /// Two modules or access points share the same `ID`.
    DuplicateId(String),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml(e) => write!(f, "XML parsing error: {}", e),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::MissingElement { element } => {
                write!(f, "Missing required XML element: {}", element)
            }
            Self::MissingAttribute {
                element,
                attribute,
                id,
            } => {
                if id.is_empty() {
                    write!(f, "Missing required attribute {}@{}", element, attribute)
                } else {
                    write!(
                        f,
                        "Missing required attribute {}@{} (on '{}')",
                        element, attribute, id
                    )
                }
            }
            Self::InvalidAttributeFormat { attribute, value } => {
                write!(f, "Invalid format for attribute {}: '{}'", attribute, value)
            }
            Self::EmptyParameterBlock {
                module,
                record_index,
            } => write!(
                f,
                "Parameter record {} of '{}' defines no fields",
                record_index, module
            ),
            Self::FieldOutOfRange {
                field,
                record_index,
            } => write!(
                f,
                "Field '{}' lies outside the declared length of record {}",
                field, record_index
            ),
            Self::UnknownDataType(t) => write!(f, "Unsupported data type: {}", t),
            Self::UnknownValueItem(id) => write!(f, "Unknown value item: {}", id),
            Self::InvalidFieldShape { field, reason } => {
                write!(f, "Invalid field '{}': {}", field, reason)
            }
            Self::DuplicateId(id) => write!(f, "Duplicate module ID: {}", id),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchemaError {}

/// Why a single field could not be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeFailure {
    /// The codec setter refused the value.
    Codec(CodecError),
    /// The value does not fit the field's data type.
    TypeMismatch { expected: &'static str },
    /// A string was longer than the VisibleString field.
    StringTooLong { length: usize, max: usize },
    /// A textual value could not be read as a number.
    NotNumeric(String),
}

impl fmt::Display for EncodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "{}", e),
            Self::TypeMismatch { expected } => write!(f, "expected a value of type {}", expected),
            Self::StringTooLong { length, max } => write!(
                f,
                "string of {} byte(s) exceeds field length {}",
                length, max
            ),
            Self::NotNumeric(s) => write!(f, "'{}' is not a number", s),
        }
    }
}

impl From<CodecError> for EncodeFailure {
    fn from(e: CodecError) -> Self {
        EncodeFailure::Codec(e)
    }
}

/// The single error type returned by schema loading, transcoding and the
/// safety parameter path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The device description could not be loaded.
    Schema(SchemaError),
    /// The buffer is shorter than the parameter record's declared length.
    InsufficientData { required: usize, actual: usize },
    /// A field name that does not exist in the parameter record.
    FieldNotFound(String),
    /// A display text that is not part of the field's value mapping.
    InvalidSymbol { field: String, symbol: String },
    /// A field the device description marks as not changeable.
    ReadOnly(String),
    /// A numeric value outside the field's allowed values.
    RangeViolation { field: String, value: i64 },
    /// A field could not be written.
    Encode { field: String, reason: EncodeFailure },
    /// A raw codec access failed outside of a named field.
    Bounds(CodecError),
    /// An encode request without any values.
    EmptyInput,
    /// A safety attribute that does not exist, is not writable, or a module without safety parameters.
    UnsupportedParameter(String),
    /// A safety attribute value outside its permitted range.
    SafetyRange {
        attribute: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    /// The external record or attribute store reported a failure.
    Store(&'static str),
}

/// Result alias used throughout the crate.
pub type ParamResult<T> = Result<T, ParamError>;

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(e) => write!(f, "Schema error: {}", e),
            Self::InsufficientData { required, actual } => write!(
                f,
                "Buffer holds {} byte(s) but the record requires {}",
                actual, required
            ),
            Self::FieldNotFound(name) => write!(f, "Field '{}' not found", name),
            Self::InvalidSymbol { field, symbol } => {
                write!(f, "'{}' is not a valid value for field '{}'", symbol, field)
            }
            Self::ReadOnly(field) => write!(f, "Field '{}' is not changeable", field),
            Self::RangeViolation { field, value } => {
                write!(f, "Value {} is outside the allowed range of '{}'", value, field)
            }
            Self::Encode { field, reason } => {
                write!(f, "Failed to encode field '{}': {}", field, reason)
            }
            Self::Bounds(e) => write!(f, "Bounds error: {}", e),
            Self::EmptyInput => write!(f, "No values were supplied"),
            Self::UnsupportedParameter(name) => {
                write!(f, "Unsupported safety parameter: {}", name)
            }
            Self::SafetyRange {
                attribute,
                value,
                min,
                max,
            } => write!(
                f,
                "{} = {} is outside the permitted range {}..={}",
                attribute, value, min, max
            ),
            Self::Store(s) => write!(f, "Store error: {}", s),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamError {}

// --- From Implementations for Error Conversion ---

impl From<SchemaError> for ParamError {
    fn from(e: SchemaError) -> Self {
        ParamError::Schema(e)
    }
}

impl From<CodecError> for ParamError {
    fn from(e: CodecError) -> Self {
        ParamError::Bounds(e)
    }
}

impl From<&'static str> for ParamError {
    fn from(s: &'static str) -> Self {
        ParamError::Store(s)
    }
}
