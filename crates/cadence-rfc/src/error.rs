use thiserror::Error;

use crate::rfc::recurrence::core::StructuralError;
use crate::rfc::recurrence::parse::GrammarError;
use crate::rfc::recurrence::timezone::ConversionError;

/// Recurrence parsing, validation and conversion errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("Grammar error: {0}")]
    GrammarError(#[from] GrammarError),

    #[error("Structural error: {0}")]
    StructuralError(#[from] StructuralError),

    #[error("Timezone conversion error: {0}")]
    ConversionError(#[from] ConversionError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
