use crate::program::SymbolId;
use crate::reflection::ReflectionId;
use thiserror::Error;

/// Errors raised while assembling a project or symbol table from a
/// serialized document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("reflection {0} is declared more than once")]
    DuplicateReflection(ReflectionId),
    #[error("symbol {0} is declared more than once")]
    DuplicateSymbol(SymbolId),
    #[error("declaration of symbol {symbol} names an empty file path")]
    EmptyDeclarationPath { symbol: SymbolId },
}
