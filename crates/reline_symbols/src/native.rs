//! Built-in functions.
//!
//! Natives are looked up before user functions, so a user function named
//! `Write` can never be invoked.

use crate::types::SymbolType;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum NativeOpcode {
    Write,
    ReadLine,
    String,
    ParseInt,
    Clamp,
    Min,
    Max,
    StringIndex,
    Ascii,
}

#[derive(Debug, PartialEq, Eq)]
pub struct NativeFunctionSymbol {
    pub opcode: NativeOpcode,
    pub identifier: &'static str,
    pub arity: usize,
    pub result: SymbolType,
}

macro_rules! native {
    ($opcode:ident, $arity:expr, $result:ident) => {
        NativeFunctionSymbol {
            opcode: NativeOpcode::$opcode,
            identifier: stringify!($opcode),
            arity: $arity,
            result: SymbolType::$result,
        }
    };
}

/// Indexed by `NativeOpcode`.
pub static NATIVE_FUNCTIONS: [NativeFunctionSymbol; 9] = [
    native!(Write, 1, Any),
    native!(ReadLine, 0, String),
    native!(String, 1, String),
    native!(ParseInt, 1, Number),
    native!(Clamp, 3, Number),
    native!(Min, 2, Number),
    native!(Max, 2, Number),
    native!(StringIndex, 2, String),
    native!(Ascii, 1, Number),
];

impl NativeFunctionSymbol {
    /// Exact-case lookup by identifier.
    pub fn lookup(identifier: &str) -> Option<&'static NativeFunctionSymbol> {
        NATIVE_FUNCTIONS.iter().find(|f| f.identifier == identifier)
    }

    pub fn get(opcode: NativeOpcode) -> &'static NativeFunctionSymbol {
        &NATIVE_FUNCTIONS[opcode as usize]
    }
}

impl NativeOpcode {
    pub fn identifier(self) -> &'static str {
        NativeFunctionSymbol::get(self).identifier
    }
}

impl fmt::Display for NativeOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}
