//! Typed indices into the symbol arena.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
        pub struct $name(pub u32);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub(crate) fn from_index(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

define_id!(
    /// Index of a `LabelSymbol`.
    LabelId
);
define_id!(
    /// Index of a `VariableSymbol`.
    VariableId
);
define_id!(
    /// Index of a `ParameterSymbol`.
    ParameterId
);
define_id!(
    /// Index of a `FunctionSymbol`.
    FunctionId
);
define_id!(
    /// Index of an `ExpressionSymbol`.
    ExpressionId
);
define_id!(
    /// Index of a `StatementSymbol`.
    StatementId
);
