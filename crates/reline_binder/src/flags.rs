bitflags::bitflags! {
    /// Restrictions applied while binding an expression.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BindingFlags: u8 {
        const NONE                  = 0;
        /// Variables and parameters are rejected.
        const NO_VARIABLES          = 1 << 0;
        /// Function references and invocations are rejected.
        const NO_FUNCTIONS          = 1 << 1;
        /// Label references count as constants.
        const LABELS_AS_CONSTANT    = 1 << 2;

        /// The flags a function's line range is bound with.
        const FUNCTION_RANGE = Self::NO_VARIABLES.bits()
            | Self::NO_FUNCTIONS.bits()
            | Self::LABELS_AS_CONSTANT.bits();
    }
}
