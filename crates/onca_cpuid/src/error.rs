use core::fmt;

/// CPUID error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// The host architecture has no identification instruction, contains the name of the architecture
    UnsupportedPlatform(&'static str),
    /// The processor does not report the leaf that is needed
    UnsupportedLeaf { leaf: u32, max_leaf: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedPlatform(arch)          => f.write_fmt(format_args!("CPUID is not available on the '{arch}' architecture")),
            Error::UnsupportedLeaf { leaf, max_leaf } => f.write_fmt(format_args!("CPUID leaf 0x{leaf:X} is not supported, the processor only reports leaves up to 0x{max_leaf:X}")),
        }
    }
}

impl std::error::Error for Error {
}

pub type Result<T> = core::result::Result<T, Error>;
