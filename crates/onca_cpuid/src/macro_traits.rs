//! Contains traits implemented by the `onca_cpuid_macros` derives


/// Trait to get the number of elements in an enum
pub trait EnumCountT {
    /// Count or number of element in an enum
    const COUNT : usize;
}

/// Trait to get an enum from a given index
pub trait EnumFromIndexT: Sized {
    /// Try to convert an index to an enum
    fn from_idx(idx: usize) -> Option<Self>;

    /// Try to convert an index to an enum, if it couldn't convert it, return a default value
    fn from_idx_or(idx: usize, default: Self) -> Self;
}
