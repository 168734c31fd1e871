use std::error;
use std::fmt;
use std::result;

/// Failures reported by the removal operations of an `AvlSet<T>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A removal was requested on an empty tree.
    EmptyTree,
    /// No element equal to the requested value exists in the searched subtree.
    NotFound,
    /// A path led through or to a child that does not exist.
    InvalidPosition,
}

pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyTree => write!(f, "cannot remove from an empty tree"),
            Error::NotFound => write!(f, "could not locate a node containing that value"),
            Error::InvalidPosition => write!(f, "path does not lead to a node in the tree"),
        }
    }
}

impl error::Error for Error {}
