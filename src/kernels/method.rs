//! Line interpretation selector.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Which matrix line produces output element `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Element `i` is row `i` dotted with the input (`A · v`).
    RowMajor,
    /// Element `i` is column `i` dotted with the input (`Aᵀ · v`).
    ColumnMajor,
}

impl Method {
    /// The numeric selector used on the command line.
    pub fn code(self) -> u8 {
        match self {
            Method::RowMajor => 1,
            Method::ColumnMajor => 2,
        }
    }
}

impl TryFrom<i64> for Method {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Method::RowMajor),
            2 => Ok(Method::ColumnMajor),
            other => Err(Error::InvalidArgument(format!(
                "method must be 1 (row-major) or 2 (column-major), got {}",
                other
            ))),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("method {:?} is not an integer", s)))?;
        Method::try_from(code)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
