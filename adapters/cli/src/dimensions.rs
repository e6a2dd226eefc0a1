use std::{error::Error, fmt, str::FromStr};

/// Size of a randomly generated grid, written `ROWSxCOLS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GridSize {
    /// Number of rows, the grid's height.
    pub(crate) rows: usize,
    /// Number of columns, the grid's width.
    pub(crate) columns: usize,
}

impl FromStr for GridSize {
    type Err = DimensionsError;

    fn from_str(dimensions: &str) -> Result<Self, Self::Err> {
        let invalid = || DimensionsError(dimensions.to_owned());
        let (rows, columns) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

        let rows = rows.trim().parse::<usize>().map_err(|_| invalid())?;
        let columns = columns.trim().parse::<usize>().map_err(|_| invalid())?;

        if rows == 0 || columns == 0 {
            return Err(invalid());
        }

        Ok(Self { rows, columns })
    }
}

/// Grid dimensions that could not be parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DimensionsError(String);

impl fmt::Display for DimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not parse grid dimensions '{}', expected ROWSxCOLS with both sides positive",
            self.0
        )
    }
}

impl Error for DimensionsError {}
