use std::path::Path;

use crate::error::LoadError;
use crate::records::RawTable;

/// Trait that every record source must implement.
pub trait RecordSource {
    /// Model name every row from this source is tagged with.
    fn model(&self) -> &str;

    /// Location of the underlying file, for logging.
    fn path(&self) -> &Path;

    /// Read the whole source. A missing file is `SourceMissing`; anything
    /// that prevents parsing is `SourceUnreadable`.
    fn read_table(&self) -> Result<RawTable, LoadError>;
}
