use crate::table::Table;

/// Default name of the library column
pub const DEFAULT_LIBRARY_COLUMN: &str = "Lib";

/// Set `column` to the library identifier in every row
pub fn tag_library(table: Table, column: &str, library: &str) -> Table {
    let values = vec![library.to_owned(); table.n_rows()];
    table.set_column(column, values)
}
