pub mod csv_table;
pub mod matcher;
pub mod sources;

pub use csv_table::{CsvTable, read_csv_table};
pub use matcher::ChildIndex;
pub use sources::load_child_index;
