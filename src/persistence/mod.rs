// * Persistence: review records, the Record Assembler and the CSV record store
// * Storage failures are surfaced to the caller; a missing file choice is a cancellation

pub mod csv_store;
pub mod record;

// * Re-exports for convenient access
pub use csv_store::{
    load, read_records, read_records_from, read_table, read_table_from, save, write_records,
    write_records_to, RecordTable, Selection, StorageError,
};
pub use record::{current_timestamp, AssemblerConfig, RecordAssembler, ReviewRecord};
