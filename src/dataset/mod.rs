pub mod case;
pub mod outputs;
pub mod run_config;
pub mod table;

pub use case::{TrainingCase, validate_cases};
pub use outputs::{write_outputs, save_outputs};
pub use run_config::RunConfig;
pub use table::{CaseFiles, load_table, read_table};
