use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::cli::GlobalArgs;

#[derive(Debug)]
pub struct RuntimeContext {
    pub json: bool,
    pub cwd: PathBuf,
    /// Evaluation date for every forecast in this run.
    pub today: NaiveDate,
}

impl RuntimeContext {
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            json: global.json,
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            today: global
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        }
    }
}
