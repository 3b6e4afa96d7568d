use crate::bench::{BenchmarkOptions, TargetPredicate};
use crate::generate::GenerationPlan;
use crate::loader::LoadOptions;

/// One unit of work against the employees table.
#[derive(Debug, Clone)]
pub enum Command {
    CreateTable,
    ClearTable,
    /// Raw user input; validated when run.
    Add {
        full_name: String,
        birth_date: String,
        gender: String,
    },
    List,
    /// Generate `plan` and load it in batches. Creates the table first if needed.
    BulkLoad {
        plan: GenerationPlan,
        options: LoadOptions,
    },
    Benchmark {
        target: TargetPredicate,
        options: BenchmarkOptions,
    },
    Info,
}
