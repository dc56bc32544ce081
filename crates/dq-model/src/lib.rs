pub mod code_set;
pub mod codes;
pub mod correction;
pub mod error;
pub mod field;
pub mod options;
pub mod outcome;
pub mod record;
pub mod status;

pub use code_set::CodeSet;
pub use codes::{ErrorCode, RuleCategory};
pub use correction::CorrectionResult;
pub use error::ModelError;
pub use field::{Field, FieldGroup};
pub use options::PipelineOptions;
pub use outcome::{FieldReport, GroupOutcome, RecordOutcome};
pub use record::CustomerRecord;
pub use status::{FieldStatus, OverallStatus};
