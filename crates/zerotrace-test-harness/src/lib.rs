//! zerotrace assertion harness
//!
//! A minimal registration/execution mechanism for named predicates. Cases run
//! sequentially in registration order; each failure is caught and recorded
//! against its own case so one bad predicate never aborts the batch.

pub mod assertions;
pub mod harness;
pub mod reporters;

pub use assertions::{ensure, ensure_contains, AssertionError, AssertionResult};
pub use harness::{Harness, TestCase, TestResult, TestRun, TestSummary};
pub use reporters::{ReportFormat, TestReport};
