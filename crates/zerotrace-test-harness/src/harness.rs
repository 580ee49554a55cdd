//! Test registration and execution.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::assertions::AssertionResult;

type Predicate = Box<dyn Fn() -> AssertionResult>;

/// A named predicate.
pub struct TestCase {
    name: String,
    predicate: Predicate,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn execute(&self) -> Result<(), String> {
        install_case_panic_hook();
        IN_CASE.with(|flag| flag.set(true));
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.predicate)()));
        IN_CASE.with(|flag| flag.set(false));

        match outcome {
            Ok(Ok(())) => Ok(()),
            Ok(Err(assertion)) => Err(assertion.message),
            Err(payload) => {
                let location = PANIC_LOCATION.with(|slot| slot.borrow_mut().take());
                Err(panic_message(payload.as_ref(), location.as_deref()))
            }
        }
    }
}

thread_local! {
    static IN_CASE: Cell<bool> = const { Cell::new(false) };
    static PANIC_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Panics raised inside a case are reported through its `TestResult` only.
/// Panics anywhere else still reach the previously installed hook.
fn install_case_panic_hook() {
    static INSTALL: Once = Once::new();
    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if IN_CASE.with(Cell::get) {
                let location = info.location().map(|l| format!("{}:{}", l.file(), l.line()));
                PANIC_LOCATION.with(|slot| *slot.borrow_mut() = location);
            } else {
                previous(info);
            }
        }));
    });
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send), location: Option<&str>) -> String {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string payload".to_string()
    };

    match location {
        Some(location) => format!("panicked at {location}: {detail}"),
        None => format!("panicked: {detail}"),
    }
}

/// Outcome of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub error_message: Option<String>,
    pub duration_ms: u64,
}

/// Aggregate counts. `total == passed + failed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl TestSummary {
    fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.total += 1;
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} passed", self.passed, self.total)
    }
}

/// Results of one harness run, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRun {
    pub summary: TestSummary,
    pub results: Vec<TestResult>,
}

impl TestRun {
    pub fn failures(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Ordered collection of test cases.
#[derive(Debug, Default)]
pub struct Harness {
    cases: Vec<TestCase>,
}

impl Harness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a case. Names need not be unique; duplicates all run.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn() -> AssertionResult + 'static,
    {
        self.cases.push(TestCase {
            name: name.into(),
            predicate: Box::new(predicate),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    /// Run every case in registration order.
    pub fn run_all(&self) -> TestRun {
        self.run_with(|_| {})
    }

    /// Run every case, handing each result to `on_result` as soon as it is known.
    pub fn run_with<F>(&self, mut on_result: F) -> TestRun
    where
        F: FnMut(&TestResult),
    {
        let mut run = TestRun {
            summary: TestSummary::default(),
            results: Vec::with_capacity(self.cases.len()),
        };

        for case in &self.cases {
            let started = Instant::now();
            let outcome = case.execute();
            let duration_ms = started.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(()) => {
                    tracing::debug!(test = %case.name, "passed");
                    TestResult {
                        name: case.name.clone(),
                        passed: true,
                        error_message: None,
                        duration_ms,
                    }
                }
                Err(message) => {
                    tracing::info!(test = %case.name, error = %message, "failed");
                    TestResult {
                        name: case.name.clone(),
                        passed: false,
                        error_message: Some(message),
                        duration_ms,
                    }
                }
            };

            run.summary.record(result.passed);
            on_result(&result);
            run.results.push(result);
        }

        tracing::debug!(
            passed = run.summary.passed,
            failed = run.summary.failed,
            total = run.summary.total,
            "harness run complete"
        );
        run
    }
}
