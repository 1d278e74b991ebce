use std::convert::Infallible;

use crate::error::ExtractError;
use crate::extract::{Convention, Extraction, extract};
use crate::parallel_stride::run_parallel_stride;
use crate::source::BundleInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    #[default]
    AbortOnFirst,
    KeepGoing,
}

/// Extracts every bundle, stopping at the first failure.
pub fn extract_all(
    inputs: Vec<BundleInput>,
    convention: &Convention,
    concurrency: usize,
) -> Result<Vec<Extraction>, ExtractError> {
    run_parallel_stride(inputs, concurrency, |input, _index| {
        extract(input, convention)
    })
}

/// Extracts every bundle independently; one result per input, in input order.
pub fn extract_each(
    inputs: Vec<BundleInput>,
    convention: &Convention,
    concurrency: usize,
) -> Vec<Result<Extraction, ExtractError>> {
    let outcome = run_parallel_stride(inputs, concurrency, |input, _index| {
        Ok::<_, Infallible>(extract(input, convention))
    });
    match outcome {
        Ok(results) => results,
        Err(never) => match never {},
    }
}

pub fn extract_with_policy(
    inputs: Vec<BundleInput>,
    convention: &Convention,
    concurrency: usize,
    policy: FailurePolicy,
) -> Vec<Result<Extraction, ExtractError>> {
    match policy {
        FailurePolicy::AbortOnFirst => match extract_all(inputs, convention, concurrency) {
            Ok(extractions) => extractions.into_iter().map(Ok).collect(),
            Err(err) => vec![Err(err)],
        },
        FailurePolicy::KeepGoing => extract_each(inputs, convention, concurrency),
    }
}
