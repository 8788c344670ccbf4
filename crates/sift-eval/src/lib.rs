//! # sift-eval
//!
//! Closes the retrieval loop: scores a configuration against a labeled
//! test set (utility-weighted DCG with negative grades for distractors),
//! compares configurations, and promotes a candidate to active only when
//! it does not regress the aggregate metric.

pub mod compare;
pub mod deploy;
pub mod evaluator;
pub mod udcg;

pub use compare::{compare_configs, ComparisonReport, FieldDiff, QueryDelta};
pub use deploy::{DeployOutcome, Deployer};
pub use evaluator::Evaluator;
