// SPDX-License-Identifier: Apache-2.0

pub mod cut;
pub mod enumerate;
pub mod multi_output;

pub use cut::{Cut, CutSet};
pub use enumerate::{CutEnumerator, EnumerationStats};
pub use multi_output::{
    aggregate_cuts, multi_output_cuts, CutAggregation, MultiOutputCutEntry, MultiOutputCutParams,
    MultiOutputCutReport,
};
