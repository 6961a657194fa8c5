mod failures;
mod merging;
