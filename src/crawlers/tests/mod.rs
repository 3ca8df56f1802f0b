mod fake;
mod pipeline_tests;
