mod sale_tests;
mod token_tests;
