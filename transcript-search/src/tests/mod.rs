pub mod search_tests;
