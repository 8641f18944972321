//! End-to-end crawl tests over a mock HTTP server

mod crawl_tests;
