// Integration tests for the catalog browser.
// Drives the public API against scripted providers.


mod content_tests;
mod preview_tests;
mod tree_tests;
