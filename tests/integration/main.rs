//! Integration tests for the public rendering API.

mod helpers;

mod color_test;
mod console_test;
mod live_test;
mod style_test;
mod text_test;
