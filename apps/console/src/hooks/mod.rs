pub mod call_clock;
pub mod reveal;
