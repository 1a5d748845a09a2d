pub mod ask;
pub mod rules;
pub mod serve;
