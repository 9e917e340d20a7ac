pub mod lifecycle;
pub mod seed;
pub mod stats;
pub mod transitions;
