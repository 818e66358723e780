pub mod assemble;
pub mod generate;
pub mod layouts;
pub mod outline;
pub mod select_layout;
