pub mod formatter;

pub use formatter::print_output_group;
