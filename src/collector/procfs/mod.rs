//! `/proc` filesystem parsing.

mod parser;

pub use parser::{CpuTimes, MemInfo, ParseError, parse_cpu_times, parse_meminfo};
