pub mod bridge_pattern;
