pub mod props_examples;
