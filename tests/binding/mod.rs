pub mod cardinality;
pub mod nested;
