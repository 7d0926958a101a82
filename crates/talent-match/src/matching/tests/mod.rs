mod common;
mod recency;
mod technical;
