pub mod fasta;
pub mod sequence;
pub mod stockholm;

pub use sequence::QuerySequence;
