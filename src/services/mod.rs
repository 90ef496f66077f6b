pub mod excel;
pub mod export;
pub mod normalizer;
pub mod pipeline;
pub mod pivot;
pub mod ranking;
pub mod scoring;

pub use export::write_outputs;
pub use pipeline::RankingPipeline;
pub use ranking::RankingTable;
