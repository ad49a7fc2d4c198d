pub mod algebra;
pub mod analyzer;
pub mod diagram;

pub use analyzer::KinshipAnalyzer;
pub use diagram::AncestorDiagram;
