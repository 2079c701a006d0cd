pub mod codes;
pub mod decoder;
pub mod encoder;
pub mod frequency;
pub mod header;
pub mod processor;
pub mod tree;

pub use codes::{Code, CodeTable};
pub use frequency::FrequencyTable;
pub use processor::{HuffProcessor, DEBUG_HIGH, DEBUG_LOW};
pub use tree::{CodeTree, NodeId, NodeKind};
