pub mod evolution_engine;
pub mod hall_of_fame;
pub mod node_set;
pub mod operators;
pub mod population;
pub mod program;
pub mod progress;

pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use hall_of_fame::{EliteProgram, EliteSummary, HallOfFame};
pub use node_set::{ConstantTerminal, NodeSet};
pub use population::{Individual, Population};
pub use program::{Function, Node, NodeVisitor, Program};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressMessage};
