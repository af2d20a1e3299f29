pub mod evolution_engine;
pub mod genome;
pub mod init;
pub mod operators;
pub mod progress;

pub use evolution_engine::{EvolutionEngine, ProgressCallback};
pub use genome::{Allele, Genome};
pub use init::init_pop;
pub use operators::{
    mutate, niche, niched_crossover, niched_selection, standard_selection, tournament_selection,
};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, ProgressMessage};
