pub mod charset;
pub mod generator;
pub mod random;
pub mod shuffle;
pub mod strength;
pub mod ui;

pub use charset::CharClass;
pub use generator::{
    ErrorKind, GenerateError, GenerationRequest, generate, generate_password, generate_with,
};
pub use random::KeystreamRng;
pub use shuffle::shuffle;
pub use strength::{Strength, StrengthReport, evaluate};
