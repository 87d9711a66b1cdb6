pub mod completion;
pub mod message;
pub mod settings;
pub mod submission;

pub use completion::*;
pub use message::*;
pub use settings::*;
pub use submission::*;
