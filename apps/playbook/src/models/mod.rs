pub mod form;
pub mod playbook;

pub use form::{FormInput, GenerateForm, Priority, QueryType, Tone};
pub use playbook::{FailureKind, GenerationOutcome, SpeechStatus};
