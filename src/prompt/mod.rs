// Declare submodules
mod exemplars;
mod selection;

pub use exemplars::{Exemplar, EXEMPLARS};
pub use selection::{date_selection_prompt, SELECTION_RULES};
