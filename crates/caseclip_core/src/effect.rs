#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run the extract-and-save pipeline for fresh clipboard content.
    ProcessContent { content: String },
}
