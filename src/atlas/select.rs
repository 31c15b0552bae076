/// The single piece of session state: which block the detail views target.
///
/// A requested name that is not in the dataset resolves to `AllBlocks`
/// (whole-region view), never an error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// Whole-region view; no detail panel.
    #[default]
    AllBlocks,
    /// Focus on one block, by name. Produced only for names present in
    /// the dataset (see `Atlas::select`).
    Block(String),
}

impl Selection {
    /// The focused block's name, if any.
    pub fn block_name(&self) -> Option<&str> {
        match self {
            Self::AllBlocks => None,
            Self::Block(name) => Some(name),
        }
    }
}
