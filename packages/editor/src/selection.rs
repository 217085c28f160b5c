//! Section/block selection
//!
//! At most one section is selected, and at most one block within it.
//! Selection is view state only: it never touches the document.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    section: Option<String>,
    block: Option<String>,
}

impl Selection {
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn block(&self) -> Option<&str> {
        self.block.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.section.is_none()
    }

    /// Select a section. Any block selection is cleared.
    pub fn select_section(&mut self, section_id: Option<String>) {
        self.section = section_id;
        self.block = None;
    }

    /// Select a block and its owning section
    pub fn select_block(&mut self, section_id: impl Into<String>, block_id: impl Into<String>) {
        self.section = Some(section_id.into());
        self.block = Some(block_id.into());
    }

    pub fn clear_block(&mut self) {
        self.block = None;
    }

    pub fn clear(&mut self) {
        self.section = None;
        self.block = None;
    }
}
