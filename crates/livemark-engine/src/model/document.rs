use super::{
    block::{Block, BlockId},
    kind::BlockKind,
};

/// An ordered, never-empty sequence of blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A document holding one empty `Normal` block.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::new(BlockKind::Normal)],
        }
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::new();
        }
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    /// Inserts a block, clamping `index` to the end.
    pub fn insert(&mut self, index: usize, block: Block) {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
    }

    /// Removes a block unless it is the last one left.
    pub fn remove(&mut self, index: usize) -> Option<Block> {
        if self.blocks.len() <= 1 || index >= self.blocks.len() {
            return None;
        }
        Some(self.blocks.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}

impl FromIterator<Block> for Document {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self::from_blocks(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_still_has_a_block() {
        let doc = Document::from_blocks(vec![]);
        assert_eq!(doc.len(), 1);
        assert!(!doc.is_empty());
        assert_eq!(doc.blocks()[0].kind(), BlockKind::Normal);
    }

    #[test]
    fn last_block_cannot_be_removed() {
        let mut doc = Document::new();
        assert!(doc.remove(0).is_none());

        doc.insert(99, Block::with_text(BlockKind::Quote, "q"));
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.remove(1).map(|b| b.kind()), Some(BlockKind::Quote));
    }

    #[test]
    fn position_by_id() {
        let a = Block::with_text(BlockKind::Normal, "a");
        let b = Block::with_text(BlockKind::Normal, "b");
        let id = b.id();
        let doc: Document = [a, b].into_iter().collect();
        assert_eq!(doc.position(id), Some(1));
        assert_eq!(doc.position(BlockId::new()), None);
    }
}
