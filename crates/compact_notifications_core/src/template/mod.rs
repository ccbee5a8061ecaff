//! Declarative email documents: an arena of typed blocks keyed by id, with a
//! distinguished `root` layout whose `childrenIds` fix the rendering order.

mod render;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use render::{render, RenderError};

pub const ROOT_BLOCK_ID: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

impl Padding {
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockData<P> {
    #[serde(default)]
    pub style: BlockStyle,
    pub props: P,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutData {
    pub backdrop_color: String,
    pub canvas_color: String,
    pub text_color: String,
    pub font_family: String,
    #[serde(default)]
    pub children_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingProps {
    pub text: String,
    pub level: HeadingLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextProps {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProps {
    pub url: String,
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub children_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnsProps {
    pub columns_gap: u32,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerProps {
    pub line_color: String,
    pub line_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Block {
    EmailLayout(LayoutData),
    Heading(BlockData<HeadingProps>),
    Text(BlockData<TextProps>),
    Image(BlockData<ImageProps>),
    ColumnsContainer(BlockData<ColumnsProps>),
    Divider(BlockData<DividerProps>),
}

impl Block {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::EmailLayout(_) => "EmailLayout",
            Self::Heading(_) => "Heading",
            Self::Text(_) => "Text",
            Self::Image(_) => "Image",
            Self::ColumnsContainer(_) => "ColumnsContainer",
            Self::Divider(_) => "Divider",
        }
    }

    pub fn heading(text: impl Into<String>, level: HeadingLevel, style: BlockStyle) -> Self {
        Self::Heading(BlockData {
            style,
            props: HeadingProps {
                text: text.into(),
                level,
            },
        })
    }

    pub fn text(text: impl Into<String>, style: BlockStyle) -> Self {
        Self::Text(BlockData {
            style,
            props: TextProps { text: text.into() },
        })
    }

    pub fn divider(style: BlockStyle) -> Self {
        Self::Divider(BlockData {
            style,
            props: DividerProps {
                line_color: "#E0E0E0".to_string(),
                line_height: 1,
            },
        })
    }
}

/// Block arena. Appending consumes the document and returns the next value;
/// every appended block gets a fresh id, so identical blocks never collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailDocument {
    blocks: BTreeMap<String, Block>,
}

impl EmailDocument {
    pub fn new(layout: LayoutData) -> Self {
        Self {
            blocks: BTreeMap::from([(ROOT_BLOCK_ID.to_string(), Block::EmailLayout(layout))]),
        }
    }

    pub fn from_blocks(blocks: BTreeMap<String, Block>) -> Self {
        Self { blocks }
    }

    pub fn block(&self, id: &str) -> Option<&Block> {
        self.blocks.get(id)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Ordered ids directly under the root layout.
    pub fn root_children(&self) -> &[String] {
        match self.blocks.get(ROOT_BLOCK_ID) {
            Some(Block::EmailLayout(layout)) => &layout.children_ids,
            _ => &[],
        }
    }

    /// Root-level blocks in rendering order, skipping dangling ids.
    pub fn root_blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.root_children()
            .iter()
            .filter_map(|id| self.blocks.get(id))
    }

    /// Appends `block` to the end of the root layout.
    pub fn append(self, block: Block) -> Self {
        let (mut document, id) = self.insert_detached(block);
        if let Some(Block::EmailLayout(layout)) = document.blocks.get_mut(ROOT_BLOCK_ID) {
            layout.children_ids.push(id);
        }
        document
    }

    /// Appends a columns container whose columns hold the given blocks.
    pub fn append_columns(self, columns: Vec<Vec<Block>>, style: BlockStyle) -> Self {
        let mut document = self;
        let mut column_ids = Vec::with_capacity(columns.len());
        for column in columns {
            let mut children_ids = Vec::with_capacity(column.len());
            for block in column {
                let (next, id) = document.insert_detached(block);
                document = next;
                children_ids.push(id);
            }
            column_ids.push(Column { children_ids });
        }
        document.append(Block::ColumnsContainer(BlockData {
            style,
            props: ColumnsProps {
                columns_gap: 16,
                columns: column_ids,
            },
        }))
    }

    /// Stores a block without linking it from the root.
    pub fn insert_detached(mut self, block: Block) -> (Self, String) {
        let id = self.next_block_id();
        self.blocks.insert(id.clone(), block);
        (self, id)
    }

    fn next_block_id(&self) -> String {
        // Documents from `from_blocks` or JSON may use sparse ids, so step past any taken one.
        let mut suffix = self.blocks.len();
        loop {
            let id = format!("block-{suffix:04}");
            if !self.blocks.contains_key(&id) {
                return id;
            }
            suffix += 1;
        }
    }
}
