//! Per-template email content. Every builder is a pure function of its inputs
//! and the notification settings.

pub mod cognito;
pub mod encumbrance;
pub mod ingest;
pub mod investigation;
pub mod privileges;
pub mod transactions;

use crate::settings::NotificationSettings;
use crate::template::{
    render, Block, BlockStyle, EmailDocument, FontWeight, HeadingLevel, ImageProps, LayoutData,
    Padding, RenderError, TextAlign, ROOT_BLOCK_ID,
};

pub const ENVIRONMENT_BANNER_PREFIX: &str = "This email was sent from a non-production environment";
pub const ENVIRONMENT_FOOTER_PREFIX: &str = "Non-production environment:";

const BODY_PADDING: Padding = Padding::new(8, 8, 24, 24);

/// Subject plus block tree, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailContent {
    pub subject: String,
    pub document: EmailDocument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

impl EmailContent {
    pub fn render(&self) -> Result<RenderedEmail, RenderError> {
        Ok(RenderedEmail {
            subject: self.subject.clone(),
            html: render(&self.document, ROOT_BLOCK_ID)?,
        })
    }
}

/// Base layout (banner, logo) on creation; footer on [`TemplateBuilder::finish`].
pub struct TemplateBuilder<'a> {
    settings: &'a NotificationSettings,
    document: EmailDocument,
}

impl<'a> TemplateBuilder<'a> {
    pub fn new(settings: &'a NotificationSettings) -> Self {
        let mut document = EmailDocument::new(LayoutData {
            backdrop_color: "#E9EFF9".to_string(),
            canvas_color: "#FFFFFF".to_string(),
            text_color: "#242424".to_string(),
            font_family: "MODERN_SANS".to_string(),
            children_ids: Vec::new(),
        });

        if !settings.is_production() {
            document = document.append(Block::text(
                format!(
                    "{ENVIRONMENT_BANNER_PREFIX} ({}). It is intended for testing only.",
                    settings.environment_name
                ),
                BlockStyle {
                    color: Some("#7A4C00".to_string()),
                    background_color: Some("#FFE8A3".to_string()),
                    font_weight: Some(FontWeight::Bold),
                    text_align: Some(TextAlign::Center),
                    padding: Some(Padding::new(12, 12, 24, 24)),
                    ..BlockStyle::default()
                },
            ));
        }

        let document = document.append(Block::Image(crate::template::BlockData {
            style: BlockStyle {
                text_align: Some(TextAlign::Center),
                padding: Some(Padding::new(40, 8, 68, 68)),
                ..BlockStyle::default()
            },
            props: ImageProps {
                url: settings.logo_url.clone(),
                alt: "Compact Connect Logo".to_string(),
                link_href: None,
                width: Some(200),
            },
        }));

        Self { settings, document }
    }

    pub fn settings(&self) -> &NotificationSettings {
        self.settings
    }

    pub fn block(self, block: Block) -> Self {
        Self {
            settings: self.settings,
            document: self.document.append(block),
        }
    }

    pub fn heading(self, text: impl Into<String>) -> Self {
        self.block(Block::heading(
            text,
            HeadingLevel::H1,
            BlockStyle {
                color: Some("#242424".to_string()),
                font_size: Some(22),
                text_align: Some(TextAlign::Center),
                padding: Some(Padding::new(28, 16, 24, 24)),
                ..BlockStyle::default()
            },
        ))
    }

    pub fn sub_heading(self, text: impl Into<String>) -> Self {
        self.block(Block::heading(
            text,
            HeadingLevel::H3,
            BlockStyle {
                font_size: Some(18),
                text_align: Some(TextAlign::Left),
                padding: Some(Padding::new(16, 4, 24, 24)),
                ..BlockStyle::default()
            },
        ))
    }

    pub fn body(self, text: impl Into<String>) -> Self {
        self.block(Block::text(
            text,
            BlockStyle {
                font_size: Some(16),
                text_align: Some(TextAlign::Left),
                padding: Some(BODY_PADDING),
                ..BlockStyle::default()
            },
        ))
    }

    pub fn centered(self, text: impl Into<String>) -> Self {
        self.block(Block::text(
            text,
            BlockStyle {
                font_size: Some(16),
                text_align: Some(TextAlign::Center),
                padding: Some(BODY_PADDING),
                ..BlockStyle::default()
            },
        ))
    }

    pub fn emphasis(self, text: impl Into<String>) -> Self {
        self.block(Block::text(
            text,
            BlockStyle {
                font_size: Some(16),
                font_weight: Some(FontWeight::Bold),
                padding: Some(BODY_PADDING),
                ..BlockStyle::default()
            },
        ))
    }

    /// One bullet per line in a single text block.
    pub fn list<I, S>(self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = items
            .into_iter()
            .map(|item| format!("\u{2022} {}", item.as_ref()))
            .collect::<Vec<_>>()
            .join("\n");
        self.body(text)
    }

    /// Two-column label/value rows, e.g. line items and totals.
    pub fn label_values(self, rows: &[(String, String)]) -> Self {
        let (labels, values): (Vec<_>, Vec<_>) = rows.iter().cloned().unzip();
        let cell = |lines: Vec<String>, align: TextAlign| {
            Block::text(
                lines.join("\n"),
                BlockStyle {
                    text_align: Some(align),
                    padding: Some(Padding::new(4, 4, 0, 0)),
                    ..BlockStyle::default()
                },
            )
        };
        Self {
            settings: self.settings,
            document: self.document.append_columns(
                vec![
                    vec![cell(labels, TextAlign::Left)],
                    vec![cell(values, TextAlign::Right)],
                ],
                BlockStyle {
                    padding: Some(BODY_PADDING),
                    ..BlockStyle::default()
                },
            ),
        }
    }

    pub fn divider(self) -> Self {
        self.block(Block::divider(BlockStyle {
            padding: Some(Padding::new(16, 16, 24, 24)),
            ..BlockStyle::default()
        }))
    }

    pub fn finish(self, subject: impl Into<String>) -> EmailContent {
        let settings = self.settings;
        let mut builder = self.block(Block::text(
            "Compact Connect\nThis is an automated message. Please do not reply to this email.",
            BlockStyle {
                color: Some("#6B6B6B".to_string()),
                background_color: Some("#F5F5F5".to_string()),
                font_size: Some(12),
                text_align: Some(TextAlign::Center),
                padding: Some(Padding::new(24, 24, 24, 24)),
                ..BlockStyle::default()
            },
        ));
        if !settings.is_production() {
            builder = builder.block(Block::text(
                format!(
                    "{ENVIRONMENT_FOOTER_PREFIX} {}",
                    settings.environment_name
                ),
                BlockStyle {
                    color: Some("#7A4C00".to_string()),
                    font_size: Some(12),
                    text_align: Some(TextAlign::Center),
                    padding: Some(Padding::new(4, 16, 24, 24)),
                    ..BlockStyle::default()
                },
            ));
        }
        EmailContent {
            subject: subject.into(),
            document: builder.document,
        }
    }
}

pub fn full_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_string()
}

pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

#[cfg(test)]
pub(crate) fn block_texts(content: &EmailContent) -> Vec<String> {
    content
        .document
        .root_blocks()
        .filter_map(|block| match block {
            Block::Text(data) => Some(data.props.text.clone()),
            Block::Heading(data) => Some(data.props.text.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::test_settings;

    fn root_text(content: &EmailContent, index: usize) -> Option<String> {
        let id = content.document.root_children().get(index)?;
        match content.document.block(id)? {
            Block::Text(data) => Some(data.props.text.clone()),
            _ => None,
        }
    }

    #[test]
    fn non_production_wraps_content_in_warnings() {
        let settings = test_settings("test");
        let content = TemplateBuilder::new(&settings).heading("Hello").finish("Subject");
        let last = content.document.root_children().len() - 1;

        assert!(root_text(&content, 0)
            .expect("banner should be first")
            .starts_with(ENVIRONMENT_BANNER_PREFIX));
        assert!(root_text(&content, last)
            .expect("footer warning should be last")
            .starts_with(ENVIRONMENT_FOOTER_PREFIX));
    }

    #[test]
    fn production_omits_warnings() {
        let settings = test_settings("prod");
        let content = TemplateBuilder::new(&settings).heading("Hello").finish("Subject");
        let texts = block_texts(&content);

        assert!(texts
            .iter()
            .all(|text| !text.starts_with(ENVIRONMENT_BANNER_PREFIX)
                && !text.starts_with(ENVIRONMENT_FOOTER_PREFIX)));
        assert!(matches!(
            content.document.root_blocks().next(),
            Some(Block::Image(_))
        ));
    }

    #[test]
    fn list_renders_one_bullet_per_item() {
        let settings = test_settings("prod");
        let content = TemplateBuilder::new(&settings)
            .list(["one", "two"])
            .finish("Subject");
        assert!(block_texts(&content).contains(&"\u{2022} one\n\u{2022} two".to_string()));
    }

    #[test]
    fn currency_has_two_decimals() {
        assert_eq!(format_currency(12.5), "$12.50");
        assert_eq!(full_name(" Jane ", "Doe"), "Jane Doe");
    }
}
