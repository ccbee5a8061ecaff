use std::fmt::Write as _;

use super::{
    Block, BlockData, BlockStyle, ColumnsProps, DividerProps, EmailDocument, FontWeight,
    HeadingLevel, HeadingProps, ImageProps, LayoutData, TextAlign, TextProps,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("block '{0}' is referenced but not defined")]
    MissingBlock(String),

    #[error("unsupported block type {block_type} at '{id}'")]
    UnsupportedBlock { id: String, block_type: String },

    #[error("block '{0}' contains itself")]
    Cycle(String),
}

/// Renders the document rooted at `root_id` into a static HTML email body.
pub fn render(document: &EmailDocument, root_id: &str) -> Result<String, RenderError> {
    let root = document
        .block(root_id)
        .ok_or_else(|| RenderError::MissingBlock(root_id.to_string()))?;
    let Block::EmailLayout(layout) = root else {
        return Err(RenderError::UnsupportedBlock {
            id: root_id.to_string(),
            block_type: format!("{} as root", root.type_name()),
        });
    };

    let mut renderer = Renderer {
        document,
        path: vec![root_id.to_string()],
        out: String::with_capacity(4096),
    };
    renderer.layout(layout)?;
    Ok(renderer.out)
}

struct Renderer<'a> {
    document: &'a EmailDocument,
    path: Vec<String>,
    out: String,
}

impl Renderer<'_> {
    fn layout(&mut self, layout: &LayoutData) -> Result<(), RenderError> {
        let _ = write!(
            self.out,
            "<!DOCTYPE html><html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\" /></head><body><div style=\"background-color:{};color:{};font-family:{};font-size:16px;font-weight:400;letter-spacing:0.15008px;line-height:1.5;margin:0;padding:32px 0;min-height:100%;width:100%\"><table align=\"center\" width=\"100%\" style=\"margin:0 auto;max-width:600px;background-color:{}\" role=\"presentation\" cellspacing=\"0\" cellpadding=\"0\" border=\"0\"><tbody><tr style=\"width:100%\"><td>",
            escape(&layout.backdrop_color),
            escape(&layout.text_color),
            font_stack(&layout.font_family),
            escape(&layout.canvas_color),
        );
        for id in &layout.children_ids {
            self.child(id)?;
        }
        self.out.push_str("</td></tr></tbody></table></div></body></html>");
        Ok(())
    }

    fn child(&mut self, id: &str) -> Result<(), RenderError> {
        if self.path.iter().any(|ancestor| ancestor == id) {
            return Err(RenderError::Cycle(id.to_string()));
        }
        let document = self.document;
        let block = document
            .block(id)
            .ok_or_else(|| RenderError::MissingBlock(id.to_string()))?;

        self.path.push(id.to_string());
        match block {
            Block::Heading(data) => self.heading(data),
            Block::Text(data) => self.text(data),
            Block::Image(data) => self.image(data),
            Block::Divider(data) => self.divider(data),
            Block::ColumnsContainer(data) => self.columns(data)?,
            Block::EmailLayout(_) => {
                return Err(RenderError::UnsupportedBlock {
                    id: id.to_string(),
                    block_type: "nested EmailLayout".to_string(),
                })
            }
        }
        self.path.pop();
        Ok(())
    }

    fn heading(&mut self, data: &BlockData<HeadingProps>) {
        let (tag, default_size) = match data.props.level {
            HeadingLevel::H1 => ("h1", 32),
            HeadingLevel::H2 => ("h2", 24),
            HeadingLevel::H3 => ("h3", 20),
        };
        let _ = write!(
            self.out,
            "<{tag} style=\"font-weight:bold;margin:0;font-size:{default_size}px;{}\">{}</{tag}>",
            style_css(&data.style),
            text_html(&data.props.text),
        );
    }

    fn text(&mut self, data: &BlockData<TextProps>) {
        let _ = write!(
            self.out,
            "<div style=\"{}\">{}</div>",
            style_css(&data.style),
            text_html(&data.props.text),
        );
    }

    fn image(&mut self, data: &BlockData<ImageProps>) {
        let props = &data.props;
        let width = props
            .width
            .map(|width| format!(" width=\"{width}\""))
            .unwrap_or_default();
        let image = format!(
            "<img alt=\"{}\" src=\"{}\"{width} style=\"outline:none;border:none;text-decoration:none;vertical-align:middle;display:inline-block;max-width:100%\" />",
            escape(&props.alt),
            escape(&props.url),
        );
        let _ = write!(self.out, "<div style=\"{}\">", style_css(&data.style));
        match &props.link_href {
            Some(href) => {
                let _ = write!(
                    self.out,
                    "<a href=\"{}\" style=\"text-decoration:none\" target=\"_blank\">{image}</a>",
                    escape(href)
                );
            }
            None => self.out.push_str(&image),
        }
        self.out.push_str("</div>");
    }

    fn divider(&mut self, data: &BlockData<DividerProps>) {
        let _ = write!(
            self.out,
            "<div style=\"{}\"><hr style=\"width:100%;border:none;border-top:{}px solid {};margin:0\" /></div>",
            style_css(&data.style),
            data.props.line_height,
            escape(&data.props.line_color),
        );
    }

    fn columns(&mut self, data: &BlockData<ColumnsProps>) -> Result<(), RenderError> {
        let count = data.props.columns.len().max(1);
        let half_gap = data.props.columns_gap / 2;
        let _ = write!(
            self.out,
            "<div style=\"{}\"><table align=\"center\" width=\"100%\" cellpadding=\"0\" border=\"0\" style=\"table-layout:fixed;border-collapse:collapse\"><tbody style=\"width:100%\"><tr style=\"width:100%\">",
            style_css(&data.style),
        );
        for (index, column) in data.props.columns.iter().enumerate() {
            let left = if index == 0 { 0 } else { half_gap };
            let right = if index + 1 == count { 0 } else { half_gap };
            let _ = write!(
                self.out,
                "<td style=\"box-sizing:content-box;vertical-align:top;padding-left:{left}px;padding-right:{right}px;width:{}%\">",
                100 / count,
            );
            for id in &column.children_ids {
                self.child(id)?;
            }
            self.out.push_str("</td>");
        }
        self.out.push_str("</tr></tbody></table></div>");
        Ok(())
    }
}

fn style_css(style: &BlockStyle) -> String {
    let mut css = String::new();
    if let Some(color) = &style.color {
        let _ = write!(css, "color:{};", escape(color));
    }
    if let Some(background) = &style.background_color {
        let _ = write!(css, "background-color:{};", escape(background));
    }
    if let Some(size) = style.font_size {
        let _ = write!(css, "font-size:{size}px;");
    }
    if let Some(weight) = style.font_weight {
        css.push_str(match weight {
            FontWeight::Normal => "font-weight:normal;",
            FontWeight::Bold => "font-weight:bold;",
        });
    }
    if let Some(align) = style.text_align {
        css.push_str(match align {
            TextAlign::Left => "text-align:left;",
            TextAlign::Center => "text-align:center;",
            TextAlign::Right => "text-align:right;",
        });
    }
    if let Some(padding) = style.padding {
        let _ = write!(
            css,
            "padding:{}px {}px {}px {}px;",
            padding.top, padding.right, padding.bottom, padding.left
        );
    }
    css
}

fn font_stack(name: &str) -> &'static str {
    match name {
        "MODERN_SERIF" => "Georgia, 'Times New Roman', serif",
        "MONOSPACE" => "'Courier New', Courier, monospace",
        _ => "'Helvetica Neue', 'Arial Nova', 'Nimbus Sans', Arial, sans-serif",
    }
}

fn text_html(text: &str) -> String {
    escape(text).replace('\n', "<br />")
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
